//! Storage object-created notifications as delivered on the stage queues.

use serde::Deserialize;
use thiserror::Error;
use url::form_urlencoded;

use crate::pipeline::stage::StageError;
use crate::pipeline::StageArtifact;
use crate::types::constant::{OBJECT_CREATED_EVENT_PREFIX, STORAGE_TEST_EVENT};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EventError {
    #[error("Event payload is empty")]
    EmptyPayload,

    #[error("Event payload is not a storage notification: {0}")]
    NotANotification(String),

    #[error("Event carries no records")]
    MissingRecords,

    #[error("Event carries {0} records, expected exactly one")]
    UnexpectedRecordCount(usize),

    #[error("Event record has no bucket name")]
    MissingBucket,

    #[error("Event record has no object key")]
    MissingKey { bucket: String },

    #[error(transparent)]
    Stage(#[from] StageError),
}

impl EventError {
    /// Bucket read from the record before the event was found incomplete.
    pub fn bucket(&self) -> Option<&str> {
        match self {
            EventError::MissingKey { bucket } => Some(bucket),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawNotification {
    #[serde(rename = "Records")]
    records: Option<Vec<RawRecord>>,
    #[serde(rename = "Event")]
    event: Option<String>,
    #[serde(rename = "Bucket")]
    bucket: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRecord {
    event_name: Option<String>,
    s3: Option<RawEntity>,
}

#[derive(Debug, Deserialize)]
struct RawEntity {
    bucket: Option<RawBucket>,
    object: Option<RawObject>,
}

#[derive(Debug, Deserialize)]
struct RawBucket {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawObject {
    key: Option<String>,
}

/// A validated single-record storage event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEvent {
    pub bucket: String,
    /// Object key, already URL-form decoded.
    pub key: String,
    pub event_name: Option<String>,
}

impl StorageEvent {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self { bucket: bucket.into(), key: key.into(), event_name: None }
    }

    /// Events without a name (hand written replays) count as object creation.
    pub fn is_object_created(&self) -> bool {
        self.event_name.as_deref().map_or(true, |name| name.starts_with(OBJECT_CREATED_EVENT_PREFIX))
    }

    pub fn artifact(&self) -> StageArtifact {
        StageArtifact::new(self.bucket.clone(), self.key.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageNotification {
    /// Sent once by storage when a notification target is configured.
    Test { bucket: Option<String> },
    Record(StorageEvent),
}

impl StorageNotification {
    pub fn parse(payload: &[u8]) -> Result<Self, EventError> {
        if payload.iter().all(u8::is_ascii_whitespace) {
            return Err(EventError::EmptyPayload);
        }

        let raw: RawNotification =
            serde_json::from_slice(payload).map_err(|e| EventError::NotANotification(e.to_string()))?;

        if raw.records.is_none() && raw.event.as_deref() == Some(STORAGE_TEST_EVENT) {
            return Ok(StorageNotification::Test { bucket: raw.bucket });
        }

        let mut records = raw.records.ok_or(EventError::MissingRecords)?;
        if records.len() != 1 {
            return Err(match records.len() {
                0 => EventError::MissingRecords,
                n => EventError::UnexpectedRecordCount(n),
            });
        }
        let record = records.remove(0);

        let (bucket, object) = match record.s3 {
            Some(entity) => (entity.bucket, entity.object),
            None => (None, None),
        };
        let bucket = bucket.and_then(|b| b.name).filter(|name| !name.is_empty()).ok_or(EventError::MissingBucket)?;
        let key = object
            .and_then(|o| o.key)
            .map(|key| decode_object_key(&key))
            .filter(|key| !key.is_empty())
            .ok_or_else(|| EventError::MissingKey { bucket: bucket.clone() })?;

        Ok(StorageNotification::Record(StorageEvent { bucket, key, event_name: record.event_name }))
    }
}

/// Object keys in storage notifications are URL-form encoded: `+` for space and `%XX` escapes.
pub fn decode_object_key(raw: &str) -> String {
    form_urlencoded::parse(format!("key={raw}").as_bytes())
        .find(|(name, _)| name == "key")
        .map(|(_, value)| value.into_owned())
        .unwrap_or_default()
}
