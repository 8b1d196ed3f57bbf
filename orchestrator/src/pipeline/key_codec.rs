//! Naming convention that carries a work item's identity across storage locations.
//!
//! A transcript key has the shape `<job_identity>_<original_object_key>.json`. The job identity never
//! contains `_`, while the original object key may contain any number of underscores and `/` path
//! segments. Keys written by the first deployment of the pipeline carry an extra synthetic
//! `transcribe_` token in front of the job identity; [`decode`] accepts both shapes.

use std::fmt;

use thiserror::Error;
use uuid::Uuid;

/// Separator between the synthetic prefix and the original object key.
pub const IDENTITY_DELIMITER: char = '_';

/// Token that prefixed the job identity in keys produced by the first deployment,
/// e.g. `transcribe_cfadc0531765c2f6_video.mp4.json`.
pub const LEGACY_JOB_NAME_PREFIX: &str = "transcribe";

const URI_SCHEME_SEPARATOR: &str = "://";
const PATH_SEPARATOR: char = '/';

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyCodecError {
    #[error("Key {key:?} does not end with the expected extension {expected:?}")]
    UnexpectedExtension { key: String, expected: &'static str },

    #[error("Key {0:?} has no identity delimiter")]
    MissingDelimiter(String),

    #[error("Key {0:?} has an empty job identity")]
    EmptyJobIdentity(String),

    #[error("Key {0:?} has an empty original object key")]
    EmptyOriginalKey(String),

    #[error("Job identity {0:?} is invalid: it must be non-empty and must not contain '_' or '/'")]
    InvalidJobIdentity(String),

    #[error("Job identity {0:?} is reserved")]
    ReservedJobIdentity(String),

    #[error("Original object key {0:?} cannot be encoded")]
    InvalidOriginalKey(String),
}

/// The type of artifact a key points at. Each kind has exactly one accepted extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// Raw or localized video.
    Video,
    /// Transcription output, pending or approved.
    Transcript,
}

impl ArtifactKind {
    pub fn extension(&self) -> &'static str {
        match self {
            ArtifactKind::Video => ".mp4",
            ArtifactKind::Transcript => ".json",
        }
    }

    pub fn matches(&self, key: &str) -> bool {
        key.len() > self.extension().len() && key.ends_with(self.extension())
    }
}

/// Token minted once per transcription submission. Retrying an upload mints a new identity on purpose,
/// so two submissions for the same video never share one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JobIdentity(String);

impl JobIdentity {
    /// Mint a fresh random identity (32 lowercase hex characters).
    pub fn mint() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn parse(value: &str) -> Result<Self, KeyCodecError> {
        if value.is_empty() || value.contains(IDENTITY_DELIMITER) || value.contains(PATH_SEPARATOR) {
            return Err(KeyCodecError::InvalidJobIdentity(value.to_string()));
        }
        // Would be indistinguishable from the legacy prefix when decoding.
        if value == LEGACY_JOB_NAME_PREFIX {
            return Err(KeyCodecError::ReservedJobIdentity(value.to_string()));
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Build the key `<job_identity>_<original_key><extension>`.
///
/// Deterministic: the same inputs always produce the same key. The resulting key never starts with `/`
/// and never contains `://`, so `s3://<bucket>/<key>` stays unambiguous.
pub fn encode(job_identity: &JobIdentity, original_key: &str, kind: ArtifactKind) -> Result<String, KeyCodecError> {
    if original_key.is_empty() || original_key.contains(URI_SCHEME_SEPARATOR) {
        return Err(KeyCodecError::InvalidOriginalKey(original_key.to_string()));
    }
    Ok(format!("{}{}{}{}", job_identity, IDENTITY_DELIMITER, original_key, kind.extension()))
}

/// Recover `(job_identity, original_key)` from a key produced by [`encode`] or by the legacy
/// `transcribe_<job_identity>_<original_key>` naming.
///
/// The job identity is the token right after the synthetic prefix; everything that follows the next
/// delimiter belongs to the original key, underscores included.
pub fn decode(key: &str, kind: ArtifactKind) -> Result<(JobIdentity, String), KeyCodecError> {
    let stem = key
        .strip_suffix(kind.extension())
        .ok_or_else(|| KeyCodecError::UnexpectedExtension { key: key.to_string(), expected: kind.extension() })?;

    let (first, rest) =
        stem.split_once(IDENTITY_DELIMITER).ok_or_else(|| KeyCodecError::MissingDelimiter(key.to_string()))?;

    let (job_identity, original_key) = if first == LEGACY_JOB_NAME_PREFIX {
        rest.split_once(IDENTITY_DELIMITER).ok_or_else(|| KeyCodecError::MissingDelimiter(key.to_string()))?
    } else {
        (first, rest)
    };

    if job_identity.is_empty() {
        return Err(KeyCodecError::EmptyJobIdentity(key.to_string()));
    }
    if original_key.is_empty() {
        return Err(KeyCodecError::EmptyOriginalKey(key.to_string()));
    }

    Ok((JobIdentity::parse(job_identity)?, original_key.to_string()))
}
