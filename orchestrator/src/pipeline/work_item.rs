use std::fmt;

use crate::pipeline::key_codec::{self, ArtifactKind, JobIdentity, KeyCodecError};

pub const STORAGE_URI_SCHEME: &str = "s3";

/// One stored object representing a work item at one pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StageArtifact {
    pub bucket: String,
    pub key: String,
}

impl StageArtifact {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self { bucket: bucket.into(), key: key.into() }
    }

    /// Fully qualified `s3://bucket/key` reference.
    pub fn uri(&self) -> String {
        format!("{}://{}/{}", STORAGE_URI_SCHEME, self.bucket, self.key)
    }
}

impl fmt::Display for StageArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uri())
    }
}

/// A video's journey through the pipeline. Never persisted: it is rebuilt from keys at every stage.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WorkItem {
    pub job_identity: JobIdentity,
    /// Object key of the raw video in the intake bucket. Also the video identity.
    pub video_key: String,
}

impl WorkItem {
    /// Start a new work item for a freshly uploaded video.
    pub fn start(video_key: impl Into<String>) -> Self {
        Self { job_identity: JobIdentity::mint(), video_key: video_key.into() }
    }

    /// Rebuild the work item from a pending or approved transcript key.
    pub fn from_transcript_key(key: &str) -> Result<Self, KeyCodecError> {
        let (job_identity, video_key) = key_codec::decode(key, ArtifactKind::Transcript)?;
        Ok(Self { job_identity, video_key })
    }

    /// Key of this item's transcript, identical in the pending and approved locations.
    pub fn transcript_key(&self) -> Result<String, KeyCodecError> {
        key_codec::encode(&self.job_identity, &self.video_key, ArtifactKind::Transcript)
    }

    pub fn video_artifact(&self, intake_bucket: &str) -> StageArtifact {
        StageArtifact::new(intake_bucket, self.video_key.clone())
    }
}
