use serde::{Deserialize, Serialize};

use crate::pipeline::StageArtifact;

/// Messages published on the pipeline topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PipelineNotification {
    /// A transcript is waiting for a reviewer.
    ReviewRequested { bucket: String, key: String },
    /// A localized video landed in the final-output location.
    LocalizationCompleted { bucket: String, key: String },
    /// An event was dropped because it could never be processed.
    ItemRejected {
        queue: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        bucket: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        key: Option<String>,
        reason: String,
    },
}

impl PipelineNotification {
    pub fn review_requested(artifact: &StageArtifact) -> Self {
        Self::ReviewRequested { bucket: artifact.bucket.clone(), key: artifact.key.clone() }
    }

    pub fn localization_completed(artifact: &StageArtifact) -> Self {
        Self::LocalizationCompleted { bucket: artifact.bucket.clone(), key: artifact.key.clone() }
    }

    pub fn to_message(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
