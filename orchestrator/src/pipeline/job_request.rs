//! Job requests handed to the external job systems. Built fresh for every triggering event and never
//! mutated after construction.

use serde::Serialize;

use crate::pipeline::key_codec::KeyCodecError;
use crate::pipeline::work_item::{StageArtifact, WorkItem};
use crate::types::constant::{ENV_INPUT_SUBTITLES, ENV_INPUT_VIDEO, ENV_OUTPUT_BUCKET, ENV_OUTPUT_LANGUAGES, ENV_REGION};
use crate::types::params::{BatchArgs, TranscriptionArgs};

/// Request for the transcription service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscriptionJobRequest {
    pub job_name: String,
    pub source_uri: String,
    pub output_bucket: String,
    pub output_key: String,
    pub media_format: String,
    pub language_code: String,
}

impl TranscriptionJobRequest {
    /// Transcribe `source` into the pending-review location, under the key that encodes `work_item`.
    pub fn build(
        work_item: &WorkItem,
        source: &StageArtifact,
        pending_review_bucket: &str,
        args: &TranscriptionArgs,
    ) -> Result<Self, KeyCodecError> {
        Ok(Self {
            job_name: format!("{}-{}", args.job_name_prefix, work_item.job_identity),
            source_uri: source.uri(),
            output_bucket: pending_review_bucket.to_string(),
            output_key: work_item.transcript_key()?,
            media_format: args.media_format.clone(),
            language_code: args.language_code.clone(),
        })
    }
}

/// Request for the batch translate/dub container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DubbingJobRequest {
    pub job_name: String,
    pub job_queue: String,
    pub job_definition: String,
    /// Container environment overrides, in submission order.
    pub environment: Vec<(String, String)>,
}

impl DubbingJobRequest {
    pub fn build(
        work_item: &WorkItem,
        video: &StageArtifact,
        transcript: &StageArtifact,
        output_bucket: &str,
        args: &BatchArgs,
    ) -> Self {
        let environment = vec![
            (ENV_INPUT_VIDEO.to_string(), video.uri()),
            (ENV_INPUT_SUBTITLES.to_string(), transcript.uri()),
            (ENV_OUTPUT_BUCKET.to_string(), output_bucket.to_string()),
            (ENV_OUTPUT_LANGUAGES.to_string(), args.output_languages.clone()),
            (ENV_REGION.to_string(), args.region.clone()),
        ];
        Self {
            job_name: format!("{}-{}", args.job_name_prefix, work_item.job_identity),
            job_queue: args.job_queue.clone(),
            job_definition: args.job_definition.clone(),
            environment,
        }
    }

    pub fn env(&self, name: &str) -> Option<&str> {
        self.environment.iter().find(|(key, _)| key == name).map(|(_, value)| value.as_str())
    }
}
