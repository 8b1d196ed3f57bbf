pub mod error;
pub mod transcribe;

use async_trait::async_trait;
pub use error::TranscriptionError;

use crate::pipeline::TranscriptionJobRequest;

/// Acknowledgement of an accepted transcription job. Observability only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptionSubmission {
    pub job_name: String,
    pub status: Option<String>,
}

/// Speech-to-text job service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranscriptionClient: Send + Sync {
    /// Start one transcription job. Exactly one call to the service, no retries.
    async fn start_transcription_job(
        &self,
        request: &TranscriptionJobRequest,
    ) -> Result<TranscriptionSubmission, TranscriptionError>;
}
