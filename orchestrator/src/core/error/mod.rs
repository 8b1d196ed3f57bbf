use thiserror::Error;

use super::client::{alert::AlertError, batch::BatchError, build::BuildError, queue::QueueError};
use super::client::transcription::TranscriptionError;

pub type OrchestratorCoreResult<T> = Result<T, OrchestratorCoreError>;

#[derive(Error, Debug)]
pub enum OrchestratorCoreError {
    #[error("Alert error: {0}")]
    AlertError(#[from] AlertError),

    #[error("Queue error: {0}")]
    QueueError(#[from] QueueError),

    #[error("Transcription error: {0}")]
    TranscriptionError(#[from] TranscriptionError),

    #[error("Batch error: {0}")]
    BatchError(#[from] BatchError),

    #[error("Build error: {0}")]
    BuildError(#[from] BuildError),

    #[error("Invalid provider: {0}")]
    InvalidProvider(String),
}
