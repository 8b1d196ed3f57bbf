use thiserror::Error;

use crate::core::client::alert::AlertError;
use crate::core::client::batch::BatchError;
use crate::core::client::transcription::TranscriptionError;
use crate::pipeline::KeyCodecError;
use crate::types::event::EventError;

/// A downstream job or notification service rejected or failed the call.
#[derive(Error, Debug)]
pub enum SubmissionError {
    #[error(transparent)]
    Transcription(#[from] TranscriptionError),

    #[error(transparent)]
    Batch(#[from] BatchError),

    #[error(transparent)]
    Notification(#[from] AlertError),
}

#[derive(Error, Debug)]
pub enum TriggerError {
    #[error("Invalid event: {0}")]
    InvalidEvent(#[from] EventError),

    #[error("Malformed key: {0}")]
    MalformedKey(#[from] KeyCodecError),

    #[error("Submission failed: {0}")]
    Submission(#[from] SubmissionError),
}

impl TriggerError {
    /// Only submission failures are worth another delivery. Invalid events and malformed keys fail the same
    /// way every time.
    pub fn is_retryable(&self) -> bool {
        matches!(self, TriggerError::Submission(_))
    }
}

impl From<TranscriptionError> for TriggerError {
    fn from(err: TranscriptionError) -> Self {
        TriggerError::Submission(err.into())
    }
}

impl From<BatchError> for TriggerError {
    fn from(err: BatchError) -> Self {
        TriggerError::Submission(err.into())
    }
}

impl From<AlertError> for TriggerError {
    fn from(err: AlertError) -> Self {
        TriggerError::Submission(err.into())
    }
}
