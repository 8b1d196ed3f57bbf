use aws_sdk_transcribe::error::SdkError;
use aws_sdk_transcribe::operation::start_transcription_job::StartTranscriptionJobError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TranscriptionError {
    #[error("Failed to start transcription job: {0}")]
    StartJobError(#[from] SdkError<StartTranscriptionJobError>),

    #[error("Transcription service returned no job for {0}")]
    MissingJob(String),
}
