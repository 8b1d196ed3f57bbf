use aws_sdk_batch::error::SdkError;
use aws_sdk_batch::operation::submit_job::SubmitJobError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("Failed to submit batch job: {0}")]
    SubmitJobError(#[from] SdkError<SubmitJobError>),
}
