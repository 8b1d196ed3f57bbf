pub mod aws_batch;
pub mod error;

use async_trait::async_trait;
pub use error::BatchError;

use crate::pipeline::DubbingJobRequest;

/// Handle of a submitted batch job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSubmission {
    pub job_id: String,
    pub job_name: String,
}

/// Containerised batch job service running the translate/dub step
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BatchClient: Send + Sync {
    async fn submit_job(&self, request: &DubbingJobRequest) -> Result<BatchSubmission, BatchError>;
}
