pub(crate) mod completion;
pub(crate) mod dispatch;
pub(crate) mod ingestion;
pub(crate) mod review_gate;

use std::sync::Arc;

use async_trait::async_trait;

use crate::core::config::Config;
use crate::error::TriggerError;
use crate::pipeline::StageInfo;

/// What a trigger did with one artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerOutcome {
    TranscriptionSubmitted { job_name: String, status: Option<String> },
    ReviewRequested,
    DubbingSubmitted { job_id: String, job_name: String },
    CompletionNotified,
}

/// One trigger per pipeline stage. A trigger is invoked once per delivered event and owns nothing beyond
/// that invocation.
#[async_trait]
pub trait StageTrigger: Send + Sync {
    async fn handle(&self, info: &StageInfo, config: Arc<Config>) -> Result<TriggerOutcome, TriggerError>;
}
