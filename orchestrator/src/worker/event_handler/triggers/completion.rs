use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::core::client::alert::publish_notification;
use crate::core::config::Config;
use crate::error::TriggerError;
use crate::pipeline::StageInfo;
use crate::types::notification::PipelineNotification;
use crate::worker::event_handler::triggers::{StageTrigger, TriggerOutcome};

/// Localized video in the final-output bucket. End of the pipeline.
pub struct CompletionTrigger;

#[async_trait]
impl StageTrigger for CompletionTrigger {
    async fn handle(&self, info: &StageInfo, config: Arc<Config>) -> Result<TriggerOutcome, TriggerError> {
        publish_notification(config.alerts(), &PipelineNotification::localization_completed(&info.artifact)).await?;
        info!(bucket = %info.artifact.bucket, key = %info.artifact.key, "Localization completed");
        Ok(TriggerOutcome::CompletionNotified)
    }
}
