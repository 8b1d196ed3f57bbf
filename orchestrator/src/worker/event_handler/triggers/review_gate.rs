use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::core::client::alert::publish_notification;
use crate::core::config::Config;
use crate::error::TriggerError;
use crate::pipeline::StageInfo;
use crate::types::notification::PipelineNotification;
use crate::worker::event_handler::triggers::{StageTrigger, TriggerOutcome};

/// Pending transcript: tell a reviewer where it is. The key is passed on as is.
pub struct ReviewGateTrigger;

#[async_trait]
impl StageTrigger for ReviewGateTrigger {
    async fn handle(&self, info: &StageInfo, config: Arc<Config>) -> Result<TriggerOutcome, TriggerError> {
        publish_notification(config.alerts(), &PipelineNotification::review_requested(&info.artifact)).await?;
        info!(bucket = %info.artifact.bucket, key = %info.artifact.key, "Review requested");
        Ok(TriggerOutcome::ReviewRequested)
    }
}
