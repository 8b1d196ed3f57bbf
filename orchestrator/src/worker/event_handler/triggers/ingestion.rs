use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, Span};

use crate::core::config::Config;
use crate::error::TriggerError;
use crate::pipeline::{StageInfo, TranscriptionJobRequest, WorkItem};
use crate::worker::event_handler::triggers::{StageTrigger, TriggerOutcome};

/// Raw video landed in the intake bucket: mint a job identity and start transcription into the
/// pending-review bucket.
pub struct IngestionTrigger;

#[async_trait]
impl StageTrigger for IngestionTrigger {
    async fn handle(&self, info: &StageInfo, config: Arc<Config>) -> Result<TriggerOutcome, TriggerError> {
        let work_item = WorkItem::start(info.artifact.key.clone());
        let request = TranscriptionJobRequest::build(
            &work_item,
            &info.artifact,
            &config.layout().pending_review,
            &config.params().transcription,
        )?;

        Span::current().record("job_identity", work_item.job_identity.as_str());

        let submission = config.transcription().start_transcription_job(&request).await.inspect_err(|e| {
            // The job may exist despite the error. Its transcript carries this identity.
            error!(
                job_identity = %work_item.job_identity,
                video_key = %work_item.video_key,
                output_key = %request.output_key,
                error = %e,
                "Failed to start transcription job"
            );
        })?;
        info!(
            job_identity = %work_item.job_identity,
            video_key = %work_item.video_key,
            job_name = %submission.job_name,
            status = ?submission.status,
            output_key = %request.output_key,
            "Transcription job submitted"
        );

        Ok(TriggerOutcome::TranscriptionSubmitted { job_name: submission.job_name, status: submission.status })
    }
}
