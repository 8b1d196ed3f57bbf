use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, Span};

use crate::core::config::Config;
use crate::error::TriggerError;
use crate::pipeline::{DubbingJobRequest, StageInfo};
use crate::worker::event_handler::triggers::{StageTrigger, TriggerOutcome};

/// Approved transcript: pair it with its video and submit the translate/dub batch job.
///
/// The video is expected in the intake bucket under the key decoded from the transcript. Its existence is
/// not checked. Redelivered events submit again.
pub struct DispatchTrigger;

#[async_trait]
impl StageTrigger for DispatchTrigger {
    async fn handle(&self, info: &StageInfo, config: Arc<Config>) -> Result<TriggerOutcome, TriggerError> {
        let work_item = info.work_item().inspect_err(|e| {
            error!(
                bucket = %info.artifact.bucket,
                key = %info.artifact.key,
                error = %e,
                "Approved transcript key does not identify a video"
            );
        })?;

        Span::current().record("job_identity", work_item.job_identity.as_str());

        let layout = config.layout();
        let video = work_item.video_artifact(&layout.intake);
        let request =
            DubbingJobRequest::build(&work_item, &video, &info.artifact, &layout.final_output, &config.params().batch);

        let submission = config.batch().submit_job(&request).await.inspect_err(|e| {
            error!(
                job_identity = %work_item.job_identity,
                video_key = %work_item.video_key,
                transcript_key = %info.artifact.key,
                error = %e,
                "Failed to submit dubbing job"
            );
        })?;
        info!(
            job_identity = %work_item.job_identity,
            video_key = %work_item.video_key,
            job_id = %submission.job_id,
            job_name = %submission.job_name,
            "Dubbing job submitted"
        );

        Ok(TriggerOutcome::DubbingSubmitted { job_id: submission.job_id, job_name: submission.job_name })
    }
}
