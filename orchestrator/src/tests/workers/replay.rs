use std::io::Write;

use assert_matches::assert_matches;
use tempfile::NamedTempFile;

use crate::core::client::alert::MockAlertClient;
use crate::core::client::batch::{BatchSubmission, MockBatchClient};
use crate::error::TriggerError;
use crate::pipeline::Stage;
use crate::tests::common::{object_created_payload, APPROVED_REVIEW_BUCKET};
use crate::tests::config::TestConfigBuilder;
use crate::tests::workers::notification_of;
use crate::types::notification::PipelineNotification;
use crate::worker::event_handler::service::EventOutcome;
use crate::worker::event_handler::triggers::TriggerOutcome;
use crate::worker::{replay_event, REPLAY_SOURCE};
use crate::OrchestratorError;

fn event_file(payload: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(payload).unwrap();
    file.flush().unwrap();
    file
}

#[tokio::test]
async fn replay_runs_the_stage_trigger() {
    let mut batch = MockBatchClient::new();
    batch
        .expect_submit_job()
        .times(1)
        .returning(|request| Ok(BatchSubmission { job_id: "job-0003".to_string(), job_name: request.job_name.clone() }));

    let config = TestConfigBuilder::new().configure_batch_client(batch).build();
    let file = event_file(&object_created_payload(APPROVED_REVIEW_BUCKET, "ab12cd34_trailer.mp4.json"));

    let outcome = replay_event(config, None, file.path()).await.unwrap();
    assert_matches!(
        outcome,
        EventOutcome::Handled { stage: Stage::ApprovedReview, outcome: TriggerOutcome::DubbingSubmitted { .. } }
    );
}

#[tokio::test]
async fn replay_reports_rejections() {
    let mut alerts = MockAlertClient::new();
    alerts
        .expect_send_message()
        .times(1)
        .withf(|message| {
            matches!(
                notification_of(message),
                PipelineNotification::ItemRejected { ref queue, .. } if queue == REPLAY_SOURCE
            )
        })
        .returning(|_| Ok(()));

    let config = TestConfigBuilder::new().configure_alerts(alerts).build();
    let file = event_file(&object_created_payload(APPROVED_REVIEW_BUCKET, "trailer.mp4.json"));

    let result = replay_event(config, Some(Stage::ApprovedReview), file.path()).await;
    assert_matches!(result, Err(OrchestratorError::TriggerError(TriggerError::MalformedKey(_))));
}

#[tokio::test]
async fn missing_event_file_is_an_io_error() {
    let config = TestConfigBuilder::new().build();
    let dir = tempfile::tempdir().unwrap();

    let result = replay_event(config, None, &dir.path().join("missing.json")).await;
    assert_matches!(result, Err(OrchestratorError::IoError(_)));
}
