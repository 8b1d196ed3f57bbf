use assert_matches::assert_matches;
use aws_sdk_batch::error::SdkError;
use rstest::rstest;
use tracing::Instrument;
use tracing_subscriber::prelude::*;

use crate::core::client::alert::MockAlertClient;
use crate::core::client::batch::{BatchError, BatchSubmission, MockBatchClient};
use crate::core::client::transcription::MockTranscriptionClient;
use crate::error::TriggerError;
use crate::pipeline::{KeyCodecError, Stage};
use crate::tests::common::{object_created_payload, SpanFieldRecorder, APPROVED_REVIEW_BUCKET};
use crate::tests::config::TestConfigBuilder;
use crate::tests::workers::notification_of;
use crate::types::constant::{ENV_INPUT_SUBTITLES, ENV_INPUT_VIDEO, ENV_OUTPUT_BUCKET, ENV_OUTPUT_LANGUAGES, ENV_REGION};
use crate::types::notification::PipelineNotification;
use crate::worker::event_handler::service::{DeliveryDecision, EventHandlerService, EventOutcome};
use crate::worker::event_handler::triggers::TriggerOutcome;

fn accepting_batch_client(times: usize) -> MockBatchClient {
    let mut batch = MockBatchClient::new();
    batch.expect_submit_job().times(times).returning(|request| {
        Ok(BatchSubmission { job_id: "8b1c2e0a-job".to_string(), job_name: request.job_name.clone() })
    });
    batch
}

#[tokio::test]
async fn scenario_approved_transcript_dispatches_dubbing_job() {
    let mut batch = MockBatchClient::new();
    batch
        .expect_submit_job()
        .times(1)
        .withf(|request| {
            request.env(ENV_INPUT_VIDEO) == Some("s3://intake/trailer.mp4")
                && request.env(ENV_INPUT_SUBTITLES) == Some("s3://approved/ab12cd34_trailer.mp4.json")
                && request.env(ENV_OUTPUT_BUCKET) == Some("done")
                && request.env(ENV_OUTPUT_LANGUAGES) == Some("es de")
                && request.env(ENV_REGION) == Some("eu-central-1")
                && request.job_queue == "dubbing-queue"
                && request.job_definition == "dubbing-job"
                && request.job_name == "localize-ab12cd34"
        })
        .returning(|request| Ok(BatchSubmission { job_id: "job-0001".to_string(), job_name: request.job_name.clone() }));
    let mut transcription = MockTranscriptionClient::new();
    transcription.expect_start_transcription_job().never();
    let mut alerts = MockAlertClient::new();
    alerts.expect_send_message().never();

    let config = TestConfigBuilder::new()
        .configure_batch_client(batch)
        .configure_transcription_client(transcription)
        .configure_alerts(alerts)
        .build();

    let processed = EventHandlerService::process_payload(
        Some(Stage::ApprovedReview),
        &object_created_payload(APPROVED_REVIEW_BUCKET, "ab12cd34_trailer.mp4.json"),
        config,
    )
    .await;

    assert_eq!(
        processed.result.unwrap(),
        EventOutcome::Handled {
            stage: Stage::ApprovedReview,
            outcome: TriggerOutcome::DubbingSubmitted {
                job_id: "job-0001".to_string(),
                job_name: "localize-ab12cd34".to_string()
            },
        }
    );
}

#[rstest]
#[case("ab12cd34_video_with_underscores.mp4.json", "s3://intake/video_with_underscores.mp4")]
#[case("ab12cd34_uploads/2024/trailer.mp4.json", "s3://intake/uploads/2024/trailer.mp4")]
#[case("transcribe_cfadc0531765c2f6_video.mp4.json", "s3://intake/video.mp4")]
#[tokio::test]
async fn video_is_recovered_from_the_transcript_key(#[case] key: &str, #[case] expected_video: &'static str) {
    let mut batch = MockBatchClient::new();
    batch
        .expect_submit_job()
        .times(1)
        .withf(move |request| request.env(ENV_INPUT_VIDEO) == Some(expected_video))
        .returning(|request| Ok(BatchSubmission { job_id: "job-0002".to_string(), job_name: request.job_name.clone() }));

    let config = TestConfigBuilder::new().configure_batch_client(batch).build();
    let processed = EventHandlerService::process_payload(
        Some(Stage::ApprovedReview),
        &object_created_payload(APPROVED_REVIEW_BUCKET, key),
        config,
    )
    .await;

    assert!(processed.result.is_ok());
}

#[tokio::test]
async fn duplicate_delivery_submits_twice() {
    let config = TestConfigBuilder::new().configure_batch_client(accepting_batch_client(2)).build();
    let payload = object_created_payload(APPROVED_REVIEW_BUCKET, "ab12cd34_trailer.mp4.json");

    for _ in 0..2 {
        let processed = EventHandlerService::process_payload(Some(Stage::ApprovedReview), &payload, config.clone()).await;
        assert_matches!(
            processed.result,
            Ok(EventOutcome::Handled { outcome: TriggerOutcome::DubbingSubmitted { .. }, .. })
        );
        assert_eq!(processed.decision(), DeliveryDecision::Ack);
    }
}

#[tokio::test]
async fn malformed_approved_key_is_rejected_without_submission() {
    let mut batch = MockBatchClient::new();
    batch.expect_submit_job().never();
    let mut alerts = MockAlertClient::new();
    alerts
        .expect_send_message()
        .times(1)
        .withf(|message| {
            matches!(
                notification_of(message),
                PipelineNotification::ItemRejected { ref queue, ref bucket, ref key, .. }
                    if queue == "approved_review"
                        && bucket.as_deref() == Some(APPROVED_REVIEW_BUCKET)
                        && key.as_deref() == Some("trailer.mp4.json")
            )
        })
        .returning(|_| Ok(()));

    let config = TestConfigBuilder::new().configure_batch_client(batch).configure_alerts(alerts).build();
    let processed = EventHandlerService::process_payload(
        Some(Stage::ApprovedReview),
        &object_created_payload(APPROVED_REVIEW_BUCKET, "trailer.mp4.json"),
        config.clone(),
    )
    .await;

    assert_matches!(processed.result, Err(TriggerError::MalformedKey(KeyCodecError::MissingDelimiter(_))));
    assert_eq!(processed.decision(), DeliveryDecision::AckAndAlert);
    assert_eq!(EventHandlerService::settle(&processed, "approved_review", &config).await, DeliveryDecision::AckAndAlert);
}

#[tokio::test]
async fn batch_rejection_is_left_for_redelivery() {
    let mut batch = MockBatchClient::new();
    batch
        .expect_submit_job()
        .times(1)
        .returning(|_| Err(BatchError::SubmitJobError(SdkError::construction_failure("throttled"))));
    let mut alerts = MockAlertClient::new();
    alerts.expect_send_message().never();

    let config = TestConfigBuilder::new().configure_batch_client(batch).configure_alerts(alerts).build();
    let processed = EventHandlerService::process_payload(
        Some(Stage::ApprovedReview),
        &object_created_payload(APPROVED_REVIEW_BUCKET, "ab12cd34_trailer.mp4.json"),
        config.clone(),
    )
    .await;

    assert_matches!(processed.result, Err(TriggerError::Submission(_)));
    assert_eq!(EventHandlerService::settle(&processed, "approved_review", &config).await, DeliveryDecision::Nack);
}

#[tokio::test]
async fn failed_dispatch_keeps_the_decoded_identity_on_the_event_span() {
    let recorder = SpanFieldRecorder::new("job_identity");
    let _guard = tracing::subscriber::set_default(tracing_subscriber::registry().with(recorder.clone()));

    let mut batch = MockBatchClient::new();
    batch
        .expect_submit_job()
        .times(1)
        .returning(|_| Err(BatchError::SubmitJobError(SdkError::construction_failure("throttled"))));
    let config = TestConfigBuilder::new().configure_batch_client(batch).build();

    let span = tracing::info_span!("storage_event", job_identity = tracing::field::Empty);
    let processed = EventHandlerService::process_payload(
        Some(Stage::ApprovedReview),
        &object_created_payload(APPROVED_REVIEW_BUCKET, "ab12cd34_trailer.mp4.json"),
        config,
    )
    .instrument(span)
    .await;

    assert_matches!(processed.result, Err(TriggerError::Submission(_)));
    assert_eq!(recorder.values(), vec!["ab12cd34".to_string()]);
}
