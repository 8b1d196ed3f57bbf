use assert_matches::assert_matches;
use rstest::rstest;

use crate::core::client::alert::{AlertError, MockAlertClient};
use crate::core::client::batch::MockBatchClient;
use crate::core::client::transcription::MockTranscriptionClient;
use crate::error::TriggerError;
use crate::pipeline::stage::StageError;
use crate::pipeline::Stage;
use crate::tests::common::{
    bucket_layout, object_created_payload, object_removed_payload, payload_without_key, storage_test_payload,
    APPROVED_REVIEW_BUCKET, INTAKE_BUCKET,
};
use crate::tests::config::TestConfigBuilder;
use crate::tests::workers::notification_of;
use crate::types::event::{EventError, StorageEvent};
use crate::types::notification::PipelineNotification;
use crate::worker::event_handler::service::{DeliveryDecision, EventHandlerService, EventOutcome};

/// Mocks that fail the test on any submission or notification.
fn silent_config() -> std::sync::Arc<crate::core::config::Config> {
    let mut transcription = MockTranscriptionClient::new();
    transcription.expect_start_transcription_job().never();
    let mut batch = MockBatchClient::new();
    batch.expect_submit_job().never();
    let mut alerts = MockAlertClient::new();
    alerts.expect_send_message().never();
    TestConfigBuilder::new()
        .configure_transcription_client(transcription)
        .configure_batch_client(batch)
        .configure_alerts(alerts)
        .build()
}

#[tokio::test]
async fn event_without_key_is_invalid_and_submits_nothing() {
    let mut transcription = MockTranscriptionClient::new();
    transcription.expect_start_transcription_job().never();
    let mut batch = MockBatchClient::new();
    batch.expect_submit_job().never();
    let mut alerts = MockAlertClient::new();
    alerts
        .expect_send_message()
        .times(1)
        .withf(|message| {
            notification_of(message)
                == PipelineNotification::ItemRejected {
                    queue: "raw_video".to_string(),
                    bucket: Some(INTAKE_BUCKET.to_string()),
                    key: None,
                    reason: "Invalid event: Event record has no object key".to_string(),
                }
        })
        .returning(|_| Ok(()));

    let config = TestConfigBuilder::new()
        .configure_transcription_client(transcription)
        .configure_batch_client(batch)
        .configure_alerts(alerts)
        .build();

    let processed =
        EventHandlerService::process_payload(Some(Stage::RawVideo), &payload_without_key(INTAKE_BUCKET), config.clone())
            .await;

    assert_matches!(
        processed.result,
        Err(TriggerError::InvalidEvent(EventError::MissingKey { ref bucket })) if bucket == INTAKE_BUCKET
    );
    assert!(processed.event.is_none());
    assert_eq!(processed.bucket(), Some(INTAKE_BUCKET));
    assert_eq!(EventHandlerService::settle(&processed, "raw_video", &config).await, DeliveryDecision::AckAndAlert);
}

#[rstest]
#[case(b"".to_vec())]
#[case(b"not json".to_vec())]
#[case(br#"{"Records": []}"#.to_vec())]
#[tokio::test]
async fn unreadable_payloads_are_invalid_events(#[case] payload: Vec<u8>) {
    let processed = EventHandlerService::process_payload(Some(Stage::RawVideo), &payload, silent_config()).await;

    assert_matches!(processed.result, Err(TriggerError::InvalidEvent(_)));
    assert_eq!(processed.decision(), DeliveryDecision::AckAndAlert);
}

#[rstest]
#[case(Stage::RawVideo, storage_test_payload(INTAKE_BUCKET))]
#[case(Stage::RawVideo, object_removed_payload(INTAKE_BUCKET, "trailer.mp4"))]
#[case(Stage::RawVideo, object_created_payload(INTAKE_BUCKET, "notes.txt"))]
#[case(Stage::ApprovedReview, object_created_payload(APPROVED_REVIEW_BUCKET, "ab12cd34_trailer.mp4"))]
#[tokio::test]
async fn irrelevant_events_are_skipped(#[case] queue: Stage, #[case] payload: Vec<u8>) {
    let config = silent_config();
    let processed = EventHandlerService::process_payload(Some(queue), &payload, config.clone()).await;

    assert_matches!(processed.result, Ok(EventOutcome::Skipped { .. }));
    assert_eq!(EventHandlerService::settle(&processed, &queue.to_string(), &config).await, DeliveryDecision::Ack);
}

#[test]
fn queue_stage_takes_precedence_over_bucket() {
    let event = StorageEvent::new("elsewhere", "ab12cd34_trailer.mp4.json");
    let info = EventHandlerService::route(Some(Stage::ApprovedReview), &event, &bucket_layout()).unwrap();
    assert_eq!(info.stage, Stage::ApprovedReview);
}

#[rstest]
#[case(INTAKE_BUCKET, "trailer.mp4", Stage::RawVideo)]
#[case("pending", "ab12cd34_trailer.mp4.json", Stage::PendingReview)]
#[case(APPROVED_REVIEW_BUCKET, "ab12cd34_trailer.mp4.json", Stage::ApprovedReview)]
#[case("done", "trailer.mp4", Stage::FinalVideo)]
fn stage_without_queue_comes_from_bucket(#[case] bucket: &str, #[case] key: &str, #[case] expected: Stage) {
    let event = StorageEvent::new(bucket, key);
    assert_eq!(EventHandlerService::route(None, &event, &bucket_layout()).unwrap().stage, expected);
}

#[tokio::test]
async fn unknown_bucket_without_queue_is_invalid() {
    let config = silent_config();
    let payload = object_created_payload("elsewhere", "trailer.mp4");
    let processed = EventHandlerService::process_payload(None, &payload, config).await;

    assert_matches!(
        processed.result,
        Err(TriggerError::InvalidEvent(EventError::Stage(StageError::UnknownLocation(_))))
    );
}

#[tokio::test]
async fn unpublished_rejection_is_left_for_redelivery() {
    let mut alerts = MockAlertClient::new();
    alerts.expect_send_message().times(1).returning(|_| Err(AlertError::TopicARNInvalid));

    let config = TestConfigBuilder::new().configure_alerts(alerts).build();
    let processed =
        EventHandlerService::process_payload(Some(Stage::RawVideo), &payload_without_key(INTAKE_BUCKET), config.clone())
            .await;

    assert_eq!(processed.decision(), DeliveryDecision::AckAndAlert);
    assert_eq!(EventHandlerService::settle(&processed, "raw_video", &config).await, DeliveryDecision::Nack);
}
