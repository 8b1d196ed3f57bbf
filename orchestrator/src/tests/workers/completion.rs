use assert_matches::assert_matches;

use crate::core::client::alert::MockAlertClient;
use crate::core::client::batch::MockBatchClient;
use crate::core::client::transcription::MockTranscriptionClient;
use crate::pipeline::Stage;
use crate::tests::common::{object_created_payload, FINAL_OUTPUT_BUCKET};
use crate::tests::config::TestConfigBuilder;
use crate::tests::workers::notification_of;
use crate::types::notification::PipelineNotification;
use crate::worker::event_handler::service::{DeliveryDecision, EventHandlerService, EventOutcome};
use crate::worker::event_handler::triggers::TriggerOutcome;

#[tokio::test]
async fn localized_video_notifies_completion_only() {
    let mut alerts = MockAlertClient::new();
    alerts
        .expect_send_message()
        .times(1)
        .withf(|message| {
            notification_of(message)
                == PipelineNotification::LocalizationCompleted {
                    bucket: FINAL_OUTPUT_BUCKET.to_string(),
                    key: "es/trailer.mp4".to_string(),
                }
        })
        .returning(|_| Ok(()));
    let mut transcription = MockTranscriptionClient::new();
    transcription.expect_start_transcription_job().never();
    let mut batch = MockBatchClient::new();
    batch.expect_submit_job().never();

    let config = TestConfigBuilder::new()
        .configure_alerts(alerts)
        .configure_transcription_client(transcription)
        .configure_batch_client(batch)
        .build();

    let processed = EventHandlerService::process_payload(
        Some(Stage::FinalVideo),
        &object_created_payload(FINAL_OUTPUT_BUCKET, "es/trailer.mp4"),
        config,
    )
    .await;

    assert_matches!(
        processed.result,
        Ok(EventOutcome::Handled { stage: Stage::FinalVideo, outcome: TriggerOutcome::CompletionNotified })
    );
    assert_eq!(processed.decision(), DeliveryDecision::Ack);
}
