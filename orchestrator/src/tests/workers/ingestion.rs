use assert_matches::assert_matches;
use rstest::rstest;
use tracing::Instrument;
use tracing_subscriber::prelude::*;

use crate::core::client::alert::MockAlertClient;
use crate::core::client::batch::MockBatchClient;
use crate::core::client::transcription::{MockTranscriptionClient, TranscriptionError, TranscriptionSubmission};
use crate::error::TriggerError;
use crate::pipeline::Stage;
use crate::tests::common::{
    is_transcript_key_for, object_created_payload, SpanFieldRecorder, INTAKE_BUCKET, PENDING_REVIEW_BUCKET,
};
use crate::tests::config::TestConfigBuilder;
use crate::worker::event_handler::service::{DeliveryDecision, EventHandlerService, EventOutcome};
use crate::worker::event_handler::triggers::TriggerOutcome;

#[rstest]
#[case("trailer.mp4", "trailer.mp4")]
#[case("my_summer_trailer.mp4", "my_summer_trailer.mp4")]
#[case("uploads/2024/my+trailer.mp4", "uploads/2024/my trailer.mp4")]
#[tokio::test]
async fn raw_video_starts_one_transcription_job(#[case] encoded_key: &str, #[case] video_key: &str) {
    let expected_source = format!("s3://{INTAKE_BUCKET}/{video_key}");
    let expected_video_key = video_key.to_string();

    let mut transcription = MockTranscriptionClient::new();
    transcription
        .expect_start_transcription_job()
        .times(1)
        .withf(move |request| {
            request.source_uri == expected_source
                && request.output_bucket == PENDING_REVIEW_BUCKET
                && is_transcript_key_for(&request.output_key, &expected_video_key)
                && request.media_format == "mp4"
                && request.language_code == "en-US"
                && request.job_name.starts_with("transcribe-")
        })
        .returning(|request| {
            Ok(TranscriptionSubmission { job_name: request.job_name.clone(), status: Some("IN_PROGRESS".to_string()) })
        });
    let mut batch = MockBatchClient::new();
    batch.expect_submit_job().never();
    let mut alerts = MockAlertClient::new();
    alerts.expect_send_message().never();

    let config = TestConfigBuilder::new()
        .configure_transcription_client(transcription)
        .configure_batch_client(batch)
        .configure_alerts(alerts)
        .build();

    let payload = object_created_payload(INTAKE_BUCKET, encoded_key);
    let processed = EventHandlerService::process_payload(Some(Stage::RawVideo), &payload, config).await;

    assert_matches!(
        processed.result,
        Ok(EventOutcome::Handled {
            stage: Stage::RawVideo,
            outcome: TriggerOutcome::TranscriptionSubmitted { ref status, .. }
        }) if status.as_deref() == Some("IN_PROGRESS")
    );
    assert_eq!(processed.decision(), DeliveryDecision::Ack);
}

#[tokio::test]
async fn scenario_trailer_output_key_encodes_a_fresh_identity() {
    let mut transcription = MockTranscriptionClient::new();
    transcription
        .expect_start_transcription_job()
        .times(1)
        .withf(|request| {
            let identity = request.output_key.strip_suffix("_trailer.mp4.json");
            request.source_uri == "s3://intake/trailer.mp4"
                && identity.is_some_and(|id| id.len() == 32 && id.chars().all(|c| c.is_ascii_hexdigit()))
        })
        .returning(|request| Ok(TranscriptionSubmission { job_name: request.job_name.clone(), status: None }));

    let config = TestConfigBuilder::new().configure_transcription_client(transcription).build();
    let processed =
        EventHandlerService::process_payload(Some(Stage::RawVideo), &object_created_payload("intake", "trailer.mp4"), config)
            .await;

    assert!(processed.result.is_ok());
}

#[tokio::test]
async fn every_upload_gets_its_own_identity() {
    let seen = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
    let recorder = seen.clone();

    let mut transcription = MockTranscriptionClient::new();
    transcription.expect_start_transcription_job().times(2).returning(move |request| {
        recorder.lock().unwrap().push(request.output_key.clone());
        Ok(TranscriptionSubmission { job_name: request.job_name.clone(), status: None })
    });

    let config = TestConfigBuilder::new().configure_transcription_client(transcription).build();
    let payload = object_created_payload(INTAKE_BUCKET, "trailer.mp4");
    for _ in 0..2 {
        let processed = EventHandlerService::process_payload(Some(Stage::RawVideo), &payload, config.clone()).await;
        assert!(processed.result.is_ok());
    }

    let keys = seen.lock().unwrap();
    assert_eq!(keys.len(), 2);
    assert_ne!(keys[0], keys[1]);
}

#[tokio::test]
async fn transcription_failure_is_left_for_redelivery() {
    let mut transcription = MockTranscriptionClient::new();
    transcription
        .expect_start_transcription_job()
        .times(1)
        .returning(|request| Err(TranscriptionError::MissingJob(request.job_name.clone())));
    let mut alerts = MockAlertClient::new();
    alerts.expect_send_message().never();

    let config = TestConfigBuilder::new().configure_transcription_client(transcription).configure_alerts(alerts).build();
    let processed = EventHandlerService::process_payload(
        Some(Stage::RawVideo),
        &object_created_payload(INTAKE_BUCKET, "trailer.mp4"),
        config.clone(),
    )
    .await;

    assert_matches!(processed.result, Err(TriggerError::Submission(_)));
    assert_eq!(processed.decision(), DeliveryDecision::Nack);
    assert_eq!(EventHandlerService::settle(&processed, "raw_video", &config).await, DeliveryDecision::Nack);
}

#[tokio::test]
async fn failed_transcription_keeps_the_minted_identity_on_the_event_span() {
    let recorder = SpanFieldRecorder::new("job_identity");
    let _guard = tracing::subscriber::set_default(tracing_subscriber::registry().with(recorder.clone()));

    let output_keys = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
    let seen = output_keys.clone();
    let mut transcription = MockTranscriptionClient::new();
    transcription.expect_start_transcription_job().times(1).returning(move |request| {
        seen.lock().unwrap().push(request.output_key.clone());
        Err(TranscriptionError::MissingJob(request.job_name.clone()))
    });
    let config = TestConfigBuilder::new().configure_transcription_client(transcription).build();

    let span = tracing::info_span!("storage_event", job_identity = tracing::field::Empty);
    let processed = EventHandlerService::process_payload(
        Some(Stage::RawVideo),
        &object_created_payload(INTAKE_BUCKET, "trailer.mp4"),
        config,
    )
    .instrument(span)
    .await;

    assert_matches!(processed.result, Err(TriggerError::Submission(_)));
    let identities = recorder.values();
    assert_eq!(identities.len(), 1);
    assert_eq!(output_keys.lock().unwrap().clone(), vec![format!("{}_trailer.mp4.json", identities[0])]);
}
