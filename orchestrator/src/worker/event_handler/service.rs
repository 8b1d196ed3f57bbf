//! Routing of delivered storage notifications to the trigger of their stage, and the acknowledgement
//! decision derived from the trigger's result.

use std::sync::Arc;

use tracing::{debug, error, warn, Span};

use crate::core::client::alert::{publish_notification, AlertError};
use crate::core::config::Config;
use crate::error::TriggerError;
use crate::pipeline::stage::{self, StageError};
use crate::pipeline::{BucketLayout, Stage, StageInfo};
use crate::types::event::{EventError, StorageEvent, StorageNotification};
use crate::types::notification::PipelineNotification;
use crate::worker::event_handler::factory::get_stage_trigger;
use crate::worker::event_handler::triggers::TriggerOutcome;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    Handled { stage: Stage, outcome: TriggerOutcome },
    /// Nothing to do for this event. Not an error.
    Skipped { reason: String },
}

/// What happens to the delivery once its event was processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryDecision {
    Ack,
    /// The event can never succeed. Reported on the topic, then removed from the queue.
    AckAndAlert,
    /// Left for the queue's redelivery policy.
    Nack,
}

/// One processed delivery: the event, when one could be read from the payload, and the result.
#[derive(Debug)]
pub struct ProcessedEvent {
    pub event: Option<StorageEvent>,
    pub result: Result<EventOutcome, TriggerError>,
}

impl ProcessedEvent {
    /// Bucket of the event, or the one read before the payload was rejected.
    pub fn bucket(&self) -> Option<&str> {
        match (&self.event, &self.result) {
            (Some(event), _) => Some(event.bucket.as_str()),
            (None, Err(TriggerError::InvalidEvent(e))) => e.bucket(),
            (None, _) => None,
        }
    }

    pub fn decision(&self) -> DeliveryDecision {
        match &self.result {
            Ok(_) => DeliveryDecision::Ack,
            Err(e) if e.is_retryable() => DeliveryDecision::Nack,
            Err(_) => DeliveryDecision::AckAndAlert,
        }
    }
}

pub struct EventHandlerService;

impl EventHandlerService {
    /// Parse a raw notification payload and run it through its stage trigger.
    ///
    /// `queue` is the stage of the queue the payload was delivered on. Without it the stage is derived from
    /// the bucket of the event.
    pub async fn process_payload(queue: Option<Stage>, payload: &[u8], config: Arc<Config>) -> ProcessedEvent {
        let event = match StorageNotification::parse(payload) {
            Ok(StorageNotification::Record(event)) => event,
            Ok(StorageNotification::Test { bucket }) => {
                debug!(bucket = ?bucket, "Ignoring storage test event");
                return ProcessedEvent {
                    event: None,
                    result: Ok(EventOutcome::Skipped { reason: "storage test event".to_string() }),
                };
            }
            Err(e) => return ProcessedEvent { event: None, result: Err(e.into()) },
        };

        let result = Self::handle_event(queue, &event, config).await;
        ProcessedEvent { event: Some(event), result }
    }

    pub async fn handle_event(
        queue: Option<Stage>,
        event: &StorageEvent,
        config: Arc<Config>,
    ) -> Result<EventOutcome, TriggerError> {
        let span = Span::current();
        span.record("bucket", event.bucket.as_str());
        span.record("key", event.key.as_str());

        if !event.is_object_created() {
            debug!(event_name = ?event.event_name, "Ignoring event other than object creation");
            return Ok(EventOutcome::Skipped {
                reason: format!("event {} is not an object creation", event.event_name.as_deref().unwrap_or_default()),
            });
        }

        let info = match Self::route(queue, event, config.layout()) {
            Ok(info) => info,
            Err(e @ StageError::UnexpectedArtifact { .. }) => {
                debug!(error = %e, "Skipping object that is not an artifact of the stage");
                return Ok(EventOutcome::Skipped { reason: e.to_string() });
            }
            Err(e) => return Err(EventError::from(e).into()),
        };

        let trigger = get_stage_trigger(info.stage);
        let outcome = trigger.handle(&info, config).await?;
        Ok(EventOutcome::Handled { stage: info.stage, outcome })
    }

    /// Stage of an event. The queue wins over the bucket when both are known.
    pub fn route(queue: Option<Stage>, event: &StorageEvent, layout: &BucketLayout) -> Result<StageInfo, StageError> {
        match queue {
            Some(queue_stage) => {
                if layout.bucket_for(queue_stage) != event.bucket {
                    warn!(
                        stage = %queue_stage,
                        bucket = %event.bucket,
                        expected_bucket = %layout.bucket_for(queue_stage),
                        "Event bucket does not match the bucket of its queue"
                    );
                }
                StageInfo::for_stage(queue_stage, &event.bucket, &event.key)
            }
            None => stage::stage(layout, &event.bucket, &event.key),
        }
    }

    /// Log the result and publish the rejection alert when the event can never succeed.
    ///
    /// Returns the final decision. A rejection that cannot be published turns into a `Nack` so the alert
    /// is attempted again on redelivery.
    pub async fn settle(processed: &ProcessedEvent, source: &str, config: &Config) -> DeliveryDecision {
        let bucket = processed.bucket();
        let key = processed.event.as_ref().map(|e| e.key.as_str());

        let error = match &processed.result {
            Ok(outcome) => {
                debug!(source = %source, outcome = ?outcome, "Event processed");
                return DeliveryDecision::Ack;
            }
            Err(e) => e,
        };

        match processed.decision() {
            DeliveryDecision::Nack => {
                error!(
                    source = %source,
                    bucket = ?bucket,
                    key = ?key,
                    error = %error,
                    "Submission failed, leaving event for redelivery"
                );
                DeliveryDecision::Nack
            }
            decision => {
                error!(source = %source, bucket = ?bucket, key = ?key, error = %error, "Rejecting event");
                match Self::publish_rejection(processed, error, source, config).await {
                    Ok(()) => decision,
                    Err(alert_error) => {
                        error!(
                            source = %source,
                            error = %alert_error,
                            "Failed to publish rejection, leaving event for redelivery"
                        );
                        DeliveryDecision::Nack
                    }
                }
            }
        }
    }

    async fn publish_rejection(
        processed: &ProcessedEvent,
        error: &TriggerError,
        source: &str,
        config: &Config,
    ) -> Result<(), AlertError> {
        let notification = PipelineNotification::ItemRejected {
            queue: source.to_string(),
            bucket: processed.bucket().map(str::to_string),
            key: processed.event.as_ref().map(|e| e.key.clone()),
            reason: error.to_string(),
        };
        publish_notification(config.alerts(), &notification).await
    }
}
