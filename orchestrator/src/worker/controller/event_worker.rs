use std::sync::Arc;
use std::time::Duration;

use omniqueue::Delivery;
use tokio::task::JoinSet;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn, Instrument, Span};
use uuid::Uuid;

use crate::core::config::Config;
use crate::error::event::EventSystemResult;
use crate::error::ConsumptionError;
use crate::types::queue::QueueType;
use crate::worker::event_handler::service::{DeliveryDecision, EventHandlerService, ProcessedEvent};

#[derive(Clone)]
pub struct EventWorker {
    config: Arc<Config>,
    queue_type: QueueType,
    cancellation_token: CancellationToken,
}

const QUEUE_NO_MESSAGE_SLEEP_DURATION: Duration = Duration::from_millis(1000);
const QUEUE_ERROR_SLEEP_DURATION: Duration = Duration::from_secs(1);

impl EventWorker {
    /// new - Create a new EventWorker for one stage queue
    /// # Arguments
    /// * `queue_type` - The stage queue to consume
    /// * `config` - The configuration for the EventWorker
    /// * `cancellation_token` - Token for coordinated shutdown
    pub fn new(queue_type: QueueType, config: Arc<Config>, cancellation_token: CancellationToken) -> Self {
        Self { config, queue_type, cancellation_token }
    }

    pub fn queue_type(&self) -> QueueType {
        self.queue_type
    }

    /// Triggers a graceful shutdown
    pub async fn shutdown(&self) -> EventSystemResult<()> {
        info!("Triggering shutdown for {} worker", self.queue_type);
        self.cancellation_token.cancel();
        Ok(())
    }

    /// Check if shutdown has been requested (non-blocking)
    pub fn is_shutdown_requested(&self) -> bool {
        self.cancellation_token.is_cancelled()
    }

    /// One span per delivered event. `bucket` and `key` are recorded once the payload is parsed, `job_identity`
    /// once the trigger minted or decoded it.
    fn create_event_span(&self) -> Span {
        let correlation_id = Uuid::new_v4();
        tracing::info_span!(
            "storage_event",
            queue = %self.queue_type,
            stage = %self.queue_type.stage(),
            correlation_id = %correlation_id,
            bucket = tracing::field::Empty,
            key = tracing::field::Empty,
            job_identity = tracing::field::Empty
        )
    }

    /// get_message - Wait for the next message of the queue
    /// Returns `None` when the queue's wait time elapsed without a message
    pub async fn get_message(&self) -> EventSystemResult<Option<Delivery>> {
        match self.config.queue().consume_message_from_queue(self.queue_type).await {
            Ok(delivery) => Ok(Some(delivery)),
            Err(e) if e.is_no_data() => Ok(None),
            Err(e) => {
                error!(queue = %self.queue_type, error = %e, "Failed to consume message from queue");
                Err(ConsumptionError::FailedToConsumeFromQueue { error_msg: e.to_string() }.into())
            }
        }
    }

    /// post_processing - Acknowledge or negatively acknowledge the message
    /// # Arguments
    /// * `message` - The delivery to settle
    /// * `processed` - The processed event
    /// * `decision` - The settled decision for the delivery
    /// # Errors
    /// * Returns an EventSystemError when the message is left for redelivery or cannot be acknowledged
    async fn post_processing(
        &self,
        message: Delivery,
        processed: &ProcessedEvent,
        decision: DeliveryDecision,
    ) -> EventSystemResult<()> {
        match decision {
            DeliveryDecision::Ack | DeliveryDecision::AckAndAlert => {
                message.ack().await.map_err(|e| ConsumptionError::FailedToAcknowledgeMessage(e.0.to_string()))?;
                Ok(())
            }
            DeliveryDecision::Nack => {
                message.nack().await.map_err(|e| ConsumptionError::FailedToAcknowledgeMessage(e.0.to_string()))?;
                let error_msg = match &processed.result {
                    Err(e) => e.to_string(),
                    Ok(_) => "rejection could not be published".to_string(),
                };
                Err(ConsumptionError::FailedToHandleEvent { queue: self.queue_type, error_msg }.into())
            }
        }
    }

    /// process_message - Run the message through its stage trigger and settle the delivery
    async fn process_message(&self, message: Delivery) -> EventSystemResult<()> {
        let span = self.create_event_span();
        async move {
            let payload = message.borrow_payload().unwrap_or_default();
            let processed =
                EventHandlerService::process_payload(Some(self.queue_type.stage()), payload, self.config.clone())
                    .await;
            let decision = EventHandlerService::settle(&processed, &self.queue_type.to_string(), &self.config).await;
            self.post_processing(message, &processed, decision).await
        }
        .instrument(span)
        .await
    }

    /// run - Consume the queue until shutdown
    /// Up to `max_concurrent_events` messages are processed at once. In-flight messages are drained before
    /// returning.
    pub async fn run(&self) -> EventSystemResult<()> {
        let mut tasks = JoinSet::new();
        let max_concurrent_tasks = self.config.service_params().max_concurrent_events;
        info!("Starting {} worker (pool_size={})", self.queue_type, max_concurrent_tasks);

        loop {
            if self.is_shutdown_requested() {
                info!("Shutdown requested, stopping message processing");
                break;
            }

            tokio::select! {
                biased;

                Some(result) = tasks.join_next(), if !tasks.is_empty() => {
                    Self::handle_task_result(result);

                    if tasks.len() >= max_concurrent_tasks {
                        warn!("Backpressure activated - waiting for tasks to complete. Active: {}", tasks.len());
                    }
                }

                _ = self.cancellation_token.cancelled() => {
                    info!("Shutdown signal received, breaking from main loop");
                    break;
                }

                message_result = self.get_message(), if tasks.len() < max_concurrent_tasks => {
                    match message_result {
                        Ok(Some(message)) => {
                            debug!(queue = %self.queue_type, "Received message from queue");
                            let worker = self.clone();
                            tasks.spawn(async move { worker.process_message(message).await });
                        }
                        Ok(None) => sleep(QUEUE_NO_MESSAGE_SLEEP_DURATION).await,
                        Err(e) => {
                            error!("Error receiving message: {:?}", e);
                            sleep(QUEUE_ERROR_SLEEP_DURATION).await;
                        }
                    }
                }
            }
        }

        info!("Waiting for {} remaining tasks to complete", tasks.len());
        while let Some(result) = tasks.join_next().await {
            Self::handle_task_result(result);
        }
        info!("All tasks completed, worker shutdown complete");

        Ok(())
    }

    fn handle_task_result(result: Result<EventSystemResult<()>, tokio::task::JoinError>) {
        match result {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => {
                error!("Task failed with application error: {:?}", e);
            }
            Err(e) => {
                error!("Task panicked or was cancelled: {:?}", e);
            }
        }
    }
}
