pub mod controller;
pub mod event_handler;

use std::path::Path;
use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, info_span, Instrument};
use uuid::Uuid;

use crate::core::config::Config;
use crate::error::event::EventSystemResult;
use crate::pipeline::Stage;
use crate::worker::controller::worker_controller::WorkerController;
use crate::worker::event_handler::service::{EventHandlerService, EventOutcome};
use crate::OrchestratorResult;

/// Source name used in rejection alerts of replayed events.
pub const REPLAY_SOURCE: &str = "replay";

/// Starts one worker per stage queue in the background.
///
/// Returns the controller, to signal shutdown, and the handle of the background task, which resolves once
/// every worker drained its in-flight events. A worker failure cancels `shutdown_token`.
pub fn initialize_worker(
    config: Arc<Config>,
    shutdown_token: CancellationToken,
) -> (WorkerController, JoinHandle<EventSystemResult<()>>) {
    info!("Initializing stage queue workers");

    let controller = WorkerController::new(config, shutdown_token.clone());
    let runner = controller.clone();
    let handle = tokio::spawn(async move {
        let result = runner.run().await;
        if let Err(e) = &result {
            error!(error = %e, "Stage queue workers stopped with an error");
            shutdown_token.cancel();
        }
        result
    });

    info!("Workers initialized and started successfully");
    (controller, handle)
}

/// Runs one stored storage notification through the same routing and trigger as the service.
///
/// Rejections are published like in the service. Any trigger error is returned.
pub async fn replay_event(
    config: Arc<Config>,
    queue: Option<Stage>,
    event_file: &Path,
) -> OrchestratorResult<EventOutcome> {
    let payload = tokio::fs::read(event_file).await?;
    let span = info_span!(
        "storage_event",
        queue = REPLAY_SOURCE,
        stage = ?queue,
        correlation_id = %Uuid::new_v4(),
        bucket = tracing::field::Empty,
        key = tracing::field::Empty,
        job_identity = tracing::field::Empty
    );

    async move {
        let processed = EventHandlerService::process_payload(queue, &payload, config.clone()).await;
        let decision = EventHandlerService::settle(&processed, REPLAY_SOURCE, &config).await;
        info!(decision = ?decision, "Replay finished");
        Ok(processed.result?)
    }
    .instrument(span)
    .await
}
