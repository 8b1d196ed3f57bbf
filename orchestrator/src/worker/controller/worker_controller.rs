use std::sync::{Arc, Mutex};

use futures::future::try_join_all;
use strum::IntoEnumIterator;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, info_span, warn, Instrument};

use crate::core::config::Config;
use crate::error::event::{EventSystemError, EventSystemResult};
use crate::types::queue::QueueType;
use crate::worker::controller::event_worker::EventWorker;

/// Runs one [`EventWorker`] per stage queue.
#[derive(Clone)]
pub struct WorkerController {
    config: Arc<Config>,
    workers: Arc<Mutex<Vec<Arc<EventWorker>>>>,
    cancellation_token: CancellationToken,
}

impl WorkerController {
    pub fn new(config: Arc<Config>, cancellation_token: CancellationToken) -> Self {
        Self { config, workers: Arc::new(Mutex::new(Vec::new())), cancellation_token }
    }

    pub fn workers(&self) -> EventSystemResult<Vec<Arc<EventWorker>>> {
        let workers = self.workers.lock().map_err(|e| EventSystemError::MutexPoisonError(e.to_string()))?;
        Ok(workers.clone())
    }

    /// run - Spawn a worker for every stage queue and wait for all of them
    /// Returns once every worker stopped after shutdown, or with the first worker error
    pub async fn run(&self) -> EventSystemResult<()> {
        let mut worker_set = tokio::task::JoinSet::new();
        for queue_type in QueueType::iter() {
            let self_clone = self.clone();
            worker_set.spawn(async move { self_clone.create_span(queue_type).await });
        }
        while let Some(result) = worker_set.join_next().await {
            result??;
        }
        Ok(())
    }

    fn create_event_handler(&self, queue_type: QueueType) -> EventSystemResult<Arc<EventWorker>> {
        let worker_token = self.cancellation_token.child_token();
        let worker = Arc::new(EventWorker::new(queue_type, self.config.clone(), worker_token));

        let mut workers = self.workers.lock().map_err(|e| EventSystemError::MutexPoisonError(e.to_string()))?;
        if workers.iter().any(|existing| existing.queue_type() == queue_type) {
            return Err(EventSystemError::EventHandlerAlreadyExisting(queue_type));
        }
        workers.push(worker.clone());

        Ok(worker)
    }

    /// Run the worker of `q` inside its own span. Returns on graceful shutdown or on a worker error.
    async fn create_span(&self, q: QueueType) -> EventSystemResult<()> {
        let span = info_span!("worker", q = %q);

        async move {
            let handler = match self.create_event_handler(q) {
                Ok(handler) => handler,
                Err(e) => {
                    error!("Failed to create handler for queue type {:?}: {:?}", q, e);
                    return Err(e);
                }
            };

            match handler.run().await {
                Ok(_) => {
                    warn!("Worker for queue type {:?} completed (expected only during shutdown)", q);
                    Ok(())
                }
                Err(e) => {
                    error!("Worker for queue type {:?} failed: {:?}", q, e);
                    Err(e)
                }
            }
        }
        .instrument(span)
        .await
    }

    /// shutdown - Signal every worker to stop taking messages
    /// Workers finish their in-flight events before `run` returns
    pub async fn shutdown(&self) -> EventSystemResult<()> {
        info!("Initiating WorkerController graceful shutdown");

        let workers = self.workers()?;
        info!("Signaling {} workers to shutdown gracefully", workers.len());

        let futures: Vec<_> = workers.iter().map(|worker| worker.shutdown()).collect();
        try_join_all(futures).await?;
        info!("WorkerController shutdown completed");
        Ok(())
    }
}
