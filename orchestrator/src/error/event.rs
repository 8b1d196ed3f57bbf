use thiserror::Error;

use crate::error::ConsumptionError;
use crate::types::queue::QueueType;

/// Result type for the event workers
pub type EventSystemResult<T> = Result<T, EventSystemError>;

/// Errors that stop an event worker, as opposed to errors of a single event.
#[derive(Error, Debug)]
pub enum EventSystemError {
    #[error("Event Handler Already existing for Queue Type : {0:?}")]
    EventHandlerAlreadyExisting(QueueType),

    #[error("Mutex poisoned: {0}")]
    MutexPoisonError(String),

    #[error("Worker task failed to join: {0}")]
    JoinError(#[from] tokio::task::JoinError),

    #[error("ConsumptionError: {0}")]
    FromConsumptionError(#[from] ConsumptionError),
}
