pub mod consumer;
pub mod event;
pub mod trigger;

use thiserror::Error;

use crate::core::client::alert::AlertError;
use crate::core::client::queue::QueueError;
use crate::core::error::OrchestratorCoreError;
use crate::error::event::EventSystemError;
pub use consumer::ConsumptionError;
pub use trigger::{SubmissionError, TriggerError};

/// Result type for orchestrator operations
pub type OrchestratorResult<T> = Result<T, OrchestratorError>;

/// Error types for the orchestrator
#[derive(Error, Debug)]
pub enum OrchestratorError {
    #[error("Alert error: {0}")]
    AlertError(#[from] AlertError),

    #[error("Queue error: {0}")]
    QueueCoreError(#[from] QueueError),

    #[error("Orchestrator Core Error: {0}")]
    OrchestratorCoreError(#[from] OrchestratorCoreError),

    /// Setup Command error
    #[error("Setup Command Error: {0}")]
    SetupCommandError(String),

    /// Run Command error
    #[error("Run Command Error: {0}")]
    RunCommandError(String),

    #[error("Orchestrator Error: {0}")]
    OrchestratorAnyHowError(#[from] anyhow::Error),

    #[error("Trigger error: {0}")]
    TriggerError(#[from] TriggerError),

    #[error("ConsumptionError: {0}")]
    ConsumptionError(#[from] ConsumptionError),

    #[error("Event System Error: {0}")]
    EventSystemError(#[from] EventSystemError),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
