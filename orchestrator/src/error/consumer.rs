use thiserror::Error;

use crate::types::queue::QueueType;

#[derive(Error, Debug)]
pub enum ConsumptionError {
    #[error("Failed to consume message from queue, error {error_msg:?}")]
    FailedToConsumeFromQueue { error_msg: String },

    #[error("Failed to acknowledge message: {0}")]
    FailedToAcknowledgeMessage(String),

    #[error("Failed to handle event from {queue} queue. Error: {error_msg:?}")]
    FailedToHandleEvent { queue: QueueType, error_msg: String },
}
