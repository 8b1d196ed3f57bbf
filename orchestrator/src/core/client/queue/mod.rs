pub mod error;
pub mod sqs;

use async_trait::async_trait;
pub use error::QueueError;
use omniqueue::Delivery;

use crate::types::queue::QueueType;

/// Trait defining queue operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QueueClient: Send + Sync {
    /// Receive one message from the stage queue. Returns `omniqueue::QueueError::NoData` (wrapped) when the
    /// wait elapses without a message.
    async fn consume_message_from_queue(&self, queue: QueueType) -> Result<Delivery, QueueError>;

    /// Resolved name of the stage queue.
    fn queue_name(&self, queue: QueueType) -> String;
}
