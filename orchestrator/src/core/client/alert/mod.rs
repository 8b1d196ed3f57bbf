pub mod error;
pub(crate) mod sns;

use async_trait::async_trait;

pub use error::AlertError;

use crate::types::notification::PipelineNotification;

/// AlertClient trait
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AlertClient: Send + Sync {
    /// send_message sends a message to the alert client.
    ///
    /// # Arguments
    ///
    /// * `message_body` - The message body to send.
    async fn send_message(&self, message_body: String) -> Result<(), AlertError>;
}

/// Serialise a pipeline notification and publish it.
pub async fn publish_notification(
    alerts: &dyn AlertClient,
    notification: &PipelineNotification,
) -> Result<(), AlertError> {
    let message = notification.to_message()?;
    alerts.send_message(message).await
}
