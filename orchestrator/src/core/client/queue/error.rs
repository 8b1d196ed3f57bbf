use aws_sdk_sqs::error::SdkError;
use aws_sdk_sqs::operation::get_queue_url::GetQueueUrlError;
use aws_sdk_sqs::operation::receive_message::ReceiveMessageError;
use omniqueue::QueueError as OmniQueueError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueueError {
    #[error("Failed to get queue url: {0}")]
    GetQueueUrlError(#[from] SdkError<GetQueueUrlError>),

    #[error("Failed to receive message: {0}")]
    ReceiveMessageError(#[from] SdkError<ReceiveMessageError>),

    #[error("Queue backend error: {0}")]
    ErrorFromQueueError(#[from] OmniQueueError),

    #[error("Failed to get queue url for queue name : {0}")]
    FailedToGetQueueUrl(String),

    #[error("Invalid queue ARN: {0}")]
    InvalidArn(String),
}

impl QueueError {
    /// True when the receive call simply found no message.
    pub fn is_no_data(&self) -> bool {
        matches!(self, QueueError::ErrorFromQueueError(OmniQueueError::NoData))
    }
}
