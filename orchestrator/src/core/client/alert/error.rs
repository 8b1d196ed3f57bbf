use aws_sdk_sns::error::SdkError;
use aws_sdk_sns::operation::list_topics::ListTopicsError;
use aws_sdk_sns::operation::publish::PublishError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AlertError {
    #[error("Topic {0} not found")]
    TopicNotFound(String),

    #[error("Topic ARN is not parsable")]
    TopicARNInvalid,

    #[error("Failed to list topics: {0}")]
    ListTopicsError(#[from] SdkError<ListTopicsError>),

    #[error("Failed to publish message: {0}")]
    PublishError(#[from] SdkError<PublishError>),

    #[error("Failed to encode notification: {0}")]
    MessageEncoding(#[from] serde_json::Error),
}
