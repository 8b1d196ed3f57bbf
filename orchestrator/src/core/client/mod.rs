// Client abstractions module - contains all client interface traits

pub mod alert;
pub mod batch;
pub mod build;
pub mod queue;
pub mod transcription;

// Re-export commonly used types
pub use alert::{sns::SNS, AlertClient};
pub use batch::{aws_batch::AWSBatch, BatchClient};
pub use build::{codebuild::CodeBuild, BuildClient};
pub use queue::{sqs::SQS, QueueClient};
pub use transcription::{transcribe::AWSTranscribe, TranscriptionClient};
