use clap::Args;

/// Parameters used to config AWS SQS.
#[derive(Debug, Clone, Args)]
pub struct AWSSQSCliArgs {
    /// Use the AWS sqs client
    #[arg(long)]
    pub aws_sqs: bool,

    /// The ARN / Name of the stage queues.
    /// ARN: arn:aws:sqs:region:accountID:name
    /// {} will be replaced by the queue type of each stage.
    /// i.e for the approved review queue : localization_approved_review_events
    #[arg(env = "LOCALIZATION_AWS_SQS_QUEUE_IDENTIFIER", long, default_value = Some("localization_{}_events"))]
    pub queue_identifier: Option<String>,
}
