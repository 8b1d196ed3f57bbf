use clap::Args;

/// Parameters used to config AWS SNS.
#[derive(Debug, Clone, Args)]
pub struct AWSSNSCliArgs {
    /// Use the AWS SNS client
    #[arg(long)]
    pub aws_sns: bool,

    /// The ARN / Name of the pipeline notification topic.
    /// ARN: arn:aws:sns:region:accountID:name
    #[arg(env = "LOCALIZATION_AWS_SNS_TOPIC_IDENTIFIER", long, default_value = Some("localization_notifications"))]
    pub topic_identifier: Option<String>,
}
