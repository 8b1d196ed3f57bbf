use clap::Args;
use serde::Serialize;

/// Parameters used to config AWS.
#[derive(Debug, Clone, Args, Serialize)]
pub struct AWSConfigCliArgs {
    /// Use this flag to enable AWS provider.
    #[arg(long)]
    pub aws: bool,

    /// The prefix value.
    /// Added to the start of each resource name given as a plain name.
    #[arg(env = "LOCALIZATION_AWS_PREFIX", long, default_value = None)]
    pub aws_prefix: Option<String>,
}
