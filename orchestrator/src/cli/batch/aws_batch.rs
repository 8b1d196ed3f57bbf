use clap::Args;

use crate::types::constant::{DEFAULT_OUTPUT_LANGUAGES, DEFAULT_SERVICE_REGION};

/// Parameters used to config the AWS Batch translate/dub job.
#[derive(Debug, Clone, Args)]
pub struct AWSBatchCliArgs {
    /// Use the AWS Batch client
    #[arg(long)]
    pub aws_batch: bool,

    /// The ARN / Name of the job queue.
    #[arg(env = "LOCALIZATION_AWS_BATCH_JOB_QUEUE", long)]
    pub batch_job_queue: Option<String>,

    /// The ARN / Name of the job definition running the dubbing container.
    #[arg(env = "LOCALIZATION_AWS_BATCH_JOB_DEFINITION", long)]
    pub batch_job_definition: Option<String>,

    /// Space separated target languages handed to the container.
    #[arg(env = "LOCALIZATION_OUTPUT_LANGUAGES", long, default_value = DEFAULT_OUTPUT_LANGUAGES)]
    pub output_languages: String,

    /// Region of the translation and speech services used by the container.
    #[arg(env = "LOCALIZATION_SERVICE_REGION", long, default_value = DEFAULT_SERVICE_REGION)]
    pub service_region: String,

    /// Prefix of the batch job names, followed by the job identity.
    #[arg(env = "LOCALIZATION_AWS_BATCH_JOB_NAME_PREFIX", long, default_value = "localize")]
    pub batch_job_name_prefix: String,
}
