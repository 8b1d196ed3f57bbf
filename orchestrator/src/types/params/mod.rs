pub mod cloud_provider;
pub mod service;

use std::fmt;

use crate::cli::{BootstrapCmd, RunCmd};
use crate::pipeline::BucketLayout;
use crate::OrchestratorError;
pub use service::ServiceParams;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ARN {
    pub partition: String,  // Usually "aws" (e.g., "aws-us-gov", "aws-cn")
    pub service: String,    // AWS service (e.g., "s3", "sns", "sqs", "batch")
    pub region: String,     // Empty for global services such as S3
    pub account_id: String, // Empty for some resources
    pub resource: String,   // Resource identifier (e.g., "topic-name", "bucket-name", "job-queue/name")
}

impl ARN {
    /// Parse an ARN string into its components
    /// Format: arn:partition:service:region:account-id:resource
    pub fn parse(arn_str: &str) -> Result<Self, &'static str> {
        if arn_str.trim().is_empty() {
            return Err("ARN string cannot be empty");
        }

        let parts: Vec<&str> = arn_str.splitn(6, ':').collect();

        if parts.len() != 6 || parts[0] != "arn" {
            return Err("Invalid ARN format");
        }
        if parts[1].is_empty() {
            return Err("Partition cannot be empty");
        }
        if parts[2].is_empty() {
            return Err("Service cannot be empty");
        }
        if parts[5].is_empty() {
            return Err("Resource cannot be empty");
        }

        Ok(ARN {
            partition: parts[1].to_string(),
            service: parts[2].to_string(),
            region: parts[3].to_string(),
            account_id: parts[4].to_string(),
            resource: parts[5].to_string(),
        })
    }
}

impl fmt::Display for ARN {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "arn:{}:{}:{}:{}:{}", self.partition, self.service, self.region, self.account_id, self.resource)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AWSResourceIdentifier {
    ARN(ARN),
    Name(String),
}

impl AWSResourceIdentifier {
    /// An ARN is taken as is. A plain name gets `<prefix><separator>` in front when a non-empty prefix is set.
    pub fn from_cli(identifier: &str, prefix: Option<&str>, separator: &str) -> Self {
        match ARN::parse(identifier) {
            Ok(arn) => AWSResourceIdentifier::ARN(arn),
            Err(_) => AWSResourceIdentifier::Name(match prefix {
                Some(prefix) if !prefix.is_empty() => format!("{}{}{}", prefix, separator, identifier),
                _ => identifier.to_string(),
            }),
        }
    }

    /// The bare resource name, whichever way the resource was identified.
    pub fn resource_name(&self) -> &str {
        match self {
            AWSResourceIdentifier::ARN(arn) => &arn.resource,
            AWSResourceIdentifier::Name(name) => name,
        }
    }
}

impl fmt::Display for AWSResourceIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AWSResourceIdentifier::ARN(arn) => write!(f, "{}", arn),
            AWSResourceIdentifier::Name(name) => f.write_str(name),
        }
    }
}

/// StorageArgs - The four pipeline locations
#[derive(Debug, Clone)]
pub struct StorageArgs {
    pub layout: BucketLayout,
}

impl StorageArgs {
    pub const PREFIX_SEPARATOR: &'static str = "-";
}

/// QueueArgs - Template identifier of the stage queues
#[derive(Debug, Clone)]
pub struct QueueArgs {
    pub queue_template_identifier: AWSResourceIdentifier,
    /// Long-poll wait of each receive call, in seconds
    pub wait_time_seconds: i32,
}

impl QueueArgs {
    pub const PREFIX_SEPARATOR: &'static str = "_";
}

/// AlertArgs - Topic receiving pipeline notifications
#[derive(Debug, Clone)]
pub struct AlertArgs {
    pub alert_identifier: AWSResourceIdentifier,
}

impl AlertArgs {
    pub const PREFIX_SEPARATOR: &'static str = "_";
}

/// TranscriptionArgs - Fixed parameters of every transcription job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptionArgs {
    pub media_format: String,
    pub language_code: String,
    pub job_name_prefix: String,
}

/// BatchArgs - Fixed parameters of every dubbing job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchArgs {
    pub job_queue: String,
    pub job_definition: String,
    pub output_languages: String,
    pub region: String,
    pub job_name_prefix: String,
}

/// BuildArgs - The container-image build project
#[derive(Debug, Clone)]
pub struct BuildArgs {
    pub project_identifier: AWSResourceIdentifier,
}

fn required(value: Option<&String>, what: &str) -> Result<String, OrchestratorError> {
    value
        .filter(|v| !v.trim().is_empty())
        .cloned()
        .ok_or_else(|| OrchestratorError::RunCommandError(format!("Missing {}", what)))
}

fn bucket_name(identifier: Option<&String>, prefix: Option<&str>, what: &str) -> Result<String, OrchestratorError> {
    let identifier = required(identifier, what)?;
    Ok(AWSResourceIdentifier::from_cli(&identifier, prefix, StorageArgs::PREFIX_SEPARATOR).resource_name().to_string())
}

impl TryFrom<RunCmd> for StorageArgs {
    type Error = OrchestratorError;
    fn try_from(run_cmd: RunCmd) -> Result<Self, Self::Error> {
        let prefix = run_cmd.aws_config_args.aws_prefix.as_deref();
        let s3 = &run_cmd.aws_s3_args;
        let layout = BucketLayout {
            intake: bucket_name(s3.intake_bucket.as_ref(), prefix, "intake bucket")?,
            pending_review: bucket_name(s3.pending_review_bucket.as_ref(), prefix, "pending review bucket")?,
            approved_review: bucket_name(s3.approved_review_bucket.as_ref(), prefix, "approved review bucket")?,
            final_output: bucket_name(s3.final_output_bucket.as_ref(), prefix, "final output bucket")?,
        };

        let names = [&layout.intake, &layout.pending_review, &layout.approved_review, &layout.final_output];
        for (i, name) in names.iter().enumerate() {
            if names[i + 1..].contains(name) {
                return Err(OrchestratorError::RunCommandError(format!(
                    "Bucket {} is configured for more than one pipeline location",
                    name
                )));
            }
        }

        Ok(Self { layout })
    }
}

impl TryFrom<RunCmd> for QueueArgs {
    type Error = OrchestratorError;
    fn try_from(run_cmd: RunCmd) -> Result<Self, Self::Error> {
        let queue_identifier = required(run_cmd.aws_sqs_args.queue_identifier.as_ref(), "queue template name")?;
        if !queue_identifier.contains("{}") {
            return Err(OrchestratorError::RunCommandError(format!(
                "Queue template {} has no {{}} placeholder for the queue type",
                queue_identifier
            )));
        }
        Ok(Self {
            queue_template_identifier: AWSResourceIdentifier::from_cli(
                &queue_identifier,
                run_cmd.aws_config_args.aws_prefix.as_deref(),
                QueueArgs::PREFIX_SEPARATOR,
            ),
            wait_time_seconds: run_cmd.service_args.queue_wait_time,
        })
    }
}

impl TryFrom<RunCmd> for AlertArgs {
    type Error = OrchestratorError;
    fn try_from(run_cmd: RunCmd) -> Result<Self, Self::Error> {
        let topic_identifier = required(run_cmd.aws_sns_args.topic_identifier.as_ref(), "alert topic name")?;
        Ok(Self {
            alert_identifier: AWSResourceIdentifier::from_cli(
                &topic_identifier,
                run_cmd.aws_config_args.aws_prefix.as_deref(),
                AlertArgs::PREFIX_SEPARATOR,
            ),
        })
    }
}

impl From<RunCmd> for TranscriptionArgs {
    fn from(run_cmd: RunCmd) -> Self {
        let args = run_cmd.aws_transcribe_args;
        Self {
            media_format: args.media_format,
            language_code: args.language_code,
            job_name_prefix: args.transcription_job_name_prefix,
        }
    }
}

impl TryFrom<RunCmd> for BatchArgs {
    type Error = OrchestratorError;
    fn try_from(run_cmd: RunCmd) -> Result<Self, Self::Error> {
        let args = run_cmd.aws_batch_args;
        Ok(Self {
            job_queue: required(args.batch_job_queue.as_ref(), "batch job queue")?,
            job_definition: required(args.batch_job_definition.as_ref(), "batch job definition")?,
            output_languages: args.output_languages,
            region: args.service_region,
            job_name_prefix: args.batch_job_name_prefix,
        })
    }
}

impl TryFrom<BootstrapCmd> for BuildArgs {
    type Error = OrchestratorError;
    fn try_from(bootstrap_cmd: BootstrapCmd) -> Result<Self, Self::Error> {
        let project = bootstrap_cmd
            .aws_codebuild_args
            .build_project
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| OrchestratorError::SetupCommandError("Missing build project name".to_string()))?;
        // Build projects are never prefixed.
        Ok(Self { project_identifier: AWSResourceIdentifier::from_cli(&project, None, "") })
    }
}
