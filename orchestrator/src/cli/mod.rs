use std::path::PathBuf;

use clap::{Parser, Subcommand};
use provider::aws::AWSConfigCliArgs;

use crate::pipeline::Stage;

pub mod alert;
pub mod batch;
pub mod bootstrap;
pub mod provider;
pub mod queue;
pub mod service;
pub mod storage;
pub mod transcription;

#[derive(Parser, Debug)]
#[command(
    name = "localization-orchestrator",
    about = "Localization Orchestrator - drives uploaded videos through transcription, review and dubbing",
    long_about = "Localization Orchestrator reacts to object-created events of the four pipeline locations.\n\n\
    A raw video starts a transcription job, a pending transcript notifies reviewers, an approved transcript \
    starts the translate/dub batch job and a localized video notifies completion.",
    after_help = "Examples:\n  \
    localization-orchestrator bootstrap --aws --aws-codebuild --build-project dubbing-image\n  \
    localization-orchestrator run --aws --aws-s3 --aws-sqs --aws-sns --aws-transcribe --aws-batch\n  \
    localization-orchestrator replay --queue approved_review --event-file event.json --aws ..."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the orchestrator service
    Run {
        #[command(flatten)]
        run_command: Box<RunCmd>,
    },
    /// Start the one-time build of the dubbing container image
    #[command(long_about = "Start one build of the container-image build project.\n\n\
        Must complete once before any dubbing job can succeed. Running it again starts another build.")]
    Bootstrap {
        #[command(flatten)]
        bootstrap_command: Box<BootstrapCmd>,
    },
    /// Run one stored storage notification through its stage trigger
    Replay {
        #[command(flatten)]
        replay_command: Box<ReplayCmd>,
    },
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct RunCmd {
    #[clap(flatten)]
    pub aws_config_args: AWSConfigCliArgs,

    #[clap(flatten)]
    pub aws_s3_args: storage::aws_s3::AWSS3CliArgs,

    #[clap(flatten)]
    pub aws_sqs_args: queue::aws_sqs::AWSSQSCliArgs,

    #[clap(flatten)]
    pub aws_sns_args: alert::aws_sns::AWSSNSCliArgs,

    #[clap(flatten)]
    pub aws_transcribe_args: transcription::aws_transcribe::AWSTranscribeCliArgs,

    #[clap(flatten)]
    pub aws_batch_args: batch::aws_batch::AWSBatchCliArgs,

    #[clap(flatten)]
    pub service_args: service::ServiceCliArgs,
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct BootstrapCmd {
    #[clap(flatten)]
    pub aws_config_args: AWSConfigCliArgs,

    #[clap(flatten)]
    pub aws_codebuild_args: bootstrap::aws_codebuild::AWSCodeBuildCliArgs,
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct ReplayCmd {
    /// Stage queue the event would have been delivered on. Derived from the event's bucket when absent.
    #[arg(long, value_enum)]
    pub queue: Option<Stage>,

    /// Path to a storage notification JSON document.
    #[arg(long, value_name = "PATH")]
    pub event_file: PathBuf,

    #[clap(flatten)]
    pub run_command: RunCmd,
}
