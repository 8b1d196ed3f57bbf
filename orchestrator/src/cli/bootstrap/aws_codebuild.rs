use clap::Args;

/// Parameters used to config the AWS CodeBuild project building the dubbing image.
#[derive(Debug, Clone, Args)]
pub struct AWSCodeBuildCliArgs {
    /// Use the AWS CodeBuild client
    #[arg(long)]
    pub aws_codebuild: bool,

    /// The ARN / Name of the build project.
    #[arg(env = "LOCALIZATION_AWS_CODEBUILD_PROJECT", long)]
    pub build_project: Option<String>,
}
