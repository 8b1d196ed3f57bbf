use aws_sdk_codebuild::error::SdkError;
use aws_sdk_codebuild::operation::start_build::StartBuildError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Failed to start build: {0}")]
    StartBuildError(#[from] SdkError<StartBuildError>),

    #[error("Build service returned no build id for project {0}")]
    MissingBuild(String),
}
