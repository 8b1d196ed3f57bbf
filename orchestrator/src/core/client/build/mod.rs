pub mod codebuild;
pub mod error;

use async_trait::async_trait;
pub use error::BuildError;

/// Container-image build service used once to bootstrap the dubbing image
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BuildClient: Send + Sync {
    /// Start one build of the configured project and return its id.
    async fn start_build(&self) -> Result<String, BuildError>;
}
