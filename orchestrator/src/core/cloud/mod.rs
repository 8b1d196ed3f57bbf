use aws_config::SdkConfig;

use super::error::OrchestratorCoreError;
use crate::types::params::cloud_provider::AWSCredentials;
use crate::cli::provider::aws::AWSConfigCliArgs;

/// Cloud provider
/// This enum represents the different cloud providers that the orchestrator can interact with.
#[derive(Clone)]
pub enum CloudProvider {
    AWS(Box<SdkConfig>),
}

impl CloudProvider {
    /// Load the provider selected on the command line.
    pub async fn from_cli(args: &AWSConfigCliArgs) -> Result<Self, OrchestratorCoreError> {
        if args.aws {
            let aws_cred = AWSCredentials::from(args.clone());
            Ok(CloudProvider::AWS(Box::new(aws_cred.get_aws_config().await)))
        } else {
            Err(OrchestratorCoreError::InvalidProvider("no cloud provider selected, pass --aws".to_string()))
        }
    }

    pub fn get_aws_config(&self) -> &SdkConfig {
        match self {
            CloudProvider::AWS(config) => config.as_ref(),
        }
    }

    pub fn get_provider_name(&self) -> String {
        match self {
            CloudProvider::AWS(_) => "AWS".to_string(),
        }
    }
}

impl std::fmt::Debug for CloudProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.get_provider_name().as_str())
    }
}

impl std::fmt::Display for CloudProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}
