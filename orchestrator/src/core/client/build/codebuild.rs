use async_trait::async_trait;
use aws_config::Region;
use aws_config::SdkConfig;
use aws_sdk_codebuild::Client;

use super::{BuildClient, BuildError};
use crate::types::params::{AWSResourceIdentifier, BuildArgs};

pub struct CodeBuild {
    client: Client,
    project: AWSResourceIdentifier,
}

impl CodeBuild {
    pub fn new(aws_config: &SdkConfig, args: &BuildArgs) -> Self {
        let latest_aws_config = match &args.project_identifier {
            AWSResourceIdentifier::ARN(arn) if !arn.region.is_empty() => {
                aws_config.clone().into_builder().region(Region::new(arn.region.clone())).build()
            }
            _ => aws_config.clone(),
        };
        Self { client: Client::new(&latest_aws_config), project: args.project_identifier.clone() }
    }
}

#[async_trait]
impl BuildClient for CodeBuild {
    async fn start_build(&self) -> Result<String, BuildError> {
        // StartBuild accepts either the project name or its ARN.
        let project = self.project.to_string();
        let output = self.client.start_build().project_name(&project).send().await?;
        output
            .build_value()
            .and_then(|build| build.id())
            .map(str::to_string)
            .ok_or(BuildError::MissingBuild(project))
    }
}
