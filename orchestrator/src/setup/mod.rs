use tracing::{debug, info};

use crate::cli::BootstrapCmd;
use crate::core::client::{BuildClient, CodeBuild};
use crate::core::cloud::CloudProvider;
use crate::core::error::OrchestratorCoreError;
use crate::types::params::BuildArgs;
use crate::OrchestratorResult;

/// Start the one-time build of the dubbing container image and return the build id.
///
/// Nothing is recorded: running it again starts another build.
pub async fn bootstrap(bootstrap_cmd: &BootstrapCmd) -> OrchestratorResult<String> {
    let build_args = BuildArgs::try_from(bootstrap_cmd.clone())?;
    debug!("Build Params: {:?}", build_args);

    let cloud_provider = CloudProvider::from_cli(&bootstrap_cmd.aws_config_args).await?;
    let client = CodeBuild::new(cloud_provider.get_aws_config(), &build_args);
    start_image_build(&client).await
}

pub async fn start_image_build(client: &dyn BuildClient) -> OrchestratorResult<String> {
    info!("Starting container image build");
    let build_id = client.start_build().await.map_err(OrchestratorCoreError::from)?;
    info!(build_id = %build_id, "Container image build started");
    Ok(build_id)
}
