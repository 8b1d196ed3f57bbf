use std::sync::Arc;

use crate::cli::RunCmd;
use crate::core::client::{
    AWSBatch, AWSTranscribe, AlertClient, BatchClient, QueueClient, TranscriptionClient, SNS, SQS,
};
use crate::core::cloud::CloudProvider;
use crate::pipeline::BucketLayout;
use crate::types::params::{AlertArgs, BatchArgs, QueueArgs, ServiceParams, StorageArgs, TranscriptionArgs};
use crate::OrchestratorResult;

/// Read-only parameters shared by every trigger invocation.
#[derive(Debug, Clone)]
pub struct PipelineParams {
    pub layout: BucketLayout,
    pub transcription: TranscriptionArgs,
    pub batch: BatchArgs,
    pub service: ServiceParams,
}

impl TryFrom<RunCmd> for PipelineParams {
    type Error = crate::OrchestratorError;
    fn try_from(run_cmd: RunCmd) -> Result<Self, Self::Error> {
        Ok(Self {
            layout: StorageArgs::try_from(run_cmd.clone())?.layout,
            transcription: TranscriptionArgs::from(run_cmd.clone()),
            batch: BatchArgs::try_from(run_cmd.clone())?,
            service: ServiceParams::from(run_cmd.service_args),
        })
    }
}

/// The app config. Built once at startup and shared behind an `Arc`.
pub struct Config {
    params: PipelineParams,
    /// Stage queues
    queue: Box<dyn QueueClient>,
    /// Pipeline topic
    alerts: Box<dyn AlertClient>,
    /// Speech-to-text jobs
    transcription: Box<dyn TranscriptionClient>,
    /// Translate/dub jobs
    batch: Box<dyn BatchClient>,
}

impl Config {
    pub fn new(
        params: PipelineParams,
        queue: Box<dyn QueueClient>,
        alerts: Box<dyn AlertClient>,
        transcription: Box<dyn TranscriptionClient>,
        batch: Box<dyn BatchClient>,
    ) -> Self {
        Self { params, queue, alerts, transcription, batch }
    }

    pub async fn from_run_cmd(run_cmd: &RunCmd) -> OrchestratorResult<Self> {
        let params = PipelineParams::try_from(run_cmd.clone())?;
        let alert_args = AlertArgs::try_from(run_cmd.clone())?;
        let queue_args = QueueArgs::try_from(run_cmd.clone())?;

        let provider_config = Arc::new(CloudProvider::from_cli(&run_cmd.aws_config_args).await?);
        tracing::debug!(provider = %provider_config, "Cloud provider configured");

        let queue = Self::build_queue_client(&queue_args, provider_config.clone());
        let alerts = Self::build_alert_client(&alert_args, provider_config.clone());
        let transcription = Self::build_transcription_client(provider_config.clone());
        let batch = Self::build_batch_client(provider_config);

        Ok(Self::new(params, queue, alerts, transcription, batch))
    }

    fn build_alert_client(alert_config: &AlertArgs, provider_config: Arc<CloudProvider>) -> Box<dyn AlertClient> {
        Box::new(SNS::new(provider_config.get_aws_config(), alert_config))
    }

    fn build_queue_client(queue_config: &QueueArgs, provider_config: Arc<CloudProvider>) -> Box<dyn QueueClient> {
        Box::new(SQS::new(provider_config.get_aws_config(), queue_config))
    }

    fn build_transcription_client(provider_config: Arc<CloudProvider>) -> Box<dyn TranscriptionClient> {
        Box::new(AWSTranscribe::new(provider_config.get_aws_config()))
    }

    fn build_batch_client(provider_config: Arc<CloudProvider>) -> Box<dyn BatchClient> {
        Box::new(AWSBatch::new(provider_config.get_aws_config()))
    }

    pub fn params(&self) -> &PipelineParams {
        &self.params
    }

    pub fn layout(&self) -> &BucketLayout {
        &self.params.layout
    }

    pub fn service_params(&self) -> &ServiceParams {
        &self.params.service
    }

    pub fn queue(&self) -> &dyn QueueClient {
        self.queue.as_ref()
    }

    pub fn alerts(&self) -> &dyn AlertClient {
        self.alerts.as_ref()
    }

    pub fn transcription(&self) -> &dyn TranscriptionClient {
        self.transcription.as_ref()
    }

    pub fn batch(&self) -> &dyn BatchClient {
        self.batch.as_ref()
    }
}
