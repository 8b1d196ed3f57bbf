use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_batch::types::{ContainerOverrides, KeyValuePair};
use aws_sdk_batch::Client;

use super::{BatchClient, BatchError, BatchSubmission};
use crate::pipeline::DubbingJobRequest;

#[derive(Clone, Debug)]
pub struct AWSBatch {
    client: Client,
}

impl AWSBatch {
    pub fn new(aws_config: &SdkConfig) -> Self {
        Self { client: Client::new(aws_config) }
    }

    fn container_overrides(request: &DubbingJobRequest) -> ContainerOverrides {
        let environment = request
            .environment
            .iter()
            .map(|(name, value)| KeyValuePair::builder().name(name).value(value).build())
            .collect::<Vec<_>>();
        ContainerOverrides::builder().set_environment(Some(environment)).build()
    }
}

#[async_trait]
impl BatchClient for AWSBatch {
    async fn submit_job(&self, request: &DubbingJobRequest) -> Result<BatchSubmission, BatchError> {
        let output = self
            .client
            .submit_job()
            .job_name(&request.job_name)
            .job_queue(&request.job_queue)
            .job_definition(&request.job_definition)
            .container_overrides(Self::container_overrides(request))
            .send()
            .await?;

        Ok(BatchSubmission { job_id: output.job_id().to_string(), job_name: output.job_name().to_string() })
    }
}
