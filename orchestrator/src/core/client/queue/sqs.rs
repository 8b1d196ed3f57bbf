use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use aws_config::Region;
use aws_config::SdkConfig;
use aws_sdk_sqs::Client;
use omniqueue::backends::{SqsBackend, SqsConfig, SqsConsumer};
use omniqueue::Delivery;

use crate::core::client::queue::{QueueClient, QueueError};
use crate::types::params::{AWSResourceIdentifier, QueueArgs, ARN};
use crate::types::queue::QueueType;

#[derive(Clone, Debug)]
pub struct InnerSQS(Client);

impl InnerSQS {
    pub fn new(aws_config: &SdkConfig) -> Self {
        let sqs_config_builder = aws_sdk_sqs::config::Builder::from(aws_config);
        Self(Client::from_conf(sqs_config_builder.build()))
    }

    pub fn client(&self) -> &Client {
        &self.0
    }

    pub async fn get_queue_url_from_client(&self, queue_name: &str) -> Result<String, QueueError> {
        Ok(self
            .client()
            .get_queue_url()
            .queue_name(queue_name)
            .send()
            .await?
            .queue_url()
            .ok_or_else(|| QueueError::FailedToGetQueueUrl(queue_name.to_string()))?
            .to_string())
    }

    /// SQS queue URLs follow the format: https://sqs.{region}.amazonaws.com/{account_id}/{queue_name}
    pub fn get_queue_url_from_arn(queue_arn: &ARN, queue_type: &QueueType) -> Result<String, QueueError> {
        if queue_arn.service != "sqs" {
            return Err(QueueError::InvalidArn(format!("Expected SQS ARN but got service: {}", queue_arn.service)));
        }
        Ok(format!(
            "https://sqs.{}.amazonaws.com/{}/{}",
            queue_arn.region,
            queue_arn.account_id,
            InnerSQS::get_queue_name_from_type(queue_arn.resource.as_str(), queue_type)
        ))
    }

    /// Substitute the queue type into the `{}` placeholder of a template.
    pub fn get_queue_name_from_type(name: &str, queue_type: &QueueType) -> String {
        name.replace("{}", &queue_type.to_string())
    }
}

struct ResolvedQueue {
    url: String,
    consumer: SqsConsumer,
}

pub struct SQS {
    pub inner: InnerSQS,
    queue_template_identifier: AWSResourceIdentifier,
    wait_time_seconds: i32,
    resolved: Mutex<HashMap<QueueType, Arc<ResolvedQueue>>>,
}

impl SQS {
    pub fn new(aws_config: &SdkConfig, args: &QueueArgs) -> Self {
        let latest_aws_config = match &args.queue_template_identifier {
            AWSResourceIdentifier::ARN(arn) if !arn.region.is_empty() => {
                aws_config.clone().into_builder().region(Region::new(arn.region.clone())).build()
            }
            _ => aws_config.clone(),
        };

        Self {
            inner: InnerSQS::new(&latest_aws_config),
            queue_template_identifier: args.queue_template_identifier.clone(),
            wait_time_seconds: args.wait_time_seconds,
            resolved: Mutex::new(HashMap::new()),
        }
    }

    pub fn client(&self) -> &Client {
        self.inner.client()
    }

    async fn resolve(&self, queue: QueueType) -> Result<Arc<ResolvedQueue>, QueueError> {
        if let Some(resolved) = self.resolved.lock().ok().and_then(|cache| cache.get(&queue).cloned()) {
            return Ok(resolved);
        }

        let url = match &self.queue_template_identifier {
            AWSResourceIdentifier::ARN(arn) => InnerSQS::get_queue_url_from_arn(arn, &queue)?,
            AWSResourceIdentifier::Name(_) => self.inner.get_queue_url_from_client(&self.queue_name(queue)).await?,
        };
        tracing::debug!(queue = %queue, queue_url = %url, "Resolved queue url");

        let consumer =
            SqsBackend::builder(SqsConfig { queue_dsn: url.clone(), override_endpoint: false }).build_consumer().await?;
        let resolved = Arc::new(ResolvedQueue { url, consumer });

        if let Ok(mut cache) = self.resolved.lock() {
            cache.insert(queue, resolved.clone());
        }
        Ok(resolved)
    }
}

#[async_trait]
impl QueueClient for SQS {
    async fn consume_message_from_queue(&self, queue: QueueType) -> Result<Delivery, QueueError> {
        let resolved = self.resolve(queue).await?;

        let messages = self
            .client()
            .receive_message()
            .queue_url(&resolved.url)
            .max_number_of_messages(1)
            .wait_time_seconds(self.wait_time_seconds)
            .send()
            .await?;

        match messages.messages().first() {
            Some(message) => Ok(resolved.consumer.wrap_message(message)),
            None => Err(omniqueue::QueueError::NoData.into()),
        }
    }

    fn queue_name(&self, queue: QueueType) -> String {
        InnerSQS::get_queue_name_from_type(self.queue_template_identifier.resource_name(), &queue)
    }
}
