use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use aws_config::Region;
use aws_config::SdkConfig;
use aws_sdk_sns::Client;

use super::AlertError;
use crate::core::client::alert::AlertClient;
use crate::types::params::{AWSResourceIdentifier, AlertArgs, ARN};

#[derive(Clone, Debug)]
pub(crate) struct InnerAWSSNS(pub(crate) Arc<Client>);

impl InnerAWSSNS {
    pub fn new(aws_config: &SdkConfig) -> Self {
        Self(Arc::new(Client::new(aws_config)))
    }

    pub fn client(&self) -> &Client {
        self.0.as_ref()
    }

    /// Resolve a topic name to its ARN by listing the account's topics.
    pub async fn fetch_topic_arn_by_name(&self, topic_name: &str) -> Result<ARN, AlertError> {
        let mut next_token: Option<String> = None;
        loop {
            let resp = self
                .client()
                .list_topics()
                .set_next_token(next_token.take())
                .send()
                .await
                .map_err(AlertError::ListTopicsError)?;

            for topic in resp.topics() {
                if let Some(arn) = topic.topic_arn() {
                    let arn = ARN::parse(arn).map_err(|_| {
                        tracing::debug!(arn = %arn, "Topic ARN not parsable");
                        AlertError::TopicARNInvalid
                    })?;
                    if arn.resource == topic_name {
                        return Ok(arn);
                    }
                }
            }

            match resp.next_token() {
                Some(token) => next_token = Some(token.to_string()),
                None => return Err(AlertError::TopicNotFound(topic_name.to_string())),
            }
        }
    }
}

pub struct SNS {
    inner: InnerAWSSNS,
    pub alert_identifier: AWSResourceIdentifier,
    cached_alert_arn: Arc<OnceLock<ARN>>,
}

impl SNS {
    /// An ARN identifier with a region pins the client to that region.
    pub(crate) fn new(aws_config: &SdkConfig, args: &AlertArgs) -> Self {
        let latest_aws_config = match &args.alert_identifier {
            AWSResourceIdentifier::ARN(arn) if !arn.region.is_empty() => {
                aws_config.clone().into_builder().region(Region::new(arn.region.clone())).build()
            }
            _ => aws_config.clone(),
        };

        Self {
            inner: InnerAWSSNS::new(&latest_aws_config),
            alert_identifier: args.alert_identifier.clone(),
            cached_alert_arn: Arc::new(OnceLock::new()),
        }
    }

    /// Topic ARN, resolved once and cached.
    pub async fn get_topic_arn(&self) -> Result<String, AlertError> {
        if let Some(arn) = self.cached_alert_arn.get() {
            return Ok(arn.to_string());
        }

        let arn = match &self.alert_identifier {
            AWSResourceIdentifier::ARN(arn) => arn.clone(),
            AWSResourceIdentifier::Name(name) => self.inner.fetch_topic_arn_by_name(name).await?,
        };

        let _ = self.cached_alert_arn.set(arn.clone());
        Ok(arn.to_string())
    }

    pub fn client(&self) -> &Client {
        self.inner.client()
    }
}

#[async_trait]
impl AlertClient for SNS {
    async fn send_message(&self, message_body: String) -> Result<(), AlertError> {
        let topic_arn = self.get_topic_arn().await?;
        self.client().publish().topic_arn(&topic_arn).message(message_body).send().await?;
        tracing::debug!(topic_arn = %topic_arn, "Published notification");
        Ok(())
    }
}
