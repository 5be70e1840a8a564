//! The SDK-backed store client.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_config::retry::RetryConfig;
use aws_sdk_dynamodb::config::Region;
use tablequery_core::{QueryClient, TableQueryConfig};
use tablequery_model::{DynamoDBError, QueryInput, QueryOutput};
use tracing::debug;

use crate::convert::{apply_input, from_sdk_output};
use crate::error::from_sdk_error;

/// [`QueryClient`] that talks to DynamoDB (or a compatible endpoint) through
/// `aws-sdk-dynamodb`.
#[derive(Debug, Clone)]
pub struct SdkQueryClient {
    client: aws_sdk_dynamodb::Client,
}

impl SdkQueryClient {
    /// Wrap an already configured SDK client.
    #[must_use]
    pub fn new(client: aws_sdk_dynamodb::Client) -> Self {
        Self { client }
    }

    /// Build a client from TableQuery settings plus the default AWS credential
    /// chain.
    pub async fn from_config(config: &TableQueryConfig) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.default_region.clone()))
            .retry_config(RetryConfig::standard().with_max_attempts(config.max_attempts));
        if let Some(endpoint) = &config.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }
        let sdk_config = loader.load().await;

        debug!(
            region = %config.default_region,
            endpoint = config.endpoint_url.as_deref().unwrap_or("default"),
            max_attempts = config.max_attempts,
            "created DynamoDB client"
        );

        Self::new(aws_sdk_dynamodb::Client::new(&sdk_config))
    }

    /// The underlying SDK client.
    #[must_use]
    pub fn inner(&self) -> &aws_sdk_dynamodb::Client {
        &self.client
    }
}

#[async_trait]
impl QueryClient for SdkQueryClient {
    async fn query(&self, input: QueryInput) -> Result<QueryOutput, DynamoDBError> {
        let output = apply_input(self.client.query(), input)
            .send()
            .await
            .map_err(from_sdk_error)?;
        from_sdk_output(&output)
    }
}
