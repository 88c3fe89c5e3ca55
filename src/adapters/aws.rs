//! AWS SDK configuration
//!
//! Builds the shared SDK configuration and the DynamoDB and Cognito clients
//! from [`AwsConfig`]. Static keys are used when configured; otherwise the
//! default provider chain resolves credentials. Endpoint overrides point the
//! clients at DynamoDB Local, LocalStack or a test server.

use crate::config::AwsConfig;
use aws_config::{meta::region::RegionProviderChain, BehaviorVersion, Region, SdkConfig};
use aws_sdk_cognitoidentityprovider::Client as CognitoSdkClient;
use aws_sdk_dynamodb::config::Credentials;
use aws_sdk_dynamodb::Client as DynamoDbSdkClient;
use secrecy::ExposeSecret;

const CREDENTIALS_PROVIDER_NAME: &str = "crowsnest-export";

/// AWS client builder
pub struct AwsClientBuilder<'a> {
    config: &'a AwsConfig,
}

impl<'a> AwsClientBuilder<'a> {
    /// Create a builder over the `[aws]` configuration section
    pub fn new(config: &'a AwsConfig) -> Self {
        Self { config }
    }

    /// Build the base AWS SDK configuration
    pub async fn build_sdk_config(&self) -> SdkConfig {
        let region_provider =
            RegionProviderChain::first_try(Region::new(self.config.region.clone()))
                .or_default_provider();

        let mut loader = aws_config::defaults(BehaviorVersion::latest()).region(region_provider);

        if let Some(credentials) = self.static_credentials() {
            tracing::debug!("Using AWS credentials from configuration");
            loader = loader.credentials_provider(credentials);
        }

        loader.load().await
    }

    /// Create a DynamoDB client with optional custom endpoint
    pub async fn build_dynamodb_client(&self) -> DynamoDbSdkClient {
        let sdk_config = self.build_sdk_config().await;
        self.dynamodb_client(&sdk_config)
    }

    /// Create a Cognito identity provider client with optional custom endpoint
    pub async fn build_cognito_client(&self) -> CognitoSdkClient {
        let sdk_config = self.build_sdk_config().await;
        self.cognito_client(&sdk_config)
    }

    /// Create both clients from one shared SDK configuration
    pub async fn build_clients(&self) -> (DynamoDbSdkClient, CognitoSdkClient) {
        let sdk_config = self.build_sdk_config().await;
        (
            self.dynamodb_client(&sdk_config),
            self.cognito_client(&sdk_config),
        )
    }

    fn dynamodb_client(&self, sdk_config: &SdkConfig) -> DynamoDbSdkClient {
        if let Some(endpoint_url) = &self.config.dynamodb_endpoint_url {
            tracing::info!(endpoint = %endpoint_url, "Using custom DynamoDB endpoint");

            let dynamodb_config = aws_sdk_dynamodb::config::Builder::from(sdk_config)
                .endpoint_url(endpoint_url)
                .build();

            DynamoDbSdkClient::from_conf(dynamodb_config)
        } else {
            DynamoDbSdkClient::new(sdk_config)
        }
    }

    fn cognito_client(&self, sdk_config: &SdkConfig) -> CognitoSdkClient {
        if let Some(endpoint_url) = &self.config.cognito_endpoint_url {
            tracing::info!(endpoint = %endpoint_url, "Using custom Cognito endpoint");

            let cognito_config = aws_sdk_cognitoidentityprovider::config::Builder::from(sdk_config)
                .endpoint_url(endpoint_url)
                .build();

            CognitoSdkClient::from_conf(cognito_config)
        } else {
            CognitoSdkClient::new(sdk_config)
        }
    }

    fn static_credentials(&self) -> Option<Credentials> {
        let access_key_id = self.config.access_key_id.as_ref()?;
        let secret_access_key = self.config.secret_access_key.as_ref()?;

        Some(Credentials::new(
            access_key_id.clone(),
            secret_access_key.expose_secret().as_ref().to_string(),
            self.config
                .session_token
                .as_ref()
                .map(|token| token.expose_secret().as_ref().to_string()),
            None,
            CREDENTIALS_PROVIDER_NAME,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    fn aws_config() -> AwsConfig {
        AwsConfig {
            region: "eu-west-1".to_string(),
            access_key_id: Some("AKIDEXAMPLE".to_string()),
            secret_access_key: Some(secret_string("secret".to_string())),
            session_token: None,
            dynamodb_endpoint_url: Some("http://127.0.0.1:8000".to_string()),
            cognito_endpoint_url: None,
        }
    }

    #[test]
    fn test_static_credentials() {
        let config = aws_config();
        let credentials = AwsClientBuilder::new(&config).static_credentials().unwrap();
        assert_eq!(credentials.access_key_id(), "AKIDEXAMPLE");
        assert_eq!(credentials.secret_access_key(), "secret");
        assert!(credentials.session_token().is_none());
    }

    #[test]
    fn test_no_static_credentials_without_keys() {
        let mut config = aws_config();
        config.access_key_id = None;
        assert!(AwsClientBuilder::new(&config).static_credentials().is_none());
    }

    #[tokio::test]
    async fn test_build_sdk_config_uses_region() {
        let config = aws_config();
        let sdk_config = AwsClientBuilder::new(&config).build_sdk_config().await;
        assert_eq!(sdk_config.region().map(|r| r.as_ref()), Some("eu-west-1"));
    }

    #[tokio::test]
    async fn test_build_clients() {
        let config = aws_config();
        let (_dynamodb, _cognito) = AwsClientBuilder::new(&config).build_clients().await;
    }
}
