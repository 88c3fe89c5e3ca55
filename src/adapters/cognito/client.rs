//! Cognito user pool directory

use super::models::pool_user_from_sdk;
use crate::adapters::aws::AwsClientBuilder;
use crate::adapters::traits::IdentityDirectory;
use crate::config::AwsConfig;
use crate::core::pagination::Page;
use crate::domain::{CognitoError, PoolId, PoolUser};
use async_trait::async_trait;
use aws_sdk_cognitoidentityprovider::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_cognitoidentityprovider::Client as CognitoSdkClient;

/// Message Cognito returns when `AttributesToGet` names an undefined attribute
const UNKNOWN_ATTRIBUTE_MESSAGE: &str = "One or more requested attributes do not exist";

/// [`IdentityDirectory`] backed by Amazon Cognito user pools
#[derive(Clone)]
pub struct CognitoDirectory {
    client: CognitoSdkClient,
}

impl CognitoDirectory {
    /// Wrap an existing SDK client
    pub fn new(client: CognitoSdkClient) -> Self {
        Self { client }
    }

    /// Build a client from the `[aws]` configuration section
    pub async fn from_config(config: &AwsConfig) -> Self {
        Self::new(AwsClientBuilder::new(config).build_cognito_client().await)
    }

    /// Get a reference to the underlying AWS SDK client
    pub fn client(&self) -> &CognitoSdkClient {
        &self.client
    }
}

#[async_trait]
impl IdentityDirectory for CognitoDirectory {
    async fn describe_pool(&self, pool_id: &PoolId) -> Result<String, CognitoError> {
        let output = match self
            .client
            .describe_user_pool()
            .user_pool_id(pool_id.as_str())
            .send()
            .await
        {
            Ok(output) => output,
            Err(e) => {
                let message = DisplayErrorContext(&e).to_string();
                let service_error = e.into_service_error();
                if service_error.is_resource_not_found_exception() {
                    return Err(CognitoError::PoolNotFound(pool_id.to_string()));
                }
                return Err(CognitoError::DescribePoolFailed {
                    pool_id: pool_id.to_string(),
                    message,
                });
            }
        };

        let pool = output.user_pool.ok_or_else(|| {
            CognitoError::InvalidResponse(format!("DescribeUserPool for {pool_id} returned no pool"))
        })?;

        Ok(pool.name.unwrap_or_default())
    }

    async fn list_users_page(
        &self,
        pool_id: &PoolId,
        attributes: &[String],
        cursor: Option<String>,
    ) -> Result<Page<PoolUser, String>, CognitoError> {
        let output = match self
            .client
            .list_users()
            .user_pool_id(pool_id.as_str())
            .set_attributes_to_get(Some(attributes.to_vec()))
            .set_pagination_token(cursor)
            .send()
            .await
        {
            Ok(output) => output,
            Err(e) => {
                let message = DisplayErrorContext(&e).to_string();
                let service_error = e.into_service_error();
                let unknown_attribute = service_error.is_invalid_parameter_exception()
                    && service_error
                        .message()
                        .is_some_and(|m| m.contains(UNKNOWN_ATTRIBUTE_MESSAGE));

                if unknown_attribute {
                    return Err(CognitoError::UnknownAttribute {
                        pool_id: pool_id.to_string(),
                        message,
                    });
                }
                return Err(CognitoError::ListUsersFailed {
                    pool_id: pool_id.to_string(),
                    message,
                });
            }
        };

        let users = output
            .users
            .unwrap_or_default()
            .into_iter()
            .map(pool_user_from_sdk)
            .collect::<Result<Vec<_>, _>>()?;

        let next_cursor = output.pagination_token.filter(|token| !token.is_empty());

        tracing::debug!(
            pool_id = %pool_id,
            users = users.len(),
            more = next_cursor.is_some(),
            "Listed pool users page"
        );

        Ok(Page::new(users, next_cursor))
    }
}
