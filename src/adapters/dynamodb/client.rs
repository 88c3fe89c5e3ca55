//! DynamoDB table scanner

use super::item::{item_to_json, json_to_item};
use crate::adapters::aws::AwsClientBuilder;
use crate::adapters::traits::TableScanner;
use crate::config::AwsConfig;
use crate::core::pagination::Page;
use crate::domain::{DynamoDbError, Item};
use async_trait::async_trait;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::Client as DynamoDbSdkClient;

/// Scans DynamoDB tables one page at a time
#[derive(Clone)]
pub struct DynamoDbScanner {
    client: DynamoDbSdkClient,
}

impl DynamoDbScanner {
    /// Wrap an existing SDK client
    pub fn new(client: DynamoDbSdkClient) -> Self {
        Self { client }
    }

    /// Build a client from the `[aws]` configuration section
    pub async fn from_config(config: &AwsConfig) -> Self {
        Self::new(AwsClientBuilder::new(config).build_dynamodb_client().await)
    }

    /// Get a reference to the underlying AWS SDK client
    pub fn client(&self) -> &DynamoDbSdkClient {
        &self.client
    }
}

#[async_trait]
impl TableScanner for DynamoDbScanner {
    async fn scan_page(
        &self,
        table: &str,
        cursor: Option<Item>,
    ) -> Result<Page<Item, Item>, DynamoDbError> {
        let start_key = cursor.as_ref().map(json_to_item).transpose()?;

        let output = self
            .client
            .scan()
            .table_name(table)
            .set_exclusive_start_key(start_key)
            .send()
            .await
            .map_err(|e| DynamoDbError::ScanFailed {
                table: table.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        let items = output
            .items
            .unwrap_or_default()
            .into_iter()
            .map(item_to_json)
            .collect::<Result<Vec<_>, _>>()?;

        let next_cursor = output
            .last_evaluated_key
            .filter(|key| !key.is_empty())
            .map(item_to_json)
            .transpose()?;

        tracing::debug!(
            table,
            items = items.len(),
            more = next_cursor.is_some(),
            "Scanned table page"
        );

        Ok(Page::new(items, next_cursor))
    }
}
