//! In-memory collaborators shared by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use crowsnest_export::adapters::{IdentityDirectory, TableScanner};
use crowsnest_export::core::pagination::Page;
use crowsnest_export::domain::{
    CognitoError, DynamoDbError, Item, PoolId, PoolUser, UserAttribute,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Mutex;

/// Build an item from typed-attribute JSON
pub fn item(value: Value) -> Item {
    value.as_object().cloned().expect("item must be a JSON object")
}

/// A member item with `email` and `authPoolId`
pub fn member_item(member_id: &str, email: &str, pool_id: &str) -> Item {
    item(json!({
        "memberId": {"S": member_id},
        "email": {"S": email},
        "authPoolId": {"S": pool_id}
    }))
}

/// A pool user with an email username and the usual attributes
pub fn pool_user(email: &str, given: &str, family: &str) -> PoolUser {
    PoolUser::new(
        email,
        vec![
            UserAttribute::new("sub", format!("sub-{given}")),
            UserAttribute::new("email", email),
            UserAttribute::new("given_name", given),
            UserAttribute::new("family_name", family),
            UserAttribute::new("custom:company", "Acme"),
        ],
    )
}

/// Tables served page by page; the cursor is `{"page": {"N": "<index>"}}`
#[derive(Default)]
pub struct FakeScanner {
    tables: HashMap<String, Vec<Vec<Item>>>,
    failing: Vec<String>,
}

impl FakeScanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, table: &str, pages: Vec<Vec<Item>>) -> Self {
        self.tables.insert(table.to_string(), pages);
        self
    }

    pub fn with_failing_table(mut self, table: &str) -> Self {
        self.failing.push(table.to_string());
        self
    }
}

#[async_trait]
impl TableScanner for FakeScanner {
    async fn scan_page(
        &self,
        table: &str,
        cursor: Option<Item>,
    ) -> Result<Page<Item, Item>, DynamoDbError> {
        if self.failing.iter().any(|t| t == table) {
            return Err(DynamoDbError::ScanFailed {
                table: table.to_string(),
                message: "AccessDeniedException".to_string(),
            });
        }

        let pages = self.tables.get(table).ok_or_else(|| DynamoDbError::ScanFailed {
            table: table.to_string(),
            message: "ResourceNotFoundException".to_string(),
        })?;

        let index = cursor
            .as_ref()
            .and_then(|c| c.get("page"))
            .and_then(|p| p.get("N"))
            .and_then(Value::as_str)
            .and_then(|n| n.parse::<usize>().ok())
            .unwrap_or(0);

        let items = pages.get(index).cloned().unwrap_or_default();
        let next_cursor = (index + 1 < pages.len())
            .then(|| item(json!({"page": {"N": (index + 1).to_string()}})));

        Ok(Page::new(items, next_cursor))
    }
}

/// One pool in the fake directory
#[derive(Clone, Default)]
pub struct FakePool {
    pub name: String,
    pub pages: Vec<Vec<PoolUser>>,
    /// Attributes the pool schema defines; `None` accepts anything
    pub schema: Option<Vec<String>>,
    /// Fail DescribeUserPool with this message
    pub describe_error: Option<String>,
    /// Fail ListUsers with this message (any attribute set)
    pub list_error: Option<String>,
}

impl FakePool {
    pub fn new(name: &str, pages: Vec<Vec<PoolUser>>) -> Self {
        Self {
            name: name.to_string(),
            pages,
            ..Default::default()
        }
    }

    pub fn with_schema(mut self, attributes: &[&str]) -> Self {
        self.schema = Some(attributes.iter().map(|a| a.to_string()).collect());
        self
    }
}

/// A recorded `list_users_page` call
#[derive(Debug, Clone, PartialEq)]
pub struct ListCall {
    pub pool_id: String,
    pub attributes: Vec<String>,
    pub cursor: Option<String>,
}

/// User pools held in memory; unknown ids are reported as not found
#[derive(Default)]
pub struct FakeDirectory {
    pools: HashMap<String, FakePool>,
    pub list_calls: Mutex<Vec<ListCall>>,
    pub describe_calls: Mutex<Vec<String>>,
}

impl FakeDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pool(mut self, pool_id: &str, pool: FakePool) -> Self {
        self.pools.insert(pool_id.to_string(), pool);
        self
    }

    pub fn list_calls(&self) -> Vec<ListCall> {
        self.list_calls.lock().unwrap().clone()
    }

    pub fn describe_calls(&self) -> Vec<String> {
        self.describe_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl IdentityDirectory for FakeDirectory {
    async fn describe_pool(&self, pool_id: &PoolId) -> Result<String, CognitoError> {
        self.describe_calls
            .lock()
            .unwrap()
            .push(pool_id.to_string());

        let pool = self
            .pools
            .get(pool_id.as_str())
            .ok_or_else(|| CognitoError::PoolNotFound(pool_id.to_string()))?;

        match &pool.describe_error {
            Some(message) => Err(CognitoError::DescribePoolFailed {
                pool_id: pool_id.to_string(),
                message: message.clone(),
            }),
            None => Ok(pool.name.clone()),
        }
    }

    async fn list_users_page(
        &self,
        pool_id: &PoolId,
        attributes: &[String],
        cursor: Option<String>,
    ) -> Result<Page<PoolUser, String>, CognitoError> {
        self.list_calls.lock().unwrap().push(ListCall {
            pool_id: pool_id.to_string(),
            attributes: attributes.to_vec(),
            cursor: cursor.clone(),
        });

        let pool = self
            .pools
            .get(pool_id.as_str())
            .ok_or_else(|| CognitoError::PoolNotFound(pool_id.to_string()))?;

        if let Some(message) = &pool.list_error {
            return Err(CognitoError::ListUsersFailed {
                pool_id: pool_id.to_string(),
                message: message.clone(),
            });
        }

        if let Some(schema) = &pool.schema {
            if attributes.iter().any(|a| !schema.contains(a)) {
                return Err(CognitoError::UnknownAttribute {
                    pool_id: pool_id.to_string(),
                    message: "One or more requested attributes do not exist.".to_string(),
                });
            }
        }

        let index = cursor
            .as_deref()
            .and_then(|c| c.strip_prefix("token-"))
            .and_then(|n| n.parse::<usize>().ok())
            .unwrap_or(0);

        let users = pool.pages.get(index).cloned().unwrap_or_default();
        let next_cursor = (index + 1 < pool.pages.len()).then(|| format!("token-{}", index + 1));

        Ok(Page::new(users, next_cursor))
    }
}
