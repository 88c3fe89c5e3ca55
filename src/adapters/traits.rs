//! Collaborator traits
//!
//! The export pipeline talks to the key-value store and the identity
//! directory only through these traits, so tests can substitute in-memory
//! fakes for the AWS clients.

use crate::core::pagination::Page;
use crate::domain::{CognitoError, DynamoDbError, Item, PoolId, PoolUser};
use async_trait::async_trait;

/// Page-at-a-time table scans
#[async_trait]
pub trait TableScanner: Send + Sync {
    /// Scan one page of `table`, starting after `cursor` when given
    ///
    /// The returned cursor is the last evaluated key, or `None` on the final
    /// page.
    ///
    /// # Errors
    ///
    /// Returns an error if the scan request fails.
    async fn scan_page(
        &self,
        table: &str,
        cursor: Option<Item>,
    ) -> Result<Page<Item, Item>, DynamoDbError>;
}

/// Identity directory operations on user pools
#[async_trait]
pub trait IdentityDirectory: Send + Sync {
    /// Look up a pool's display name
    ///
    /// # Errors
    ///
    /// Returns [`CognitoError::PoolNotFound`] when the pool does not exist,
    /// another variant for any other failure.
    async fn describe_pool(&self, pool_id: &PoolId) -> Result<String, CognitoError>;

    /// List one page of users, requesting only `attributes`
    ///
    /// # Errors
    ///
    /// Returns [`CognitoError::UnknownAttribute`] when the pool schema does
    /// not define one of the requested attributes.
    async fn list_users_page(
        &self,
        pool_id: &PoolId,
        attributes: &[String],
        cursor: Option<String>,
    ) -> Result<Page<PoolUser, String>, CognitoError>;
}
