//! Identity pool resolution
//!
//! Turns the pool ids referenced by members into exported pools: each pool
//! is described for its name, all of its users are listed, and every user is
//! scrubbed. Pools are handled one at a time and a failing pool never stops
//! the others.

use crate::adapters::traits::IdentityDirectory;
use crate::anonymization::Scrubber;
use crate::core::export::summary::{ExportError, ExportErrorType};
use crate::core::pagination::fetch_all_pages;
use crate::domain::{CognitoError, Member, PoolExport, PoolId, PoolUser};
use std::time::Duration;

/// Attributes requested from every pool on the first attempt
pub const FULL_USER_ATTRIBUTES: &[&str] = &[
    "email",
    "given_name",
    "family_name",
    "custom:company",
    "custom:title",
];

/// Attributes requested when a pool rejects the full set
pub const FALLBACK_USER_ATTRIBUTES: &[&str] = &["email"];

/// Outcome of resolving a list of pool ids
#[derive(Debug, Default)]
pub struct PoolResolution {
    /// Pools in input order, users scrubbed
    pub pools: Vec<PoolExport>,

    /// Ids whose pool no longer exists
    pub missing_pools: Vec<PoolId>,

    /// Pools skipped because of another failure
    pub errors: Vec<ExportError>,
}

/// Distinct `authPoolId` values in first-occurrence order
///
/// Members without a string `authPoolId` are left out with a warning.
pub fn distinct_pool_ids(members: &[Member]) -> Vec<PoolId> {
    let mut pool_ids: Vec<PoolId> = Vec::new();
    let mut without_pool = 0usize;

    for member in members {
        match member.auth_pool_id().map(PoolId::new) {
            Some(Ok(pool_id)) => {
                if !pool_ids.contains(&pool_id) {
                    pool_ids.push(pool_id);
                }
            }
            _ => without_pool += 1,
        }
    }

    if without_pool > 0 {
        tracing::warn!(
            members = without_pool,
            "Members without an authPoolId were left out of pool resolution"
        );
    }

    pool_ids
}

/// Resolves pool ids against an identity directory
pub struct PoolResolver<'a> {
    directory: &'a dyn IdentityDirectory,
    page_delay: Duration,
}

impl<'a> PoolResolver<'a> {
    /// Create a resolver that waits `page_delay` before every user page
    pub fn new(directory: &'a dyn IdentityDirectory, page_delay: Duration) -> Self {
        Self {
            directory,
            page_delay,
        }
    }

    /// Resolve every pool id in order, scrubbing users as they arrive
    pub async fn resolve_pools(
        &self,
        pool_ids: &[PoolId],
        scrubber: &mut Scrubber,
    ) -> PoolResolution {
        let mut resolution = PoolResolution::default();

        for pool_id in pool_ids {
            let pool_name = match self.directory.describe_pool(pool_id).await {
                Ok(name) => name,
                Err(e) if e.is_pool_not_found() => {
                    tracing::warn!(pool_id = %pool_id, "User pool not found, recording as missing");
                    resolution.missing_pools.push(pool_id.clone());
                    continue;
                }
                Err(e) => {
                    crate::log_error_with_context!(&e, "Failed to describe user pool");
                    resolution.errors.push(
                        ExportError::new(ExportErrorType::PoolDescribe, e.to_string())
                            .for_pool(pool_id.clone()),
                    );
                    continue;
                }
            };

            crate::log_pool_start!(pool_id, pool_name);

            let users = match self.fetch_pool_users(pool_id).await {
                Ok(users) => users,
                Err(e) => {
                    crate::log_error_with_context!(&e, "Failed to list pool users");
                    resolution.errors.push(
                        ExportError::new(ExportErrorType::PoolUsers, e.to_string())
                            .for_pool(pool_id.clone()),
                    );
                    continue;
                }
            };

            tracing::info!(pool_id = %pool_id, users = users.len(), "Found users in pool");

            let users: Vec<PoolUser> = users
                .iter()
                .map(|user| scrubber.scrub_pool_user(user))
                .collect();

            crate::log_pool_complete!(pool_id, pool_name, users.len());

            resolution.pools.push(PoolExport {
                pool_id: pool_id.clone(),
                pool_name,
                users,
            });
        }

        resolution
    }

    /// List every user of a pool
    ///
    /// Requests [`FULL_USER_ATTRIBUTES`] first. If the pool rejects one of
    /// them, the whole listing is repeated once with
    /// [`FALLBACK_USER_ATTRIBUTES`].
    ///
    /// # Errors
    ///
    /// Returns the first failure other than an unknown attribute, or any
    /// failure of the retry.
    pub async fn fetch_pool_users(&self, pool_id: &PoolId) -> Result<Vec<PoolUser>, CognitoError> {
        match self.list_all_users(pool_id, FULL_USER_ATTRIBUTES).await {
            Err(e) if e.is_unknown_attribute() => {
                crate::log_retry_attempt!(1, 1, e.to_string().as_str());
                self.list_all_users(pool_id, FALLBACK_USER_ATTRIBUTES).await
            }
            other => other,
        }
    }

    async fn list_all_users(
        &self,
        pool_id: &PoolId,
        attributes: &[&str],
    ) -> Result<Vec<PoolUser>, CognitoError> {
        let attributes: Vec<String> = attributes.iter().map(|a| a.to_string()).collect();
        let attributes = attributes.as_slice();
        let directory = self.directory;
        let page_delay = self.page_delay;

        fetch_all_pages(move |cursor| async move {
            tokio::time::sleep(page_delay).await;
            directory.list_users_page(pool_id, attributes, cursor).await
        })
        .await
    }
}
