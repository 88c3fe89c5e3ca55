//! The five datasets produced by one export run

use super::ids::PoolId;
use super::member::{Item, Member};
use super::pool::PoolExport;

/// Everything one export run persists
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportBundle {
    /// Scrubbed members
    pub members: Vec<Member>,

    /// Resolved pools with their scrubbed users
    pub pools: Vec<PoolExport>,

    /// Tenant records, unmodified
    pub tenants: Vec<Item>,

    /// Domain records, unmodified
    pub domains: Vec<Item>,

    /// Pool ids referenced by members that no longer exist
    pub missing_pools: Vec<PoolId>,
}

impl ExportBundle {
    /// Total number of pool users across all pools
    pub fn total_pool_users(&self) -> usize {
        self.pools.iter().map(|pool| pool.users.len()).sum()
    }
}
