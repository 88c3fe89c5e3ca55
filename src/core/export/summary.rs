//! Export summary and reporting
//!
//! This module defines structures for tracking and reporting export results.

use crate::anonymization::ScrubStats;
use crate::domain::PoolId;
use std::path::PathBuf;
use std::time::Duration;

/// Summary of an export operation
#[derive(Debug, Clone)]
pub struct ExportSummary {
    /// Members scanned from the Member table
    pub total_members: usize,

    /// Distinct pool ids referenced by members
    pub pools_referenced: usize,

    /// Pools written to `pools.json`
    pub pools_exported: usize,

    /// Pools that no longer exist
    pub missing_pools: usize,

    /// Pools skipped because describing or listing them failed
    pub failed_pools: usize,

    /// Users across all exported pools
    pub total_pool_users: usize,

    /// Tenant records
    pub total_tenants: usize,

    /// Domain records
    pub total_domains: usize,

    /// Scrubber counters for members and pool users combined
    pub scrub: ScrubStats,

    /// Directory the artifacts were written to
    pub output_dir: Option<PathBuf>,

    /// Duration of the export
    pub duration: Duration,

    /// Pool-scoped errors encountered during export
    pub errors: Vec<ExportError>,
}

impl ExportSummary {
    /// Create a new empty export summary
    pub fn new() -> Self {
        Self {
            total_members: 0,
            pools_referenced: 0,
            pools_exported: 0,
            missing_pools: 0,
            failed_pools: 0,
            total_pool_users: 0,
            total_tenants: 0,
            total_domains: 0,
            scrub: ScrubStats::default(),
            output_dir: None,
            duration: Duration::from_secs(0),
            errors: Vec::new(),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Add an error
    pub fn add_error(&mut self, error: ExportError) {
        self.errors.push(error);
    }

    /// Check if every referenced pool was either exported or reported missing
    pub fn is_successful(&self) -> bool {
        self.failed_pools == 0 && self.errors.is_empty()
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            members = self.total_members,
            pools_referenced = self.pools_referenced,
            pools_exported = self.pools_exported,
            missing_pools = self.missing_pools,
            failed_pools = self.failed_pools,
            pool_users = self.total_pool_users,
            tenants = self.total_tenants,
            domains = self.total_domains,
            scrubbed = self.scrub.scrubbed,
            allow_listed = self.scrub.allow_listed,
            duration_secs = self.duration.as_secs(),
            output_dir = ?self.output_dir,
            "Export completed"
        );

        if !self.errors.is_empty() {
            tracing::warn!(
                error_count = self.errors.len(),
                "Export completed with errors"
            );
            for error in &self.errors {
                tracing::warn!(
                    error_type = ?error.error_type,
                    pool_id = ?error.pool_id.as_ref().map(PoolId::as_str),
                    message = %error.message,
                    "Export error"
                );
            }
        }
    }
}

impl Default for ExportSummary {
    fn default() -> Self {
        Self::new()
    }
}

/// Type of export error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportErrorType {
    /// DescribeUserPool failed for a reason other than a missing pool
    PoolDescribe,
    /// Listing a pool's users failed, including after the narrowing retry
    PoolUsers,
}

/// Pool-scoped export error
#[derive(Debug, Clone)]
pub struct ExportError {
    /// Type of error
    pub error_type: ExportErrorType,

    /// Error message
    pub message: String,

    /// Pool the error belongs to
    pub pool_id: Option<PoolId>,
}

impl ExportError {
    /// Create a new export error
    pub fn new(error_type: ExportErrorType, message: String) -> Self {
        Self {
            error_type,
            message,
            pool_id: None,
        }
    }

    /// Attach the pool the error belongs to
    pub fn for_pool(mut self, pool_id: PoolId) -> Self {
        self.pool_id = Some(pool_id);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_summary_creation() {
        let summary = ExportSummary::new();

        assert_eq!(summary.total_members, 0);
        assert_eq!(summary.pools_exported, 0);
        assert_eq!(summary.missing_pools, 0);
        assert_eq!(summary.duration, Duration::from_secs(0));
        assert!(summary.errors.is_empty());
        assert!(summary.output_dir.is_none());
    }

    #[test]
    fn test_export_summary_with_duration() {
        let summary = ExportSummary::new().with_duration(Duration::from_secs(120));

        assert_eq!(summary.duration, Duration::from_secs(120));
    }

    #[test]
    fn test_missing_pools_do_not_fail_export() {
        let mut summary = ExportSummary::new();
        summary.missing_pools = 3;
        assert!(summary.is_successful());

        summary.failed_pools = 1;
        assert!(!summary.is_successful());
    }

    #[test]
    fn test_export_error_for_pool() {
        let pool_id = PoolId::new("us-east-1_abc").unwrap();
        let error = ExportError::new(ExportErrorType::PoolUsers, "throttled".to_string())
            .for_pool(pool_id.clone());

        assert_eq!(error.error_type, ExportErrorType::PoolUsers);
        assert_eq!(error.pool_id, Some(pool_id));
    }

    #[test]
    fn test_export_summary_add_error() {
        let mut summary = ExportSummary::new();
        summary.add_error(ExportError::new(
            ExportErrorType::PoolDescribe,
            "access denied".to_string(),
        ));

        assert_eq!(summary.errors.len(), 1);
        assert!(!summary.is_successful());
    }
}
