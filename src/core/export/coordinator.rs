//! Export coordinator - main orchestrator for the export process
//!
//! This module runs one export end to end: scan members, resolve and scrub
//! their identity pools, scan tenants and domains, scrub members, then write
//! the five artifacts.

use crate::adapters::aws::AwsClientBuilder;
use crate::adapters::traits::{IdentityDirectory, TableScanner};
use crate::adapters::{CognitoDirectory, DynamoDbScanner};
use crate::anonymization::Scrubber;
use crate::config::ExporterConfig;
use crate::core::export::summary::ExportSummary;
use crate::core::export::writer::ExportWriter;
use crate::core::pagination::fetch_all_pages;
use crate::core::pools::{distinct_pool_ids, PoolResolver};
use crate::domain::{ExportBundle, ExporterError, Item, Member, Result, TableKind};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Export coordinator
pub struct ExportCoordinator {
    config: ExporterConfig,
    scanner: Arc<dyn TableScanner>,
    directory: Arc<dyn IdentityDirectory>,
}

impl ExportCoordinator {
    /// Create a coordinator backed by the AWS SDK clients
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub async fn new(config: ExporterConfig) -> Result<Self> {
        config.validate().map_err(ExporterError::Validation)?;

        let (dynamodb, cognito) = AwsClientBuilder::new(&config.aws).build_clients().await;

        tracing::debug!(
            region = %config.aws.region,
            static_credentials = config.aws.has_static_credentials(),
            "AWS clients created"
        );

        Ok(Self::with_clients(
            config,
            Arc::new(DynamoDbScanner::new(dynamodb)),
            Arc::new(CognitoDirectory::new(cognito)),
        ))
    }

    /// Create a coordinator over arbitrary collaborators
    pub fn with_clients(
        config: ExporterConfig,
        scanner: Arc<dyn TableScanner>,
        directory: Arc<dyn IdentityDirectory>,
    ) -> Self {
        Self {
            config,
            scanner,
            directory,
        }
    }

    /// Execute the export
    ///
    /// Steps, in order:
    /// 1. Scan the Member table
    /// 2. Resolve each distinct pool id, scrubbing its users; missing or
    ///    failing pools are recorded and skipped
    /// 3. Scan the Tenant and Domain tables
    /// 4. Scrub members
    /// 5. Write `members.json`, `pools.json`, `tenants.json`,
    ///    `domains.json` and `missingPools.json`
    ///
    /// # Errors
    ///
    /// Table scan failures and write failures abort the export. Pool-scoped
    /// failures are reported in the summary instead.
    pub async fn execute_export(&self) -> Result<ExportSummary> {
        let start_time = Instant::now();
        let mut summary = ExportSummary::new();

        tracing::info!(
            stage = %self.config.export.stage,
            region = %self.config.aws.region,
            "Starting export process"
        );

        let mut scrubber = Scrubber::from_config(&self.config.scrubber)
            .map_err(|e| ExporterError::Configuration(format!("{e:#}")))?;

        let members: Vec<Member> = self
            .scan_table(TableKind::Member)
            .await?
            .into_iter()
            .map(Member::from_item)
            .collect();
        summary.total_members = members.len();

        let pool_ids = distinct_pool_ids(&members);
        summary.pools_referenced = pool_ids.len();
        tracing::info!(pools = pool_ids.len(), "Found distinct user pools");

        let resolver = PoolResolver::new(
            self.directory.as_ref(),
            Duration::from_millis(self.config.export.page_delay_ms),
        );
        let resolution = resolver.resolve_pools(&pool_ids, &mut scrubber).await;

        summary.missing_pools = resolution.missing_pools.len();
        summary.failed_pools = resolution.errors.len();
        for error in resolution.errors {
            summary.add_error(error);
        }

        let tenants = self.scan_table(TableKind::Tenant).await?;
        let domains = self.scan_table(TableKind::Domain).await?;

        let members: Vec<Member> = members
            .iter()
            .map(|member| scrubber.scrub_member(member))
            .collect();
        tracing::info!(members = members.len(), "Scrubbed member emails");

        let bundle = ExportBundle {
            members,
            pools: resolution.pools,
            tenants,
            domains,
            missing_pools: resolution.missing_pools,
        };

        summary.pools_exported = bundle.pools.len();
        summary.total_pool_users = bundle.total_pool_users();
        summary.total_tenants = bundle.tenants.len();
        summary.total_domains = bundle.domains.len();
        summary.scrub = scrubber.stats();

        let writer = ExportWriter::new(self.config.output_subdir());
        let output_dir = writer.write_bundle(&bundle)?;
        summary.output_dir = Some(output_dir);

        Ok(summary.with_duration(start_time.elapsed()))
    }

    /// Scan every page of one of the auth tables
    async fn scan_table(&self, kind: TableKind) -> Result<Vec<Item>> {
        let table = self.config.table_name(kind);
        tracing::info!(table = %table, "Fetching all items from table");

        let scanner = self.scanner.as_ref();
        let table_name = table.as_str();
        let items = fetch_all_pages(move |cursor| scanner.scan_page(table_name, cursor)).await?;

        tracing::info!(table = %table, items = items.len(), "Found items in table");
        Ok(items)
    }
}
