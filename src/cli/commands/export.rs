//! Export command implementation
//!
//! This module implements the `export` command, which snapshots the auth
//! tables and identity pools of one stage into scrubbed JSON files.

use crate::anonymization::ScrubPolicy;
use crate::config::ExporterConfig;
use crate::core::export::{ExportCoordinator, ExportSummary};
use clap::Args;

/// Arguments for the export command
#[derive(Args, Debug, Default)]
pub struct ExportArgs {
    /// Deployment stage whose tables are exported (e.g. prod, dev, PR123)
    #[arg(short, long, env = "CROWSNEST_STAGE")]
    pub stage: Option<String>,

    /// AWS region of the tables and user pools
    #[arg(short, long, env = "CROWSNEST_REGION")]
    pub region: Option<String>,

    /// Root directory for the exported data
    #[arg(short, long)]
    pub output_dir: Option<String>,

    /// Delay before each user pool page request, in milliseconds
    #[arg(long, value_name = "MS")]
    pub page_delay_ms: Option<u64>,

    /// Draw a fresh synthetic identity on every scrub instead of reusing one per email
    #[arg(long)]
    pub no_memoize: bool,
}

impl ExportArgs {
    /// Apply command-line overrides on top of the loaded configuration
    pub fn apply_overrides(&self, config: &mut ExporterConfig) {
        if let Some(stage) = &self.stage {
            tracing::debug!(stage = %stage, "Overriding stage from CLI");
            config.export.stage = stage.clone();
        }

        if let Some(region) = &self.region {
            tracing::debug!(region = %region, "Overriding region from CLI");
            config.aws.region = region.clone();
        }

        if let Some(output_dir) = &self.output_dir {
            tracing::debug!(output_dir = %output_dir, "Overriding output directory from CLI");
            config.export.output_dir = output_dir.clone();
        }

        if let Some(page_delay_ms) = self.page_delay_ms {
            tracing::debug!(page_delay_ms, "Overriding page delay from CLI");
            config.export.page_delay_ms = page_delay_ms;
        }

        if self.no_memoize {
            tracing::debug!("Disabling identity reuse from CLI");
            config.scrubber.policy = ScrubPolicy::PerCall;
        }
    }

    /// Execute the export command
    ///
    /// Returns the process exit code: 0 on completion (pool-scoped failures
    /// included), 2 for configuration errors, 5 for anything that aborted
    /// the export.
    pub async fn execute(&self, mut config: ExporterConfig) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        self.apply_overrides(&mut config);

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2);
        }

        tracing::info!(
            member_table = %config.table_name(crate::domain::TableKind::Member),
            output_dir = %config.output_subdir().display(),
            "Export configuration"
        );

        let coordinator = match ExportCoordinator::new(config).await {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Unhandled Error");
                eprintln!("Failed to initialize export: {e}");
                return Ok(5);
            }
        };

        println!("🚀 Starting export...");
        println!();

        let summary = match coordinator.execute_export().await {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Unhandled Error");
                eprintln!("Export failed: {e}");
                return Ok(5);
            }
        };

        summary.log_summary();
        print_summary(&summary);

        Ok(0)
    }
}

fn print_summary(summary: &ExportSummary) {
    println!();
    println!("📊 Export Summary:");
    println!("  Members: {}", summary.total_members);
    println!(
        "  Pools: {} exported, {} missing, {} failed (of {})",
        summary.pools_exported, summary.missing_pools, summary.failed_pools, summary.pools_referenced
    );
    println!("  Pool Users: {}", summary.total_pool_users);
    println!("  Tenants: {}", summary.total_tenants);
    println!("  Domains: {}", summary.total_domains);
    println!(
        "  Scrubbed: {} (allow-listed: {}, skipped: {})",
        summary.scrub.scrubbed, summary.scrub.allow_listed, summary.scrub.skipped
    );
    println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
    if let Some(output_dir) = &summary.output_dir {
        println!("  Output: {}", output_dir.display());
    }

    if !summary.errors.is_empty() {
        println!();
        println!("⚠️  Pool Errors:");
        for error in &summary.errors {
            match &error.pool_id {
                Some(pool_id) => println!("  - {pool_id}: {}", error.message),
                None => println!("  - {}", error.message),
            }
        }
    }

    println!();
    println!("✅ Export completed");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_applied() {
        let args = ExportArgs {
            stage: Some("PR123".to_string()),
            region: Some("eu-west-1".to_string()),
            output_dir: Some("/tmp/out".to_string()),
            page_delay_ms: Some(0),
            no_memoize: true,
        };
        let mut config = ExporterConfig::default();

        args.apply_overrides(&mut config);

        assert_eq!(config.export.stage, "PR123");
        assert_eq!(config.aws.region, "eu-west-1");
        assert_eq!(config.export.output_dir, "/tmp/out");
        assert_eq!(config.export.page_delay_ms, 0);
        assert_eq!(config.scrubber.policy, ScrubPolicy::PerCall);
    }

    #[test]
    fn test_absent_flags_keep_config() {
        let mut config = ExporterConfig::default();
        config.export.stage = "dev".to_string();

        ExportArgs::default().apply_overrides(&mut config);

        assert_eq!(config.export.stage, "dev");
        assert_eq!(config.export.page_delay_ms, 500);
        assert_eq!(config.scrubber.policy, ScrubPolicy::PerRun);
    }

    #[tokio::test]
    async fn test_missing_stage_is_config_error() {
        let args = ExportArgs {
            region: Some("us-east-1".to_string()),
            ..Default::default()
        };

        let code = args.execute(ExporterConfig::default()).await.unwrap();
        assert_eq!(code, 2);
    }
}
