//! Core business logic for the exporter.
//!
//! # Modules
//!
//! - [`export`] - Export orchestration, artifact writing and summaries
//! - [`pagination`] - Draining cursor-based APIs
//! - [`pools`] - Identity pool resolution with the attribute-narrowing retry
//!
//! # Export Workflow
//!
//! 1. **Members**: Scan `<prefix>-<stage>.Member`
//! 2. **Pools**: Describe each distinct `authPoolId`, list and scrub its users
//! 3. **Tenants and domains**: Scan both tables, passed through untouched
//! 4. **Scrub**: Replace member emails
//! 5. **Persist**: Write five JSON files to `<output_dir>/<stage>_<region>/`
//!
//! # Example
//!
//! ```rust,no_run
//! use crowsnest_export::config::load_config;
//! use crowsnest_export::core::export::ExportCoordinator;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut config = load_config(None)?;
//! config.export.stage = "dev".to_string();
//! config.aws.region = "us-east-1".to_string();
//!
//! let coordinator = ExportCoordinator::new(config).await?;
//! let summary = coordinator.execute_export().await?;
//!
//! println!("Members: {}", summary.total_members);
//! println!("Missing pools: {}", summary.missing_pools);
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod pagination;
pub mod pools;
