// crowsnest-export - Auth data snapshot tool with PII scrubbing
// Copyright (c) 2025 Crowsnest Contributors
// Licensed under the MIT License

//! # crowsnest-export - Auth data snapshots with PII scrubbed
//!
//! crowsnest-export copies the authentication data of one deployment stage
//! (members, tenants, domains and the users of every referenced Cognito user
//! pool) into local JSON files, replacing personal data on the way so the
//! snapshot can seed development and test environments.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Scanning** the `Member`, `Tenant` and `Domain` DynamoDB tables of a stage
//! - **Resolving** each referenced user pool and listing all of its users
//! - **Scrubbing** emails and names into synthetic `adjective.noun@domain` identities
//! - **Writing** five pretty-printed JSON files to `<output_dir>/<stage>_<region>/`
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Export orchestration, pagination and pool resolution
//! - [`adapters`] - DynamoDB and Cognito integrations behind traits
//! - [`anonymization`] - The PII scrubber and name generation
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use crowsnest_export::config::load_config;
//! use crowsnest_export::core::export::ExportCoordinator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut config = load_config(None)?;
//!     config.export.stage = "dev".to_string();
//!     config.aws.region = "us-east-1".to_string();
//!
//!     let coordinator = ExportCoordinator::new(config).await?;
//!     let summary = coordinator.execute_export().await?;
//!
//!     println!("Exported {} members", summary.total_members);
//!     Ok(())
//! }
//! ```
//!
//! ## Scrubbing
//!
//! Emails whose domain ends with an allow-listed suffix (`cleo.com` and
//! `mailosaur.io` by default) are kept. Every other email is replaced while
//! its domain is preserved, so tenant lookups by domain keep working:
//!
//! ```rust
//! use crowsnest_export::anonymization::{MonikerGenerator, ScrubPolicy, Scrubber};
//! use crowsnest_export::domain::Member;
//! use serde_json::json;
//!
//! let mut scrubber = Scrubber::new(
//!     vec!["cleo.com".to_string()],
//!     ScrubPolicy::PerRun,
//!     Box::new(MonikerGenerator::new()),
//! );
//!
//! let member: Member = serde_json::from_value(json!({"email": {"S": "jo@acme.io"}}))?;
//! let scrubbed = scrubber.scrub_member(&member);
//! assert!(scrubbed.email().unwrap().ends_with("@acme.io"));
//! # Ok::<(), serde_json::Error>(())
//! ```
//!
//! ## Error Handling
//!
//! Library code returns [`domain::Result`], backed by [`domain::ExporterError`]:
//!
//! ```rust,no_run
//! use crowsnest_export::domain::ExporterError;
//!
//! fn example() -> Result<(), ExporterError> {
//!     let config = crowsnest_export::config::load_config(None)?;
//!     config.validate().map_err(ExporterError::Configuration)?;
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod anonymization;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
