//! Configuration management for the exporter.
//!
//! # Overview
//!
//! Configuration is layered:
//! - Built-in defaults for every setting
//! - An optional TOML file with `${VAR_NAME}` substitution
//! - `CROWSNEST_<SECTION>_<KEY>` environment overrides
//! - AWS credentials from `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY`
//!   and `AWS_SESSION_TOKEN`
//! - Command-line flags (`--stage`, `--region`, ...)
//!
//! The resulting [`ExporterConfig`] is built once and handed to every
//! component that talks to AWS or the filesystem.
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level
//! - [`AwsConfig`] - Region, credentials, endpoint overrides
//! - [`ExportConfig`] - Stage, table prefix, output directory, page delay
//! - [`ScrubberConfig`] - Allow-list, identity reuse policy, audit log
//! - [`LoggingConfig`] - Optional rolling JSON file logs
//!
//! # Example Configuration
//!
//! ```toml
//! [aws]
//! region = "us-east-1"
//! secret_access_key = "${EXPORT_SECRET_KEY}"
//! access_key_id = "AKIAEXAMPLE"
//!
//! [export]
//! stage = "dev"
//! output_dir = "./data"
//! page_delay_ms = 500
//!
//! [scrubber]
//! allowed_domains = ["cleo.com", "mailosaur.io"]
//! policy = "per_run"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use crate::anonymization::config::ScrubberConfig;
pub use loader::load_config;
pub use schema::{ApplicationConfig, AwsConfig, ExportConfig, ExporterConfig, LoggingConfig};
pub use secret::{secret_string, secret_string_opt, SecretString, SecretValue};
