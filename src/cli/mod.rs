//! CLI interface and argument parsing
//!
//! This module provides the command-line interface using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// crowsnest-export - Snapshot auth data with PII scrubbed
#[derive(Parser, Debug)]
#[command(name = "crowsnest-export")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to an optional TOML configuration file
    #[arg(short, long, global = true, env = "CROWSNEST_CONFIG")]
    pub config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true, env = "CROWSNEST_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute; help is printed when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export members, pools, tenants and domains of one stage to JSON files
    Export(commands::export::ExportArgs),
}
