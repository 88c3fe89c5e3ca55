// crowsnest-export - Auth data snapshot tool with PII scrubbing
// Copyright (c) 2025 Crowsnest Contributors
// Licensed under the MIT License

use clap::{CommandFactory, Parser};
use crowsnest_export::cli::{Cli, Commands};
use crowsnest_export::config::{load_config, ExporterConfig, LoggingConfig};
use crowsnest_export::logging::init_logging;
use std::path::Path;
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // No subcommand: show help and leave without touching AWS or the disk
    let Some(command) = &cli.command else {
        let _ = Cli::command().print_help();
        println!();
        process::exit(0);
    };

    let loaded = load_config(cli.config.as_deref().map(Path::new));

    let (log_level, logging_config) = match &loaded {
        Ok(config) => (
            cli.log_level
                .clone()
                .unwrap_or_else(|| config.application.log_level.clone()),
            config.logging.clone(),
        ),
        Err(_) => (
            cli.log_level.clone().unwrap_or_else(|| "info".to_string()),
            LoggingConfig::default(),
        ),
    };

    let logging_guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(2);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "crowsnest-export - Auth data snapshot tool"
    );

    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load configuration");
            eprintln!("Failed to load configuration: {e}");
            process::exit(2);
        }
    };

    let exit_code = match execute_command(command, config).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Unhandled Error");
            eprintln!("Error: {e}");
            5
        }
    };

    // Flush file logs before exiting
    drop(logging_guard);
    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(command: &Commands, config: ExporterConfig) -> anyhow::Result<i32> {
    match command {
        Commands::Export(args) => args.execute(config).await,
    }
}
