//! Structured logging setup using tracing
//!
//! Progress goes to stderr in compact form so stdout stays free for the
//! export summary. With `logging.local_enabled`, every event is also written
//! as a flat JSON line (`{"pool_id": ..., "users": ..., "message": ...}`) to
//! a rolling `crowsnest-export.log` file that can be queried with `jq`.
//!
//! # Example
//!
//! ```no_run
//! use crowsnest_export::logging::init_logging;
//! use crowsnest_export::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//! ```

use crate::config::LoggingConfig;
use crate::domain::{ExporterError, Result};
use std::path::Path;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// File name prefix of the rolling log
pub const LOG_FILE_PREFIX: &str = "crowsnest-export.log";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Keeps the file writer alive; dropping it flushes pending lines
pub struct LoggingGuard(Option<WorkerGuard>);

/// Install the global subscriber
///
/// `RUST_LOG` takes precedence over `log_level` when set.
///
/// # Errors
///
/// Returns an error for an unknown level, if the log directory cannot be
/// created, or if a global subscriber is already installed.
pub fn init_logging(log_level: &str, config: &LoggingConfig) -> Result<LoggingGuard> {
    let level = parse_log_level(log_level)?;

    let mut layers: Vec<BoxedLayer> = vec![tracing_subscriber::fmt::layer()
        .compact()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(exporter_filter(level))
        .boxed()];

    let file_guard = if config.local_enabled {
        let (layer, guard) = json_file_layer(config, level)?;
        layers.push(layer);
        Some(guard)
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .map_err(|e| ExporterError::Configuration(format!("Failed to install logger: {e}")))?;

    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        file_logging = config.local_enabled,
        "Logging initialized"
    );

    Ok(LoggingGuard(file_guard))
}

/// Events from this crate at `level`, plus AWS credential and region
/// resolution warnings
fn exporter_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("crowsnest_export={level},aws_config=warn"))
    })
}

fn json_file_layer(config: &LoggingConfig, level: Level) -> Result<(BoxedLayer, WorkerGuard)> {
    let dir = Path::new(&config.local_path);
    std::fs::create_dir_all(dir).map_err(|e| {
        ExporterError::Configuration(format!(
            "Failed to create log directory {}: {}",
            dir.display(),
            e
        ))
    })?;

    let appender = RollingFileAppender::new(rotation(&config.local_rotation), dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let layer = tracing_subscriber::fmt::layer()
        .json()
        .flatten_event(true)
        .with_current_span(false)
        .with_writer(writer)
        .with_filter(exporter_filter(level))
        .boxed();

    Ok((layer, guard))
}

fn rotation(name: &str) -> Rotation {
    match name {
        "hourly" => Rotation::HOURLY,
        _ => Rotation::DAILY,
    }
}

fn parse_log_level(level: &str) -> Result<Level> {
    level.parse().map_err(|_| {
        ExporterError::Configuration(format!(
            "Invalid log level: {level}. Must be one of: trace, debug, info, warn, error"
        ))
    })
}
