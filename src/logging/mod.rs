//! Logging and observability
//!
//! Progress of an export is reported as structured `tracing` events:
//! items fetched per table, pools found, users per pool, scrub completion
//! and the final output location.

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log the start of work on one identity pool
///
/// # Example
///
/// ```no_run
/// use crowsnest_export::log_pool_start;
/// use crowsnest_export::domain::ids::PoolId;
///
/// let pool_id = PoolId::new("us-east-1_abc").unwrap();
/// log_pool_start!(&pool_id, "Engineering");
/// ```
#[macro_export]
macro_rules! log_pool_start {
    ($pool_id:expr, $pool_name:expr) => {
        tracing::info!(
            pool_id = %$pool_id,
            pool_name = %$pool_name,
            "Fetching all users from pool"
        );
    };
}

/// Log the users found and scrubbed for one pool
///
/// # Example
///
/// ```no_run
/// use crowsnest_export::log_pool_complete;
///
/// log_pool_complete!("us-east-1_abc", "Engineering", 42);
/// ```
#[macro_export]
macro_rules! log_pool_complete {
    ($pool_id:expr, $pool_name:expr, $user_count:expr) => {
        tracing::info!(
            pool_id = %$pool_id,
            pool_name = %$pool_name,
            users = $user_count,
            "Scrubbed user names and emails for pool"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use crowsnest_export::log_error_with_context;
/// use crowsnest_export::domain::ExporterError;
///
/// let error = ExporterError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

/// Log a retry attempt
///
/// # Example
///
/// ```no_run
/// use crowsnest_export::log_retry_attempt;
///
/// log_retry_attempt!(1, 1, "Unknown attribute requested");
/// ```
#[macro_export]
macro_rules! log_retry_attempt {
    ($attempt:expr, $max_attempts:expr, $reason:expr) => {
        tracing::warn!(
            attempt = $attempt,
            max_attempts = $max_attempts,
            reason = $reason,
            "Retrying operation"
        );
    };
}
