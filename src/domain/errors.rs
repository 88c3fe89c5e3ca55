//! Domain error types
//!
//! This module defines the error hierarchy for the exporter. SDK error types
//! are converted at the adapter boundary and never appear here.

use thiserror::Error;

/// Main exporter error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum ExporterError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// DynamoDB-related errors
    #[error("DynamoDB error: {0}")]
    DynamoDb(#[from] DynamoDbError),

    /// Cognito-related errors
    #[error("Cognito error: {0}")]
    Cognito(#[from] CognitoError),

    /// The assembled configuration failed validation
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

/// DynamoDB-specific errors
#[derive(Debug, Error)]
pub enum DynamoDbError {
    /// A scan request failed
    #[error("Scan of table {table} failed: {message}")]
    ScanFailed { table: String, message: String },

    /// An item or cursor could not be converted between wire and JSON form
    #[error("Invalid item: {0}")]
    InvalidItem(String),
}

/// Cognito-specific errors
///
/// `PoolNotFound` and `UnknownAttribute` are the two conditions the pool
/// resolver treats specially; everything else is a plain failure.
#[derive(Debug, Error)]
pub enum CognitoError {
    /// The user pool does not exist
    #[error("User pool not found: {0}")]
    PoolNotFound(String),

    /// One or more requested attributes are not defined on the pool schema
    #[error("Unknown attribute requested from pool {pool_id}: {message}")]
    UnknownAttribute { pool_id: String, message: String },

    /// DescribeUserPool failed for a reason other than a missing pool
    #[error("Failed to describe pool {pool_id}: {message}")]
    DescribePoolFailed { pool_id: String, message: String },

    /// ListUsers failed
    #[error("Failed to list users of pool {pool_id}: {message}")]
    ListUsersFailed { pool_id: String, message: String },

    /// The service answered with something we cannot use
    #[error("Invalid response from Cognito: {0}")]
    InvalidResponse(String),
}

impl CognitoError {
    /// True when the pool does not exist
    pub fn is_pool_not_found(&self) -> bool {
        matches!(self, CognitoError::PoolNotFound(_))
    }

    /// True when the request named attributes the pool does not define
    pub fn is_unknown_attribute(&self) -> bool {
        matches!(self, CognitoError::UnknownAttribute { .. })
    }
}

impl From<std::io::Error> for ExporterError {
    fn from(err: std::io::Error) -> Self {
        ExporterError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ExporterError {
    fn from(err: serde_json::Error) -> Self {
        ExporterError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for ExporterError {
    fn from(err: toml::de::Error) -> Self {
        ExporterError::Configuration(format!("TOML parse error: {err}"))
    }
}
