//! Domain models and types for the exporter.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`PoolId`], [`TableKind`])
//! - **Records** ([`Member`], [`PoolUser`], [`PoolExport`], [`ExportBundle`])
//! - **Error types** ([`ExporterError`], [`DynamoDbError`], [`CognitoError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, ExporterError>`]:
//!
//! ```rust
//! use crowsnest_export::domain::{ExporterError, PoolId, Result};
//!
//! fn parse(raw: &str) -> Result<PoolId> {
//!     PoolId::new(raw).map_err(ExporterError::Validation)
//! }
//!
//! assert!(parse("us-east-1_abc").is_ok());
//! assert!(parse("").is_err());
//! ```

pub mod bundle;
pub mod errors;
pub mod ids;
pub mod member;
pub mod pool;
pub mod result;

// Re-export commonly used types for convenience
pub use bundle::ExportBundle;
pub use errors::{CognitoError, DynamoDbError, ExporterError};
pub use ids::{PoolId, TableKind};
pub use member::{Item, Member};
pub use pool::{MfaOption, PoolExport, PoolUser, UserAttribute};
pub use result::Result;
