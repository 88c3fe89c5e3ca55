//! Audit logging module
//!
//! Records every scrub decision with the original email hashed.

pub mod logger;

pub use logger::{AuditLogger, RecordKind, ScrubOutcome};
