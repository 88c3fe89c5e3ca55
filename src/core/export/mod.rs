//! Export orchestration and persistence
//!
//! This module provides the export workflow, including:
//! - Export coordination and orchestration
//! - Writing the JSON artifacts
//! - Summary and reporting

pub mod coordinator;
pub mod summary;
pub mod writer;

pub use coordinator::ExportCoordinator;
pub use summary::{ExportError, ExportErrorType, ExportSummary};
pub use writer::ExportWriter;
