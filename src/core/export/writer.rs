//! Writes the export artifacts to disk
//!
//! One run produces exactly five pretty-printed JSON files in the output
//! directory. Existing files are overwritten.

use crate::domain::{ExportBundle, ExporterError, Result};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const MEMBERS_FILE: &str = "members.json";
pub const POOLS_FILE: &str = "pools.json";
pub const TENANTS_FILE: &str = "tenants.json";
pub const DOMAINS_FILE: &str = "domains.json";
pub const MISSING_POOLS_FILE: &str = "missingPools.json";

/// Writes an [`ExportBundle`] into one directory
pub struct ExportWriter {
    output_dir: PathBuf,
}

impl ExportWriter {
    /// Create a writer targeting `output_dir`
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Target directory
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Create the directory and write all five artifacts
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or any file
    /// cannot be written.
    pub fn write_bundle(&self, bundle: &ExportBundle) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir).map_err(|e| {
            ExporterError::Io(format!(
                "Failed to create output directory {}: {}",
                self.output_dir.display(),
                e
            ))
        })?;

        self.write_json(MEMBERS_FILE, &bundle.members)?;
        self.write_json(POOLS_FILE, &bundle.pools)?;
        self.write_json(TENANTS_FILE, &bundle.tenants)?;
        self.write_json(DOMAINS_FILE, &bundle.domains)?;
        self.write_json(MISSING_POOLS_FILE, &bundle.missing_pools)?;

        tracing::info!(output_dir = %self.output_dir.display(), "Wrote export artifacts");

        Ok(self.output_dir.clone())
    }

    fn write_json<T: Serialize + ?Sized>(&self, file_name: &str, value: &T) -> Result<()> {
        let path = self.output_dir.join(file_name);
        let file = File::create(&path).map_err(|e| {
            ExporterError::Io(format!("Failed to create {}: {}", path.display(), e))
        })?;

        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, value)?;
        writer
            .flush()
            .map_err(|e| ExporterError::Io(format!("Failed to write {}: {}", path.display(), e)))?;

        tracing::debug!(path = %path.display(), "Wrote artifact");
        Ok(())
    }
}
