//! Audit logger for scrub operations

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// Which kind of record was scrubbed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Member,
    PoolUser,
}

/// What the scrubber did with a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrubOutcome {
    /// Email and names replaced
    Scrubbed,
    /// Email domain is allow-listed; record kept verbatim
    AllowListed,
    /// Nothing to scrub
    Skipped,
}

/// Audit log entry
#[derive(Debug, Serialize)]
struct AuditLogEntry {
    timestamp: String,
    record: RecordKind,
    outcome: ScrubOutcome,
    /// SHA-256 hash of the original email (never log plaintext PII)
    email_hash: Option<String>,
    /// Reused an identity already issued in this run
    reused: bool,
}

/// Append-only audit log of scrub decisions
pub struct AuditLogger {
    log_path: PathBuf,
    json_format: bool,
    enabled: bool,
}

impl AuditLogger {
    /// Create a new audit logger
    pub fn new(log_path: PathBuf, json_format: bool, enabled: bool) -> Result<Self> {
        if enabled {
            if let Some(parent) = log_path.parent() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create audit log directory: {}", parent.display())
                })?;
            }
        }

        Ok(Self {
            log_path,
            json_format,
            enabled,
        })
    }

    /// Record one scrub decision
    pub fn log_scrub(
        &self,
        record: RecordKind,
        original_email: Option<&str>,
        outcome: ScrubOutcome,
        reused: bool,
    ) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let entry = AuditLogEntry {
            timestamp: Utc::now().to_rfc3339(),
            record,
            outcome,
            email_hash: original_email.map(hash_pii_value),
            reused,
        };

        self.write_entry(&entry)
    }

    fn write_entry(&self, entry: &AuditLogEntry) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .with_context(|| format!("Failed to open audit log: {}", self.log_path.display()))?;

        if self.json_format {
            let json_line =
                serde_json::to_string(entry).context("Failed to serialize audit entry")?;
            writeln!(file, "{json_line}").context("Failed to write audit entry")?;
        } else {
            writeln!(
                file,
                "[{}] Record: {:?} | Outcome: {:?} | Email: {} | Reused: {}",
                entry.timestamp,
                entry.record,
                entry.outcome,
                entry.email_hash.as_deref().unwrap_or("-"),
                entry.reused
            )
            .context("Failed to write audit entry")?;
        }

        Ok(())
    }
}

/// Hash a PII value using SHA-256
fn hash_pii_value(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let result = hasher.finalize();
    format!("{result:x}")
}
