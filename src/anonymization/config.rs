//! Scrubber configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How synthetic identities are reused within a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScrubPolicy {
    /// One identity per distinct original email for the whole run; the member
    /// pass and the pool-user pass agree on the replacement
    #[default]
    PerRun,
    /// A fresh identity on every scrub call
    PerCall,
}

/// PII scrubbing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrubberConfig {
    /// Email domain suffixes that are never scrubbed (case-sensitive)
    #[serde(default = "default_allowed_domains")]
    pub allowed_domains: Vec<String>,

    /// Identity reuse policy
    #[serde(default)]
    pub policy: ScrubPolicy,

    /// Seed for the name generator; unset means OS entropy
    #[serde(default)]
    pub name_seed: Option<u64>,

    /// Audit logging configuration
    #[serde(default)]
    pub audit: AuditConfig,
}

impl Default for ScrubberConfig {
    fn default() -> Self {
        Self {
            allowed_domains: default_allowed_domains(),
            policy: ScrubPolicy::default(),
            name_seed: None,
            audit: AuditConfig::default(),
        }
    }
}

impl ScrubberConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(empty) = self.allowed_domains.iter().position(|d| d.trim().is_empty()) {
            anyhow::bail!("scrubber.allowed_domains[{empty}] must not be empty");
        }

        self.audit.validate().context("Invalid audit configuration")?;

        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("CROWSNEST_SCRUBBER_ALLOWED_DOMAINS") {
            self.allowed_domains = val
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        if let Ok(val) = std::env::var("CROWSNEST_SCRUBBER_POLICY") {
            self.policy = match val.to_lowercase().as_str() {
                "per_run" => ScrubPolicy::PerRun,
                "per_call" => ScrubPolicy::PerCall,
                _ => anyhow::bail!("Invalid CROWSNEST_SCRUBBER_POLICY: {}", val),
            };
        }

        if let Ok(val) = std::env::var("CROWSNEST_SCRUBBER_NAME_SEED") {
            self.name_seed = Some(
                val.parse()
                    .context("Invalid CROWSNEST_SCRUBBER_NAME_SEED value")?,
            );
        }

        self.audit.apply_env_overrides()?;

        Ok(())
    }
}

/// Scrub audit log configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Write an audit entry per scrubbed record
    #[serde(default)]
    pub enabled: bool,

    /// Audit log file
    #[serde(default = "default_audit_log_path")]
    pub log_path: PathBuf,

    /// JSON lines instead of plain text
    #[serde(default = "default_true")]
    pub json_format: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_path: default_audit_log_path(),
            json_format: true,
        }
    }
}

impl AuditConfig {
    /// Validate audit configuration
    pub fn validate(&self) -> Result<()> {
        if self.enabled && self.log_path.as_os_str().is_empty() {
            anyhow::bail!("scrubber.audit.log_path must be set when audit is enabled");
        }
        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("CROWSNEST_SCRUBBER_AUDIT_ENABLED") {
            self.enabled = val
                .parse()
                .context("Invalid CROWSNEST_SCRUBBER_AUDIT_ENABLED value")?;
        }

        if let Ok(val) = std::env::var("CROWSNEST_SCRUBBER_AUDIT_LOG_PATH") {
            self.log_path = PathBuf::from(val);
        }

        Ok(())
    }
}

fn default_allowed_domains() -> Vec<String> {
    vec!["cleo.com".to_string(), "mailosaur.io".to_string()]
}

fn default_audit_log_path() -> PathBuf {
    PathBuf::from("./logs/scrub_audit.log")
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ScrubberConfig::default();
        assert_eq!(config.allowed_domains, vec!["cleo.com", "mailosaur.io"]);
        assert_eq!(config.policy, ScrubPolicy::PerRun);
        assert!(config.name_seed.is_none());
        assert!(!config.audit.enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_domain_rejected() {
        let config = ScrubberConfig {
            allowed_domains: vec!["cleo.com".to_string(), " ".to_string()],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_policy_from_toml() {
        let config: ScrubberConfig = toml::from_str(
            r#"
policy = "per_call"
name_seed = 7
"#,
        )
        .unwrap();
        assert_eq!(config.policy, ScrubPolicy::PerCall);
        assert_eq!(config.name_seed, Some(7));
        // Omitted list falls back to the default allow-list
        assert_eq!(config.allowed_domains, vec!["cleo.com", "mailosaur.io"]);
    }
}
