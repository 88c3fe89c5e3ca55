//! Configuration schema types

use crate::anonymization::config::ScrubberConfig;
use crate::config::SecretString;
use crate::domain::ids::TableKind;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main exporter configuration
///
/// This is the root configuration structure that maps to the TOML file.
/// Every section has defaults, so an empty file (or no file at all) is a
/// valid starting point; `stage` and `region` usually arrive as CLI flags.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ExporterConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// AWS connection settings
    #[serde(default)]
    pub aws: AwsConfig,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// PII scrubbing settings
    #[serde(default)]
    pub scrubber: ScrubberConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ExporterConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.aws.validate()?;
        self.export.validate()?;
        self.scrubber.validate().map_err(|e| format!("{e:#}"))?;
        self.logging.validate()?;
        Ok(())
    }

    /// Physical name of one of the auth tables for the configured stage
    pub fn table_name(&self, kind: TableKind) -> String {
        kind.table_name(&self.export.table_prefix, &self.export.stage)
    }

    /// Directory the five artifacts are written to: `<output_dir>/<stage>_<region>`
    pub fn output_subdir(&self) -> PathBuf {
        PathBuf::from(&self.export.output_dir)
            .join(format!("{}_{}", self.export.stage, self.aws.region))
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// AWS connection configuration
///
/// Explicit keys are optional; without them the default AWS provider chain
/// (shared credentials file, profiles, instance roles) is used.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AwsConfig {
    /// AWS region, e.g. `us-east-1`
    #[serde(default)]
    pub region: String,

    /// Access key id
    #[serde(default)]
    pub access_key_id: Option<String>,

    /// Secret access key
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default)]
    pub secret_access_key: Option<SecretString>,

    /// Session token for temporary credentials
    #[serde(default)]
    pub session_token: Option<SecretString>,

    /// DynamoDB endpoint override (DynamoDB Local, LocalStack)
    #[serde(default)]
    pub dynamodb_endpoint_url: Option<String>,

    /// Cognito endpoint override
    #[serde(default)]
    pub cognito_endpoint_url: Option<String>,
}

impl AwsConfig {
    fn validate(&self) -> Result<(), String> {
        if self.region.trim().is_empty() {
            return Err("aws.region cannot be empty (use --region)".to_string());
        }

        if self.access_key_id.is_some() != self.secret_access_key.is_some() {
            return Err(
                "aws.access_key_id and aws.secret_access_key must be provided together"
                    .to_string(),
            );
        }

        for (name, url) in [
            ("aws.dynamodb_endpoint_url", &self.dynamodb_endpoint_url),
            ("aws.cognito_endpoint_url", &self.cognito_endpoint_url),
        ] {
            if let Some(url) = url {
                if !url.starts_with("http://") && !url.starts_with("https://") {
                    return Err(format!("{name} must start with http:// or https://"));
                }
            }
        }

        Ok(())
    }

    /// Whether explicit static credentials were configured
    pub fn has_static_credentials(&self) -> bool {
        self.access_key_id.is_some() && self.secret_access_key.is_some()
    }
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Deployment stage, e.g. `prod`, `dev`, `PR123`
    #[serde(default)]
    pub stage: String,

    /// Table name prefix; tables are `<prefix>-<stage>.Member` and so on
    #[serde(default = "default_table_prefix")]
    pub table_prefix: String,

    /// Root directory for exported data
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Delay awaited before every Cognito ListUsers page request
    #[serde(default = "default_page_delay_ms")]
    pub page_delay_ms: u64,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            stage: String::new(),
            table_prefix: default_table_prefix(),
            output_dir: default_output_dir(),
            page_delay_ms: default_page_delay_ms(),
        }
    }
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.stage.trim().is_empty() {
            return Err("export.stage cannot be empty (use --stage)".to_string());
        }

        if self
            .stage
            .chars()
            .any(|c| c == '/' || c == '\\' || c.is_whitespace())
        {
            return Err(format!(
                "export.stage '{}' must not contain path separators or whitespace",
                self.stage
            ));
        }

        if self.table_prefix.trim().is_empty() {
            return Err("export.table_prefix cannot be empty".to_string());
        }

        if self.output_dir.trim().is_empty() {
            return Err("export.output_dir cannot be empty".to_string());
        }

        if self.page_delay_ms > 60_000 {
            return Err(format!(
                "export.page_delay_ms must be <= 60000, got {}",
                self.page_delay_ms
            ));
        }

        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local JSON file logging in addition to the console
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily or hourly)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when file logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_table_prefix() -> String {
    "crowsnest-authv3".to_string()
}

fn default_output_dir() -> String {
    "./data".to_string()
}

fn default_page_delay_ms() -> u64 {
    500
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    fn valid_config() -> ExporterConfig {
        let mut config = ExporterConfig::default();
        config.aws.region = "us-east-1".to_string();
        config.export.stage = "dev".to_string();
        config
    }

    #[test]
    fn test_default_values() {
        let config = ExporterConfig::default();
        assert_eq!(config.application.log_level, "info");
        assert_eq!(config.export.table_prefix, "crowsnest-authv3");
        assert_eq!(config.export.output_dir, "./data");
        assert_eq!(config.export.page_delay_ms, 500);
        assert!(!config.logging.local_enabled);
        assert_eq!(config.logging.local_rotation, "daily");
    }

    #[test]
    fn test_valid_config() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_stage_and_region_required() {
        let mut config = valid_config();
        config.export.stage = String::new();
        assert!(config.validate().unwrap_err().contains("export.stage"));

        let mut config = valid_config();
        config.aws.region = "  ".to_string();
        assert!(config.validate().unwrap_err().contains("aws.region"));
    }

    #[test]
    fn test_stage_cannot_escape_output_dir() {
        let mut config = valid_config();
        config.export.stage = "../prod".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_credentials_must_be_paired() {
        let mut config = valid_config();
        config.aws.access_key_id = Some("AKIAEXAMPLE".to_string());
        assert!(config.validate().is_err());

        config.aws.secret_access_key = Some(secret_string("secret".to_string()));
        assert!(config.validate().is_ok());
        assert!(config.aws.has_static_credentials());
    }

    #[test]
    fn test_endpoint_url_scheme() {
        let mut config = valid_config();
        config.aws.dynamodb_endpoint_url = Some("localhost:8000".to_string());
        assert!(config.validate().is_err());

        config.aws.dynamodb_endpoint_url = Some("http://localhost:8000".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = valid_config();
        config.application.log_level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_rotation() {
        let mut config = valid_config();
        config.logging.local_rotation = "weekly".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_table_names_and_output_dir() {
        let mut config = valid_config();
        config.export.stage = "PR123".to_string();
        config.aws.region = "eu-west-1".to_string();

        assert_eq!(
            config.table_name(TableKind::Member),
            "crowsnest-authv3-PR123.Member"
        );
        assert_eq!(
            config.table_name(TableKind::Domain),
            "crowsnest-authv3-PR123.Domain"
        );
        assert_eq!(
            config.output_subdir(),
            PathBuf::from("./data").join("PR123_eu-west-1")
        );
    }
}
