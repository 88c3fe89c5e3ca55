//! Configuration loader with TOML parsing and environment variable overrides
//!
//! Precedence, lowest first: built-in defaults, the optional TOML file,
//! `CROWSNEST_*` environment variables, AWS credential variables. CLI flags
//! are applied on top by the command itself, which then validates.

use super::schema::ExporterConfig;
use super::secret::secret_string;
use crate::domain::errors::ExporterError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from an optional TOML file plus the environment
///
/// This function:
/// 1. Starts from defaults, or reads the TOML file if one is given
/// 2. Performs environment variable substitution (`${VAR}` syntax)
/// 3. Applies `CROWSNEST_*` overrides
/// 4. Picks up AWS credentials from the standard environment variables
///
/// The result is not validated; `stage` and `region` normally still need to
/// come from the command line.
///
/// # Errors
///
/// Returns an error if:
/// - The file is given but cannot be read
/// - TOML parsing fails
/// - A referenced `${VAR}` is not set
/// - An override has an unparseable value
///
/// # Examples
///
/// ```no_run
/// use crowsnest_export::config::loader::load_config;
/// use std::path::Path;
///
/// let config = load_config(Some(Path::new("crowsnest.toml"))).expect("Failed to load config");
/// ```
pub fn load_config(path: Option<&Path>) -> Result<ExporterConfig> {
    let mut config = match path {
        Some(path) => parse_config_file(path)?,
        None => ExporterConfig::default(),
    };

    apply_env_overrides(&mut config)?;
    apply_aws_credentials_from_env(&mut config);

    Ok(config)
}

fn parse_config_file(path: &Path) -> Result<ExporterConfig> {
    if !path.exists() {
        return Err(ExporterError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        ExporterError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    toml::from_str(&contents)
        .map_err(|e| ExporterError::Configuration(format!("Failed to parse TOML: {}", e)))
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left alone.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| ExporterError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(ExporterError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the CROWSNEST_* prefix
///
/// Environment variables follow the pattern: CROWSNEST_<SECTION>_<KEY>
/// For example: CROWSNEST_EXPORT_STAGE, CROWSNEST_AWS_REGION
fn apply_env_overrides(config: &mut ExporterConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("CROWSNEST_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // AWS overrides
    if let Ok(val) = std::env::var("CROWSNEST_AWS_REGION") {
        config.aws.region = val;
    }
    if let Ok(val) = std::env::var("CROWSNEST_AWS_DYNAMODB_ENDPOINT_URL") {
        config.aws.dynamodb_endpoint_url = Some(val);
    }
    if let Ok(val) = std::env::var("CROWSNEST_AWS_COGNITO_ENDPOINT_URL") {
        config.aws.cognito_endpoint_url = Some(val);
    }

    // Export overrides
    if let Ok(val) = std::env::var("CROWSNEST_EXPORT_STAGE") {
        config.export.stage = val;
    }
    if let Ok(val) = std::env::var("CROWSNEST_EXPORT_TABLE_PREFIX") {
        config.export.table_prefix = val;
    }
    if let Ok(val) = std::env::var("CROWSNEST_EXPORT_OUTPUT_DIR") {
        config.export.output_dir = val;
    }
    if let Ok(val) = std::env::var("CROWSNEST_EXPORT_PAGE_DELAY_MS") {
        config.export.page_delay_ms = val.parse().map_err(|_| {
            ExporterError::Configuration(format!(
                "Invalid CROWSNEST_EXPORT_PAGE_DELAY_MS value: {val}"
            ))
        })?;
    }

    // Scrubber overrides
    config
        .scrubber
        .apply_env_overrides()
        .map_err(|e| ExporterError::Configuration(format!("{e:#}")))?;

    // Logging overrides
    if let Ok(val) = std::env::var("CROWSNEST_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("CROWSNEST_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("CROWSNEST_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}

/// Reads AWS credentials and region from the standard environment variables
///
/// `AWS_ACCESS_ID` and `AWS_SECRET_KEY` are accepted as fallbacks for the
/// standard key names. The region variable only fills an empty region.
fn apply_aws_credentials_from_env(config: &mut ExporterConfig) {
    if let Some(val) = first_non_empty_env(&["AWS_ACCESS_KEY_ID", "AWS_ACCESS_ID"]) {
        config.aws.access_key_id = Some(val);
    }
    if let Some(val) = first_non_empty_env(&["AWS_SECRET_ACCESS_KEY", "AWS_SECRET_KEY"]) {
        config.aws.secret_access_key = Some(secret_string(val));
    }
    if let Some(val) = first_non_empty_env(&["AWS_SESSION_TOKEN"]) {
        config.aws.session_token = Some(secret_string(val));
    }
    if config.aws.region.trim().is_empty() {
        if let Some(val) = first_non_empty_env(&["AWS_REGION", "AWS_DEFAULT_REGION"]) {
            config.aws.region = val;
        }
    }
}

fn first_non_empty_env(names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|val| !val.trim().is_empty())
}
