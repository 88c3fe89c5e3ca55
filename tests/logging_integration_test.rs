//! Integration tests for logging functionality

use crowsnest_export::config::LoggingConfig;
use crowsnest_export::logging::init_logging;
use crowsnest_export::logging::structured::LOG_FILE_PREFIX;
use tempfile::TempDir;

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert!(!config.local_enabled);
    assert_eq!(config.local_rotation, "daily");
    assert_eq!(config.local_path, "./logs");
}

// Installs the global subscriber, so it is the only test in this binary that
// initializes logging.
#[test]
fn test_file_logging_writes_json_lines() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("logs");

    let config = LoggingConfig {
        local_enabled: true,
        local_path: log_path.to_string_lossy().to_string(),
        local_rotation: "hourly".to_string(),
    };

    let guard = init_logging("info", &config).unwrap();
    assert!(log_path.exists());

    tracing::warn!(target: "crowsnest_export", pool_id = "us-east-1_abc", "Resolving pool");

    // Dropping the guard flushes the non-blocking writer
    drop(guard);

    let files: Vec<_> = std::fs::read_dir(&log_path)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    assert!(files.iter().all(|path| path
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with(LOG_FILE_PREFIX))));

    let contents: String = files
        .iter()
        .map(|path| std::fs::read_to_string(path).unwrap())
        .collect();

    let line = contents
        .lines()
        .find(|line| line.contains("Resolving pool"))
        .expect("log line written");
    let event: serde_json::Value = serde_json::from_str(line).unwrap();
    assert_eq!(event["pool_id"], "us-east-1_abc");
    assert_eq!(event["message"], "Resolving pool");

    // A second global subscriber is refused
    assert!(init_logging("info", &LoggingConfig::default()).is_err());
}

#[test]
fn test_invalid_level_rejected_before_install() {
    let result = init_logging("verbose", &LoggingConfig::default());
    assert!(result.is_err());
}
