use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::Rotation;

/// Configuration for one logger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerConfig {
    /// File name of the active log file
    pub name: String,
    /// Directory the log file lives in; must already exist
    #[serde(default = "default_directory")]
    pub directory: PathBuf,
    /// Minimum level (e.g., "debug", "INFO"); unknown values fall back to INFO
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Size-based rotation thresholds
    #[serde(default)]
    pub rotation: Rotation,
    /// Print counters when the logger is closed
    #[serde(default)]
    pub statistics: bool,
    /// Timestamp layout ("default", "rfc3339", "rfc2822" or a `time` format description)
    #[serde(default)]
    pub timestamp_format: Option<String>,
    /// Number of formatted messages that may wait for the writer
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
    /// Stamp the header with the calling source file and its hash
    #[serde(default = "default_provenance")]
    pub provenance: bool,
}

impl LoggerConfig {
    /// Create a new LoggerConfig with defaults
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            directory: default_directory(),
            level: default_log_level(),
            rotation: Rotation::default(),
            statistics: false,
            timestamp_format: None,
            queue_capacity: default_queue_capacity(),
            provenance: default_provenance(),
        }
    }

    /// Set the log directory
    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = directory.into();
        self
    }

    /// Set log level
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// Set rotation thresholds
    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Enable close-time statistics
    pub fn with_statistics(mut self, statistics: bool) -> Self {
        self.statistics = statistics;
        self
    }

    /// Set timestamp layout
    pub fn with_timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.timestamp_format = Some(format.into());
        self
    }

    /// Set queue capacity
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    /// Enable or disable the source provenance stamp in the header
    pub fn with_provenance(mut self, provenance: bool) -> Self {
        self.provenance = provenance;
        self
    }
}

fn default_directory() -> PathBuf {
    PathBuf::from(".")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_queue_capacity() -> usize {
    1
}

fn default_provenance() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logger_config_new() {
        let config = LoggerConfig::new("app.log");
        assert_eq!(config.name, "app.log");
        assert_eq!(config.directory, PathBuf::from("."));
        assert_eq!(config.level, "info");
        assert_eq!(config.rotation, Rotation::new(40, 4));
        assert!(!config.statistics);
        assert!(config.timestamp_format.is_none());
        assert_eq!(config.queue_capacity, 1);
        assert!(config.provenance);
    }

    #[test]
    fn test_logger_config_setters() {
        let config = LoggerConfig::new("app.log")
            .with_directory("/var/log")
            .with_level("debug")
            .with_rotation(Rotation::new(10, 2))
            .with_statistics(true)
            .with_timestamp_format("rfc3339")
            .with_queue_capacity(64)
            .with_provenance(false);

        assert_eq!(config.directory, PathBuf::from("/var/log"));
        assert_eq!(config.level, "debug");
        assert_eq!(config.rotation, Rotation::new(10, 2));
        assert!(config.statistics);
        assert_eq!(config.timestamp_format.as_deref(), Some("rfc3339"));
        assert_eq!(config.queue_capacity, 64);
        assert!(!config.provenance);
    }

    #[test]
    fn test_logger_config_from_yaml() {
        let yaml = r#"
name: app.log
directory: /tmp
level: warn
rotation:
  max_size: "2G"
  max_files: 7
statistics: true
"#;
        let config: LoggerConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.name, "app.log");
        assert_eq!(config.directory, PathBuf::from("/tmp"));
        assert_eq!(config.level, "warn");
        assert_eq!(config.rotation, Rotation::new(2048, 7));
        assert!(config.statistics);
        assert_eq!(config.queue_capacity, 1);
    }

    #[test]
    fn test_logger_config_from_toml() {
        let toml = r#"
name = "service.log"
level = "DEBUG"
timestamp_format = "rfc2822"
queue_capacity = 16

[rotation]
max_size = 5
"#;
        let config: LoggerConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.name, "service.log");
        assert_eq!(config.directory, PathBuf::from("."));
        assert_eq!(config.level, "DEBUG");
        assert_eq!(config.rotation, Rotation::new(5, 4));
        assert_eq!(config.timestamp_format.as_deref(), Some("rfc2822"));
        assert_eq!(config.queue_capacity, 16);
        assert!(config.provenance);
    }

    #[test]
    fn test_logger_config_requires_name() {
        assert!(serde_yaml::from_str::<LoggerConfig>("level: info").is_err());
    }
}
