//! Builder pattern for opening a logger.
//!
//! This module provides a convenient builder API for configuring and opening
//! a logger in a single chain of method calls.
//!
//! # Example
//!
//! ```rust,no_run
//! let logger = rollog::builder("app.log")
//!     .with_directory("/var/log/myapp")
//!     .with_level("debug")
//!     .with_rotation(10, 5)
//!     .with_statistics(true)
//!     .open()
//!     .expect("Failed to open log file");
//!
//! logger.info("service started");
//! logger.close().expect("Failed to close log file");
//! ```

use std::path::PathBuf;

use crate::{Logger, LoggerConfig, Result, Rotation};

/// A builder for configuring and opening a [`Logger`].
#[derive(Debug, Clone)]
pub struct LoggerBuilder {
    config: LoggerConfig,
}

impl LoggerBuilder {
    /// Create a new LoggerBuilder for `name` with default configuration.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            config: LoggerConfig::new(name),
        }
    }

    /// Create a LoggerBuilder from an existing configuration.
    pub fn from_config(config: LoggerConfig) -> Self {
        Self { config }
    }

    /// Set the directory holding the log file.
    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.config = self.config.with_directory(directory);
        self
    }

    /// Set the log level ("debug", "info", "warn", "error", "critical").
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.config = self.config.with_level(level);
        self
    }

    /// Set the rotation thresholds: size in megabytes and highest backup index.
    pub fn with_rotation(mut self, max_size_mb: u64, max_files: usize) -> Self {
        self.config = self
            .config
            .with_rotation(Rotation::new(max_size_mb, max_files));
        self
    }

    /// Print counters when the logger is closed.
    pub fn with_statistics(mut self, statistics: bool) -> Self {
        self.config = self.config.with_statistics(statistics);
        self
    }

    /// Set the timestamp layout ("default", "rfc3339", "rfc2822" or a `time`
    /// format description).
    pub fn with_timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.config = self.config.with_timestamp_format(format);
        self
    }

    /// Set how many formatted messages may wait for the writer.
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.config = self.config.with_queue_capacity(capacity);
        self
    }

    /// Include the calling source file and its hash in the header.
    pub fn with_provenance(mut self, provenance: bool) -> Self {
        self.config = self.config.with_provenance(provenance);
        self
    }

    /// Get the current configuration without opening.
    pub fn build(self) -> LoggerConfig {
        self.config
    }

    /// Open the logger with the configured settings.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The directory does not exist
    /// - The timestamp format cannot be parsed
    /// - The file cannot be opened or its header written
    #[track_caller]
    pub fn open(self) -> Result<Logger> {
        Logger::from_config(&self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_new() {
        let config = LoggerBuilder::new("app.log").build();
        assert_eq!(config.name, "app.log");
        assert_eq!(config.level, "info");
        assert_eq!(config.rotation, Rotation::default());
    }

    #[test]
    fn test_builder_chaining() {
        let config = LoggerBuilder::new("app.log")
            .with_directory("/tmp")
            .with_level("debug")
            .with_rotation(1, 2)
            .with_statistics(true)
            .with_timestamp_format("rfc3339")
            .with_queue_capacity(8)
            .with_provenance(false)
            .build();

        assert_eq!(config.directory, PathBuf::from("/tmp"));
        assert_eq!(config.level, "debug");
        assert_eq!(config.rotation, Rotation::new(1, 2));
        assert!(config.statistics);
        assert_eq!(config.timestamp_format.as_deref(), Some("rfc3339"));
        assert_eq!(config.queue_capacity, 8);
        assert!(!config.provenance);
    }

    #[test]
    fn test_builder_from_config() {
        let original = LoggerConfig::new("x.log").with_level("warn");
        let config = LoggerBuilder::from_config(original.clone()).build();
        assert_eq!(config, original);
    }

    #[test]
    fn test_builder_open() {
        let dir = tempfile::tempdir().unwrap();
        let logger = LoggerBuilder::new("built.log")
            .with_directory(dir.path())
            .with_level("error")
            .open()
            .unwrap();

        assert_eq!(logger.level(), crate::Level::Error);
        assert_eq!(logger.path(), dir.path().join("built.log"));
        logger.close().unwrap();
    }
}
