//! # Rollog
//!
//! A queued file logger with size-based rotation.
//!
//! ## Features
//!
//! - Leveled calls (`DEBUG` < `INFO` < `WARN` < `ERROR` < `CRITICAL`)
//! - One background writer per log file, fed through a bounded queue
//! - Automatic rotation into `<name>.0` … `<name>.<max_files>` by size
//! - Per-logger timestamp layout
//! - Own diagnostics through the `tracing` ecosystem
//!
//! ## Example
//!
//! ```rust
//! use rollog::Logger;
//!
//! let dir = tempfile::tempdir()?;
//! let logger = Logger::open("app.log", dir.path(), "debug")?;
//! logger.set_rotation(40, 5);
//!
//! logger.info("This is an Info message");
//! rollog::critical!(logger, "This is a Critical message {}", 2023);
//!
//! let stats = logger.close()?;
//! assert_eq!(stats.write_calls, 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod builder;
pub mod config;
mod diag;
pub mod error;
pub mod format;
pub mod level;
pub mod logger;
mod macros;
pub mod rotation;
pub mod tracing_init;
pub mod writer;

pub use builder::LoggerBuilder;
pub use config::LoggerConfig;
pub use error::{Error, Result};
pub use format::{Formatter, Payload, TimestampFormat};
pub use level::Level;
pub use logger::{Logger, VERSION};
pub use rotation::Rotation;
pub use tracing_init::init_diagnostics;
pub use writer::Statistics;

/// Start configuring a logger for the file `name`.
pub fn builder(name: impl Into<String>) -> LoggerBuilder {
    LoggerBuilder::new(name)
}
