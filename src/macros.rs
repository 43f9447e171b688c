//! `format!`-style logging macros.
//!
//! ```rust,no_run
//! let logger = rollog::Logger::open("app.log", "/var/log", "debug")?;
//! rollog::critical!(logger, "This is a Critical message {}", 2023);
//! rollog::info!(logger, "listening on {}:{}", "0.0.0.0", 8080);
//! logger.close()?;
//! # Ok::<(), rollog::Error>(())
//! ```
//!
//! Template and arguments are checked at compile time.

/// Log at an explicit [`Level`](crate::Level).
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, ::std::format_args!($($arg)+))
    };
}

/// Log at `DEBUG`.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Debug, $($arg)+)
    };
}

/// Log at `INFO`.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Info, $($arg)+)
    };
}

/// Log at `WARN`.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Warn, $($arg)+)
    };
}

/// Log at `ERROR`.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Error, $($arg)+)
    };
}

/// Log at `CRITICAL`.
#[macro_export]
macro_rules! critical {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Critical, $($arg)+)
    };
}
