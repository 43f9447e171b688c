//! Console subscriber for the logger's own diagnostics.
//!
//! Warnings about bad levels, failed rotations and dropped lines are
//! `tracing` events under the `rollog` target. Applications that already
//! install a subscriber get them there; others can call
//! [`init_diagnostics`] to print them on stderr.

use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{Error, Result};

/// Install a stderr subscriber for diagnostics with an optional CLI
/// verbosity override.
///
/// `level` is a `tracing` level ("error", "warn", "info", "debug", "trace").
/// `RUST_LOG` takes precedence when set.
pub fn init_diagnostics(level: &str, cli_verbose: Option<u8>) -> Result<()> {
    let log_spec = effective_log_spec(level, cli_verbose);

    let env_filter = EnvFilter::try_new(&log_spec).map_err(|e| Error::Init(e.to_string()))?;

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(true)
        .boxed();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| Error::Init(e.to_string()))?;

    Ok(())
}

/// Determine the effective filter, considering the configured level and CLI overrides.
fn effective_log_spec(level: &str, cli_verbose: Option<u8>) -> String {
    // RUST_LOG takes precedence over everything
    if let Ok(rust_log) = std::env::var("RUST_LOG")
        && !rust_log.is_empty()
    {
        return rust_log;
    }

    let level = if level.is_empty() { "warn" } else { level };

    // CLI verbose flag raises the crate's own level
    if let Some(verbose) = cli_verbose {
        return match verbose {
            0 => format!("{},rollog={}", level, level),
            1 => format!("{},rollog=debug", level),
            2 => format!("{},rollog=trace", level),
            _ => "trace".to_string(),
        };
    }

    format!("{},rollog={}", level, level)
}
