//! Side channel for the logger's own warnings, errors and reports.
//!
//! Events go through `tracing` when a subscriber wants them and fall back
//! to the standard streams otherwise. Nothing here touches the log file.

use std::io::{self, Write};

use tracing::Level;

use crate::Statistics;

pub(crate) const TARGET: &str = "rollog";

pub(crate) fn warn(message: &str) {
    if tracing::enabled!(target: TARGET, Level::WARN) {
        tracing::warn!(target: TARGET, "{}", message);
    } else {
        fallback(&mut io::stderr().lock(), "warning", message);
    }
}

pub(crate) fn error(message: &str) {
    if tracing::enabled!(target: TARGET, Level::ERROR) {
        tracing::error!(target: TARGET, "{}", message);
    } else {
        fallback(&mut io::stderr().lock(), "error", message);
    }
}

fn fallback(out: &mut impl Write, prefix: &str, message: &str) {
    // Nowhere left to report a failing stderr.
    let _ = writeln!(out, "{}: {}", prefix, message);
}

/// Print the close-time counters.
pub(crate) fn report(stats: &Statistics) {
    if tracing::enabled!(target: TARGET, Level::INFO) {
        tracing::info!(
            target: TARGET,
            file = %stats.file_name,
            dequeued = stats.dequeued,
            queue_len = stats.queue_len,
            write_calls = stats.write_calls,
            rotations = stats.rotations,
            "logger statistics"
        );
    } else {
        println!("{}", stats);
    }
}
