use std::fs;
use std::io::Write;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::thread::JoinHandle;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use crossbeam_channel::Sender;
use sha2::{Digest, Sha256};

use crate::format::{Formatter, Payload, TimestampFormat};
use crate::rotation::{RotatingFile, Rotation};
use crate::writer::{self, Counters};
use crate::{Error, Level, LoggerConfig, Result, Statistics, diag};

/// Version written into every file header.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Handle to one open log file and its writer thread.
///
/// Calls on any thread format the message, then hand it to the writer
/// through a bounded queue; a full queue blocks the caller. The writer
/// owns the size check, rollover and append. [`Logger::close`] drains the
/// queue before the file is released; dropping the handle does the same.
pub struct Logger {
    name: String,
    path: PathBuf,
    level: Level,
    formatter: RwLock<Formatter>,
    statistics: AtomicBool,
    open: AtomicBool,
    file: writer::SharedFile,
    counters: Arc<Counters>,
    sender: Option<Sender<String>>,
    worker: Option<JoinHandle<()>>,
}

impl Logger {
    /// Open `name` inside `directory` at the given level.
    ///
    /// An unknown level falls back to `INFO` with a warning. Fails when the
    /// directory does not exist, or when the file cannot be opened or its
    /// header written.
    #[track_caller]
    pub fn open(name: &str, directory: impl AsRef<Path>, level: &str) -> Result<Self> {
        let config = LoggerConfig::new(name)
            .with_directory(directory.as_ref())
            .with_level(level);
        Self::open_at(&config, Location::caller())
    }

    /// Open a logger from a full configuration.
    #[track_caller]
    pub fn from_config(config: &LoggerConfig) -> Result<Self> {
        Self::open_at(config, Location::caller())
    }

    fn open_at(config: &LoggerConfig, caller: &Location<'_>) -> Result<Self> {
        if config.name.is_empty() {
            return Err(Error::Config("log file name is empty".to_string()));
        }
        if !config.directory.is_dir() {
            return Err(Error::PathNotFound(config.directory.clone()));
        }

        let (level, known) = Level::parse_or_default(&config.level);
        if !known {
            diag::warn(&format!(
                "unknown log level {:?}, the log level has been configured in \"INFO\" by default",
                config.level
            ));
        }

        let timestamp = match &config.timestamp_format {
            Some(name) => TimestampFormat::from_name(name)?,
            None => TimestampFormat::default(),
        };

        let path = config.directory.join(&config.name);
        let mut file = RotatingFile::open(&path, config.rotation)?;
        let provenance = config.provenance.then_some(caller);
        file.write_all(header(provenance).as_bytes())?;

        let file = Arc::new(Mutex::new(file));
        let counters = Arc::new(Counters::default());
        let (sender, receiver) = crossbeam_channel::bounded(config.queue_capacity.max(1));
        let worker = writer::spawn(
            &config.name,
            Arc::clone(&file),
            receiver,
            Arc::clone(&counters),
        )?;

        tracing::debug!(target: diag::TARGET, path = %path.display(), %level, "log file opened");

        Ok(Self {
            name: config.name.clone(),
            path,
            level,
            formatter: RwLock::new(Formatter::new(timestamp)),
            statistics: AtomicBool::new(config.statistics),
            open: AtomicBool::new(true),
            file,
            counters,
            sender: Some(sender),
            worker: Some(worker),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path of the active log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn level(&self) -> Level {
        self.level
    }

    /// Whether the handle is open.
    pub fn status(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }

    /// Change the rotation thresholds; the next write uses them.
    pub fn set_rotation(&self, max_size_mb: u64, max_files: usize) {
        writer::lock(&self.file).set_rotation(Rotation::new(max_size_mb, max_files));
    }

    pub fn rotation(&self) -> Rotation {
        writer::lock(&self.file).rotation()
    }

    /// Print counters when the logger is closed.
    pub fn set_statistics(&self, enabled: bool) {
        self.statistics.store(enabled, Ordering::Relaxed);
    }

    /// Change the timestamp layout of this logger only.
    pub fn set_timestamp_format(&self, format: TimestampFormat) {
        let mut formatter = self
            .formatter
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *formatter = Formatter::new(format);
    }

    /// Current counters.
    pub fn statistics(&self) -> Statistics {
        self.counters.snapshot(&self.name)
    }

    /// Filter, format and queue one message.
    ///
    /// Returns `Ok(false)` when the level filter rejects the call. Blocks
    /// while the queue is full.
    pub fn try_log<'a>(&self, severity: Level, payload: impl Into<Payload<'a>>) -> Result<bool> {
        if !self.level.accepts(severity) {
            return Ok(false);
        }

        let line = {
            let formatter = self
                .formatter
                .read()
                .unwrap_or_else(PoisonError::into_inner);
            formatter.format(severity, &payload.into())
        };
        self.counters.write_calls.fetch_add(1, Ordering::Relaxed);

        let Some(sender) = &self.sender else {
            return Err(Error::Closed);
        };
        sender.send(line).map_err(|_| Error::Closed)?;
        Ok(true)
    }

    /// Like [`Logger::try_log`], reporting a dead writer on the diagnostic
    /// channel instead of returning it.
    pub fn log<'a>(&self, severity: Level, payload: impl Into<Payload<'a>>) {
        if let Err(e) = self.try_log(severity, payload) {
            diag::error(&format!("{}: message dropped: {}", self.name, e));
        }
    }

    pub fn debug<'a>(&self, payload: impl Into<Payload<'a>>) {
        self.log(Level::Debug, payload);
    }

    pub fn info<'a>(&self, payload: impl Into<Payload<'a>>) {
        self.log(Level::Info, payload);
    }

    pub fn warn<'a>(&self, payload: impl Into<Payload<'a>>) {
        self.log(Level::Warn, payload);
    }

    pub fn error<'a>(&self, payload: impl Into<Payload<'a>>) {
        self.log(Level::Error, payload);
    }

    pub fn critical<'a>(&self, payload: impl Into<Payload<'a>>) {
        self.log(Level::Critical, payload);
    }

    /// Flush the active file without waiting for queued messages.
    pub fn flush(&self) -> Result<()> {
        writer::lock(&self.file).flush()?;
        Ok(())
    }

    /// Stop accepting messages, wait for the writer to drain the queue,
    /// print statistics if enabled, and release the file.
    pub fn close(mut self) -> Result<Statistics> {
        self.shutdown()
    }

    fn shutdown(&mut self) -> Result<Statistics> {
        // The writer exits once the only sender is gone and the queue is empty.
        drop(self.sender.take());
        if let Some(worker) = self.worker.take()
            && worker.join().is_err()
        {
            diag::error(&format!("{}: writer thread panicked", self.name));
        }
        self.open.store(false, Ordering::Release);

        let stats = self.statistics();
        if self.statistics.load(Ordering::Relaxed) {
            diag::report(&stats);
        }

        writer::lock(&self.file).flush()?;
        Ok(stats)
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.sender.is_some()
            && let Err(e) = self.shutdown()
        {
            diag::error(&format!("{}: close failed: {}", self.name, e));
        }
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("path", &self.path)
            .field("level", &self.level)
            .field("open", &self.status())
            .finish()
    }
}

/// First line of every file: version, plus the caller's source file and the
/// base64 SHA-256 of its contents when that file can be read.
fn header(caller: Option<&Location<'_>>) -> String {
    let provenance = caller.and_then(|location| {
        let source = Path::new(location.file());
        let hash = source_hash(source)?;
        let file = source.file_name()?.to_string_lossy().into_owned();
        Some(format!(" SourceFile: {} Hash: {}", file, hash))
    });
    format!(
        "Logger Version: {}{}\n",
        VERSION,
        provenance.unwrap_or_default()
    )
}

fn source_hash(path: &Path) -> Option<String> {
    let contents = fs::read(path).ok()?;
    Some(STANDARD.encode(Sha256::digest(&contents)))
}
