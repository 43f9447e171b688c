use std::fmt;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};

use crossbeam_channel::Receiver;

use crate::diag;
use crate::rotation::RotatingFile;

/// Active file shared between the writer loop and its handle.
pub(crate) type SharedFile = Arc<Mutex<RotatingFile>>;

pub(crate) fn lock(file: &Mutex<RotatingFile>) -> MutexGuard<'_, RotatingFile> {
    file.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Counters shared by the caller side and the writer loop.
#[derive(Debug, Default)]
pub(crate) struct Counters {
    pub dequeued: AtomicU64,
    pub queue_len: AtomicUsize,
    pub write_calls: AtomicU64,
    pub rotations: AtomicU64,
}

impl Counters {
    pub fn snapshot(&self, file_name: &str) -> Statistics {
        Statistics {
            file_name: file_name.to_string(),
            dequeued: self.dequeued.load(Ordering::Relaxed),
            queue_len: self.queue_len.load(Ordering::Relaxed),
            write_calls: self.write_calls.load(Ordering::Relaxed),
            rotations: self.rotations.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of a logger's counters.
///
/// Values are read individually, so a snapshot taken while messages are in
/// flight may be slightly inconsistent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statistics {
    /// Name of the active log file.
    pub file_name: String,
    /// Messages taken off the queue by the writer loop.
    pub dequeued: u64,
    /// Queue length observed after the most recent dequeue.
    pub queue_len: usize,
    /// Calls that passed the level filter.
    pub write_calls: u64,
    /// Completed rollovers of the active file.
    pub rotations: u64,
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "====== S T A T I S T I C S ======")?;
        writeln!(f, "File Name: {}", self.file_name)?;
        writeln!(f, "Dequeue: {}", self.dequeued)?;
        writeln!(f, "Queue Length: {}", self.queue_len)?;
        writeln!(f, "Total Call to Write: {}", self.write_calls)?;
        write!(f, "Rotations: {}", self.rotations)
    }
}

/// Start the writer loop for one logger.
///
/// The loop drains `receiver` in order and exits once every sender is gone
/// and the queue is empty.
pub(crate) fn spawn(
    name: &str,
    file: SharedFile,
    receiver: Receiver<String>,
    counters: Arc<Counters>,
) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name(format!("rollog-{}", name))
        .spawn(move || run(&file, &receiver, &counters))
}

fn run(file: &Mutex<RotatingFile>, receiver: &Receiver<String>, counters: &Counters) {
    for message in receiver.iter() {
        counters.dequeued.fetch_add(1, Ordering::Relaxed);
        counters.queue_len.store(receiver.len(), Ordering::Relaxed);
        write_message(file, &message, counters);
    }
}

/// Size check, rollover if due, then append. Failures are reported and the
/// message is dropped.
fn write_message(file: &Mutex<RotatingFile>, message: &str, counters: &Counters) {
    let mut file = lock(file);

    match file.check_size() {
        Ok(true) => {
            let count = counters.rotations.fetch_add(1, Ordering::Relaxed) + 1;
            tracing::debug!(
                target: diag::TARGET,
                "[{}] rotating file {}",
                count,
                file.path().display()
            );
        }
        Ok(false) => {}
        Err(e) => diag::error(&format!(
            "rotation of {} failed: {}",
            file.path().display(),
            e
        )),
    }

    if let Err(e) = file.write_all(message.as_bytes()) {
        diag::error(&format!("write to {} failed: {}", file.path().display(), e));
    }
}
