//! Size-triggered rotation of the active log file.
//!
//! On disk a logger named `app.log` owns `app.log` (the active file) and the
//! backups `app.log.0` (newest) through `app.log.<max_files>` (oldest).

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize, de};

use crate::diag;

const DEFAULT_MAX_SIZE_MB: u64 = 40;
const DEFAULT_MAX_FILES: usize = 4;

/// Parse a size string with an optional unit (M/G, case-insensitive) into
/// whole megabytes, defaulting to MB if no unit.
fn parse_size(s: &str) -> Result<u64, String> {
    let s = s.trim();
    let Some(last) = s.chars().last() else {
        return Err("empty size string".to_string());
    };

    let (num_str, unit) = if last.is_alphabetic() {
        (&s[..s.len() - last.len_utf8()], last.to_ascii_uppercase())
    } else {
        (s, 'M')
    };

    let num: u64 = num_str
        .trim()
        .parse()
        .map_err(|_| format!("invalid number: {}", num_str))?;

    let multiplier = match unit {
        'M' => 1,
        'G' => 1024,
        _ => return Err(format!("invalid unit: {}, supported: M/G", unit)),
    };

    num.checked_mul(multiplier)
        .ok_or_else(|| "size too large".to_string())
}

/// Size value that can be a number or string with units.
#[derive(Deserialize)]
#[serde(untagged)]
enum SizeValue {
    Number(u64),
    String(String),
}

fn deserialize_size<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match SizeValue::deserialize(deserializer)? {
        SizeValue::Number(n) => Ok(n),
        SizeValue::String(s) => parse_size(&s).map_err(de::Error::custom),
    }
}

/// Rotation thresholds.
///
/// The active file rolls over once its size in whole megabytes (bytes
/// divided by 1024 twice, truncating) reaches `max_size_mb`. A threshold of
/// zero rolls on every write. `max_files` is the highest backup index kept,
/// so at most `max_files + 1` backups exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rotation {
    /// Maximum size of the active file in megabytes.
    /// Can be specified as a number (MB) or string with units (M/G).
    #[serde(
        rename = "max_size",
        default = "default_max_size",
        deserialize_with = "deserialize_size"
    )]
    pub max_size_mb: u64,
    /// Highest backup index kept on disk.
    #[serde(default = "default_max_files")]
    pub max_files: usize,
}

impl Rotation {
    pub fn new(max_size_mb: u64, max_files: usize) -> Self {
        Self {
            max_size_mb,
            max_files,
        }
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SIZE_MB, DEFAULT_MAX_FILES)
    }
}

fn default_max_size() -> u64 {
    DEFAULT_MAX_SIZE_MB
}

fn default_max_files() -> usize {
    DEFAULT_MAX_FILES
}

/// Path of backup `index` for the active file at `path`.
pub fn backup_path(path: &Path, index: usize) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(format!(".{}", index));
    PathBuf::from(name)
}

/// Shift every backup one generation older, deleting the one at
/// `max_files`. Stops at the first failing rename or delete.
fn shift_backups(path: &Path, max_files: usize) -> io::Result<()> {
    for i in (0..=max_files).rev() {
        let from = backup_path(path, i);
        if !from.exists() {
            continue;
        }
        if i == max_files {
            fs::remove_file(&from)?;
        } else {
            fs::rename(&from, backup_path(path, i + 1))?;
        }
    }
    Ok(())
}

fn open_append(path: &Path) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.create(true).append(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o644);
    }
    options.open(path)
}

/// The active log file together with its rotation thresholds.
#[derive(Debug)]
pub struct RotatingFile {
    path: PathBuf,
    file: File,
    rotation: Rotation,
}

impl RotatingFile {
    /// Open (or create) the active file in append mode.
    pub fn open(path: &Path, rotation: Rotation) -> io::Result<Self> {
        Ok(Self {
            path: path.to_path_buf(),
            file: open_append(path)?,
            rotation,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Replace the thresholds; the next size check uses them.
    pub fn set_rotation(&mut self, rotation: Rotation) {
        self.rotation = rotation;
    }

    /// Size of the active file in whole megabytes.
    pub fn size_mb(&self) -> io::Result<u64> {
        let bytes = self.file.metadata()?.len();
        Ok(bytes / 1024 / 1024)
    }

    /// Roll the active file over if it has reached the threshold.
    ///
    /// Returns `true` when a new active file was opened.
    pub fn check_size(&mut self) -> io::Result<bool> {
        if self.size_mb()? < self.rotation.max_size_mb {
            return Ok(false);
        }
        self.rotate()?;
        Ok(true)
    }

    /// Move the active file to `.0` and start a fresh one.
    ///
    /// Existing backups are shifted first so `.0` is free. A failed shift is
    /// reported and the roll continues only if `.0` was vacated; otherwise
    /// the error is returned and the current handle stays active. A failed
    /// rename or open also leaves the current handle in place.
    pub fn rotate(&mut self) -> io::Result<()> {
        self.file.sync_all()?;

        if let Err(e) = shift_backups(&self.path, self.rotation.max_files) {
            if backup_path(&self.path, 0).exists() {
                return Err(e);
            }
            diag::warn(&format!(
                "rotation of {} incomplete: {}",
                self.path.display(),
                e
            ));
        }

        fs::rename(&self.path, backup_path(&self.path, 0))?;
        let fresh = open_append(&self.path)?;
        // Dropping the previous handle closes it.
        drop(std::mem::replace(&mut self.file, fresh));
        Ok(())
    }
}

impl Write for RotatingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        // File::flush is a no-op; push the data to disk instead.
        self.file.sync_all()
    }
}
