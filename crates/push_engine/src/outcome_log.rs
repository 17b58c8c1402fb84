use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use push_logging::push_warn;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutcomeLogError {
    #[error("cannot create log directory {path:?}: {source}")]
    Directory { path: PathBuf, source: io::Error },
    #[error("io error on {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },
}

/// `[YYYY-MM-DD HH:MM:SS] message\n`. Line breaks inside `message` are
/// flattened so one event always stays one line.
pub fn format_entry(at: &NaiveDateTime, message: &str) -> String {
    let flat = message.replace(['\r', '\n'], " ");
    format!("[{}] {}\n", at.format("%Y-%m-%d %H:%M:%S"), flat)
}

/// Append-only, human-readable record of every push attempt.
#[derive(Debug, Clone)]
pub struct OutcomeLog {
    path: PathBuf,
}

impl OutcomeLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one line; a failed write is reported as a diagnostic and dropped.
    pub fn append(&self, message: &str) {
        if let Err(err) = self.try_append(message) {
            push_warn!("Dropping outcome log entry: {}", err);
        }
    }

    /// Append one line while holding an exclusive lock on the file, so
    /// concurrent writers in this or other processes never interleave.
    pub fn try_append(&self, message: &str) -> Result<(), OutcomeLogError> {
        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|source| OutcomeLogError::Directory {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        let entry = format_entry(&Local::now().naive_local(), message);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| self.io_error(source))?;

        file.lock().map_err(|source| self.io_error(source))?;
        let written = file.write_all(entry.as_bytes()).and_then(|()| file.flush());
        // Closing the file releases the lock as well.
        let _ = file.unlock();
        written.map_err(|source| self.io_error(source))
    }

    fn io_error(&self, source: io::Error) -> OutcomeLogError {
        OutcomeLogError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
