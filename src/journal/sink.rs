//! Timing journal sinks
//!
//! The engine injects a [`Journal`] into its workers; production runs use
//! [`CsvJournal`], tests can substitute [`MemoryJournal`]. Appends are
//! best-effort from the caller's point of view: a record that cannot be
//! written must never fail the copy it describes.

use crate::error::{IoResultExt, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// One completed copy, as recorded in the journal.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    /// Source path of the copied file.
    pub source: PathBuf,
    /// Index of the worker that performed the copy.
    pub worker: usize,
    /// Wall-clock duration of the copy in seconds.
    pub elapsed_secs: f64,
}

impl LogRecord {
    /// Renders the record as its CSV line, without a trailing newline.
    pub fn to_csv_line(&self) -> String {
        format!(
            "{},{},{:.6}",
            self.source.display(),
            self.worker,
            self.elapsed_secs
        )
    }
}

/// Destination for copy timing records. Implementations must tolerate
/// concurrent appends from multiple workers.
pub trait Journal: Send + Sync {
    /// Appends one record.
    fn append(&self, record: &LogRecord) -> Result<()>;
}

/// Append-only CSV journal backed by a file.
///
/// The file is opened in append mode for every record and closed again
/// right after, so every line already written survives a crash and no
/// handle is shared between workers. Existing content is never truncated;
/// repeated runs accumulate.
#[derive(Debug, Clone)]
pub struct CsvJournal {
    path: PathBuf,
}

impl CsvJournal {
    /// Creates a journal that appends to `path`. The file itself is only
    /// created on the first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Journal for CsvJournal {
    fn append(&self, record: &LogRecord) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_path(&self.path)?;
        // One write per record: append-mode writes of a whole line keep
        // concurrently written lines from interleaving.
        let line = format!("{}\n", record.to_csv_line());
        file.write_all(line.as_bytes()).with_path(&self.path)?;
        Ok(())
    }
}

/// In-memory journal for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryJournal {
    records: Mutex<Vec<LogRecord>>,
}

impl MemoryJournal {
    /// Creates an empty journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all records appended so far.
    pub fn records(&self) -> Vec<LogRecord> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Number of records appended so far.
    pub fn len(&self) -> usize {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    /// Whether no record has been appended yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Journal for MemoryJournal {
    fn append(&self, record: &LogRecord) -> Result<()> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(record.clone());
        Ok(())
    }
}
