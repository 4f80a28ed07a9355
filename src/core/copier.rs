//! Main copy engine
//!
//! Scans the source tree, then drives a fixed pool of worker threads over
//! the file list through the shared [`WorkQueue`]. Workers claim files,
//! copy them, time each copy and append a journal record; outcomes flow
//! back to the coordinator over a channel. One file failing never stops
//! the pool.

use crate::config::{CopyConfig, DestLayout};
use crate::core::WorkQueue;
use crate::error::Result;
use crate::fs::{copy_file, scan_tree, FileEntry};
use crate::journal::{CsvJournal, Journal, LogRecord};
use crossbeam::channel::{unbounded, Sender};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Aggregated outcome of one engine run.
#[derive(Debug, Clone)]
pub struct CopyResult {
    /// Number of files copied successfully.
    pub files_copied: u64,
    /// Total bytes written by successful copies.
    pub bytes_copied: u64,
    /// Files that failed, with the error rendered as text.
    pub failures: Vec<(PathBuf, String)>,
    /// Wall-clock duration of the whole run, scan included.
    pub duration: Duration,
    /// Average throughput in bytes per second.
    pub throughput: f64,
}

impl CopyResult {
    /// True when every claimed file was copied.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Prints a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("\n=== Copy Summary ===");
        println!("Files copied:    {}", self.files_copied);
        println!(
            "Bytes copied:    {}",
            humansize::format_size(self.bytes_copied, humansize::BINARY)
        );
        println!("Duration:        {:.2?}", self.duration);
        println!(
            "Throughput:      {}/s",
            humansize::format_size(self.throughput as u64, humansize::BINARY)
        );
        if !self.failures.is_empty() {
            println!("\nFailures: {}", self.failures.len());
            for (path, error) in &self.failures {
                println!("  {} - {}", path.display(), error);
            }
        }
    }
}

/// Per-file outcome reported by a worker to the coordinator.
enum WorkerOutcome {
    Copied { bytes: u64 },
    Failed { path: PathBuf, error: String },
}

/// Read-only state shared by every worker in the pool.
struct WorkerShared {
    files: Arc<[FileEntry]>,
    queue: WorkQueue,
    destination: PathBuf,
    layout: DestLayout,
    buffer_size: usize,
    quiet: bool,
    journal: Arc<dyn Journal>,
}

/// Main copy engine.
pub struct CopyEngine {
    config: CopyConfig,
    journal: Arc<dyn Journal>,
}

impl CopyEngine {
    /// Creates an engine that journals to the CSV file named in `config`.
    pub fn new(config: CopyConfig) -> Self {
        let journal = Arc::new(CsvJournal::new(&config.log_file));
        Self { config, journal }
    }

    /// Replaces the journal, e.g. with [`crate::journal::MemoryJournal`].
    pub fn with_journal(mut self, journal: Arc<dyn Journal>) -> Self {
        self.journal = journal;
        self
    }

    /// Runs the full copy: scan, then worker pool, then aggregation.
    ///
    /// Returns an error only for setup-level failures (unreadable source
    /// root, unlistable directory, mirror directories that cannot be
    /// created). Per-file copy failures are reported on stderr as they
    /// happen and collected into [`CopyResult::failures`].
    pub fn execute(&self) -> Result<CopyResult> {
        let start_time = Instant::now();

        // The file list is complete and immutable before any worker starts.
        let scan = scan_tree(&self.config.source)?;
        tracing::debug!(
            "Scanned {} files in {:.2?} ({} skipped)",
            scan.files.len(),
            scan.scan_duration,
            scan.skipped
        );

        if self.config.layout == DestLayout::Mirror {
            create_mirror_dirs(&scan.files, &self.config.destination)?;
        }

        let files: Arc<[FileEntry]> = scan.files.into();
        let shared = Arc::new(WorkerShared {
            queue: WorkQueue::new(files.len()),
            files,
            destination: self.config.destination.clone(),
            layout: self.config.layout,
            buffer_size: self.config.buffer_size,
            quiet: self.config.quiet,
            journal: Arc::clone(&self.journal),
        });

        let (outcome_tx, outcome_rx) = unbounded();
        let handles = spawn_copy_workers(self.config.threads, &shared, outcome_tx);

        let mut files_copied = 0u64;
        let mut bytes_copied = 0u64;
        let mut failures = Vec::new();
        for outcome in outcome_rx.iter() {
            match outcome {
                WorkerOutcome::Copied { bytes } => {
                    files_copied += 1;
                    bytes_copied += bytes;
                }
                WorkerOutcome::Failed { path, error } => {
                    failures.push((path, error));
                }
            }
        }

        for handle in handles {
            if handle.join().is_err() {
                tracing::error!("Copy worker panicked");
            }
        }

        let duration = start_time.elapsed();
        let throughput = if duration.as_secs_f64() > 0.0 {
            bytes_copied as f64 / duration.as_secs_f64()
        } else {
            0.0
        };

        Ok(CopyResult {
            files_copied,
            bytes_copied,
            failures,
            duration,
            throughput,
        })
    }
}

/// Spawns the fixed worker pool. Each worker loops on the queue until it
/// observes exhaustion, then drops its outcome sender and exits.
fn spawn_copy_workers(
    threads: usize,
    shared: &Arc<WorkerShared>,
    outcome_tx: Sender<WorkerOutcome>,
) -> Vec<thread::JoinHandle<()>> {
    let mut handles = Vec::with_capacity(threads);

    for worker_id in 0..threads {
        let shared = Arc::clone(shared);
        let outcomes = outcome_tx.clone();

        let handle = thread::spawn(move || {
            run_worker(worker_id, &shared, &outcomes);
            tracing::debug!("Worker {} shutting down", worker_id);
        });
        handles.push(handle);
    }

    handles
}

/// Worker loop: claim an index, copy that file, report the outcome.
fn run_worker(worker_id: usize, shared: &WorkerShared, outcomes: &Sender<WorkerOutcome>) {
    while let Some(index) = shared.queue.claim_next() {
        let entry = &shared.files[index];
        let dest_path = resolve_destination(entry, &shared.destination, shared.layout);
        let copy_start = Instant::now();

        let bytes = match copy_file(&entry.path, &dest_path, shared.buffer_size) {
            Ok(bytes) => bytes,
            Err(err) => {
                eprintln!("flatcopy: failed to copy '{}': {}", entry.path.display(), err);
                let _ = outcomes.send(WorkerOutcome::Failed {
                    path: entry.path.clone(),
                    error: err.to_string(),
                });
                continue;
            }
        };

        // The size in the success line comes from a fresh stat of the
        // source, not from the scan. When that stat fails the copy still
        // counts, but neither the line nor the journal record is emitted.
        match std::fs::metadata(&entry.path) {
            Ok(metadata) => {
                let elapsed_secs = copy_start.elapsed().as_secs_f64();
                if !shared.quiet {
                    println!("copied {} ({} bytes)", entry.path.display(), metadata.len());
                }
                let record = LogRecord {
                    source: entry.path.clone(),
                    worker: worker_id,
                    elapsed_secs,
                };
                if let Err(err) = shared.journal.append(&record) {
                    eprintln!("flatcopy: cannot append to journal: {}", err);
                }
            }
            Err(err) => {
                eprintln!("flatcopy: cannot stat '{}': {}", entry.path.display(), err);
            }
        }

        let _ = outcomes.send(WorkerOutcome::Copied { bytes });
    }
}

/// Resolves where `entry` lands under `destination`.
///
/// Flat layout keeps only the base name, so files with the same name from
/// different directories land on the same path and the last writer wins.
fn resolve_destination(entry: &FileEntry, destination: &Path, layout: DestLayout) -> PathBuf {
    match layout {
        DestLayout::Flat => match entry.path.file_name() {
            Some(name) => destination.join(name),
            None => destination.join(&entry.relative_path),
        },
        DestLayout::Mirror => destination.join(&entry.relative_path),
    }
}

/// Pre-creates every directory a mirrored copy will write into, so the
/// workers themselves never have to create directories.
fn create_mirror_dirs(files: &[FileEntry], destination: &Path) -> Result<()> {
    use crate::error::IoResultExt;
    use std::collections::HashSet;

    let mut seen = HashSet::new();
    for entry in files {
        if let Some(parent) = entry.relative_path.parent() {
            if parent.as_os_str().is_empty() || !seen.insert(parent.to_path_buf()) {
                continue;
            }
            let dir = destination.join(parent);
            if !dir.exists() {
                std::fs::create_dir_all(&dir).with_path(&dir)?;
            }
        }
    }
    Ok(())
}
