//! Recursive directory scanner
//!
//! Walks the source tree once, before any worker starts, and produces the
//! complete list of regular files to copy. Directories are descended into,
//! symlinks and special files are ignored. The returned list is immutable
//! for the rest of the run; workers only ever index into it.

use crate::error::{FlatcopyError, IoResultExt, Result};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use walkdir::WalkDir;

/// A single regular file discovered during the scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Absolute path of the source file.
    pub path: PathBuf,
    /// Path relative to the scan root, used for mirrored destinations.
    pub relative_path: PathBuf,
}

/// Outcome of a full source scan.
#[derive(Debug, Clone)]
pub struct ScanResult {
    /// Canonicalized scan root.
    pub root: PathBuf,
    /// Every regular file found, in traversal order.
    pub files: Vec<FileEntry>,
    /// Entries that could not be classified (stat failed) and were skipped.
    pub skipped: usize,
    /// Wall-clock time the scan took.
    pub scan_duration: Duration,
}

/// Recursively scans `root` and collects all regular files beneath it.
///
/// A directory that cannot be listed aborts the scan with an error; an
/// individual entry that cannot be classified is reported on stderr,
/// counted in [`ScanResult::skipped`] and left out of the list. Hidden
/// files are treated like any other file.
pub fn scan_tree(root: &Path) -> Result<ScanResult> {
    if !root.exists() {
        return Err(FlatcopyError::NotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(FlatcopyError::NotADirectory(root.to_path_buf()));
    }
    let root = root.canonicalize().with_path(root)?;

    let start_time = Instant::now();
    let mut files = Vec::new();
    let mut skipped = 0usize;

    for entry in WalkDir::new(&root).min_depth(1).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                // A directory we cannot list means the file list would be
                // incomplete, so the whole scan fails.
                let path = err
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root.clone());
                let source = err.into_io_error().unwrap_or_else(|| {
                    std::io::Error::new(std::io::ErrorKind::Other, "directory walk failed")
                });
                return Err(FlatcopyError::scan(path, source));
            }
        };

        let path = entry.path();
        let metadata = match entry.metadata() {
            Ok(metadata) => metadata,
            Err(err) => {
                eprintln!("flatcopy: cannot stat '{}': {}", path.display(), err);
                skipped += 1;
                continue;
            }
        };

        if metadata.is_file() {
            let relative_path = path.strip_prefix(&root).unwrap_or(path).to_path_buf();
            files.push(FileEntry {
                path: path.to_path_buf(),
                relative_path,
            });
        }
    }

    Ok(ScanResult {
        root,
        files,
        skipped,
        scan_duration: start_time.elapsed(),
    })
}
