//! Error types for flatcopy
//!
//! This module defines all error types used throughout the application,
//! separating fatal setup/scan failures from the per-file copy failures
//! that workers absorb and report.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for flatcopy operations
#[derive(Error, Debug)]
pub enum FlatcopyError {
    /// I/O error during file operations
    #[error("I/O error at '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A directory could not be opened for listing; fatal to the whole scan
    #[error("cannot list directory '{path}': {source}")]
    Scan {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Source file could not be opened for reading
    #[error("cannot open source '{path}': {source}")]
    SourceOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Destination file could not be created/truncated
    #[error("cannot create destination '{path}': {source}")]
    DestOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A write transferred fewer bytes than were read; the copy is abandoned
    #[error("short write to '{path}': wrote {written} of {expected} bytes")]
    PartialWrite {
        path: PathBuf,
        expected: usize,
        written: usize,
    },

    /// File or directory not found
    #[error("path not found: {0}")]
    NotFound(PathBuf),

    /// Expected a directory, found something else
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl FlatcopyError {
    /// Create an I/O error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a fatal scan error for an unlistable directory
    pub fn scan(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Scan {
            path: path.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Check if this error is a permission issue
    pub fn is_permission_error(&self) -> bool {
        match self {
            Self::Io { source, .. }
            | Self::Scan { source, .. }
            | Self::SourceOpen { source, .. }
            | Self::DestOpen { source, .. } => {
                source.kind() == std::io::ErrorKind::PermissionDenied
            }
            _ => false,
        }
    }

    /// Get the path associated with this error, if any
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Io { path, .. }
            | Self::Scan { path, .. }
            | Self::SourceOpen { path, .. }
            | Self::DestOpen { path, .. }
            | Self::PartialWrite { path, .. }
            | Self::NotFound(path)
            | Self::NotADirectory(path) => Some(path),
            Self::Config(_) => None,
        }
    }
}

/// Result type alias for flatcopy operations
pub type Result<T> = std::result::Result<T, FlatcopyError>;

impl From<std::io::Error> for FlatcopyError {
    fn from(err: std::io::Error) -> Self {
        FlatcopyError::Io {
            path: PathBuf::new(),
            source: err,
        }
    }
}

/// Extension trait for adding path context to std::io::Result
pub trait IoResultExt<T> {
    /// Add path context to an I/O error
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|e| FlatcopyError::io(path, e))
    }
}
