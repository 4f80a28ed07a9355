//! # flatcopy
//!
//! Concurrent flat-directory file copier with a per-copy timing journal.
//!
//! ## Features
//!
//! - **Recursive scan**: collects every regular file under the source tree
//!   before any copying starts
//! - **Fixed worker pool**: a configurable number of threads claim files
//!   from a shared queue, one index at a time
//! - **Flat destination**: all files land in one directory by default, with
//!   an optional mirrored layout
//! - **Timing journal**: every successful copy appends a CSV record with
//!   source path, worker id and elapsed seconds
//! - **Failure isolation**: a file that cannot be copied is reported and
//!   skipped, never aborting the run
//!
//! ## Quick Start
//!
//! ```no_run
//! use flatcopy::config::CopyConfig;
//! use flatcopy::core::CopyEngine;
//!
//! fn main() -> flatcopy::error::Result<()> {
//!     let config = CopyConfig {
//!         source: "/data/in".into(),
//!         destination: "/data/out".into(),
//!         ..Default::default()
//!     };
//!
//!     let result = CopyEngine::new(config).execute()?;
//!     result.print_summary();
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod core;
pub mod error;
pub mod fs;
pub mod journal;

pub use config::{CliArgs, CopyConfig, DestLayout};
pub use core::{CopyEngine, CopyResult, WorkQueue};
pub use error::{FlatcopyError, Result};
pub use fs::{copy_file, default_buffer_size, scan_tree, FileEntry, ScanResult};
pub use journal::{CsvJournal, Journal, LogRecord, MemoryJournal};

/// Current version of the flatcopy library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{CopyConfig, DestLayout};
    pub use crate::core::{CopyEngine, CopyResult};
    pub use crate::error::{FlatcopyError, Result};
    pub use crate::journal::{Journal, LogRecord};
}
