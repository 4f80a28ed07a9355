//! Configuration settings for flatcopy
//!
//! Defines all configuration options, CLI arguments, and defaults
//! for the copy run.

use crate::error::{FlatcopyError, Result};
use crate::fs::default_buffer_size;
use clap::Parser;
use std::path::PathBuf;

/// Default number of worker threads.
///
/// A startup constant, deliberately not derived from the machine's core
/// count: the pool size bounds concurrent file descriptors and destination
/// contention, not CPU work.
pub const DEFAULT_WORKERS: usize = 4;

/// Default journal filename, relative to the working directory.
pub const DEFAULT_LOG_FILE: &str = "logfile.csv";

/// flatcopy - copy a directory tree into one flat directory, in parallel
#[derive(Parser, Debug, Clone)]
#[command(name = "flatcopy")]
#[command(author = "Flatcopy Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Concurrent flat-directory file copier with a timing journal")]
#[command(long_about = r#"
flatcopy recursively collects every regular file under SOURCE and copies
them all into DEST using a fixed pool of worker threads. Each successful
copy is timed and appended to a CSV journal (source path, worker id,
elapsed seconds).

By default all files land directly in DEST; files from different
subdirectories that share a name overwrite one another, last writer wins.
Pass --mirror to reproduce the source directory structure instead.

Examples:
  flatcopy /data/in /data/out                 # flat copy, 4 workers
  flatcopy /data/in /data/out --threads 8     # bigger pool
  flatcopy /data/in /data/out --mirror        # keep directory structure
  flatcopy /data/in /data/out --log-file /tmp/copies.csv
"#)]
pub struct CliArgs {
    /// Source directory to scan recursively
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Destination directory (created if missing)
    #[arg(value_name = "DEST")]
    pub destination: PathBuf,

    /// Number of worker threads
    #[arg(short = 't', long, default_value_t = DEFAULT_WORKERS, value_name = "NUM")]
    pub threads: usize,

    /// Buffer size for file copies (e.g. 8K, 1M); default is the platform block size
    #[arg(short = 'b', long, value_name = "SIZE")]
    pub buffer_size: Option<String>,

    /// Journal file path (appended to, never truncated)
    #[arg(long, default_value = DEFAULT_LOG_FILE, value_name = "PATH")]
    pub log_file: PathBuf,

    /// Mirror the source directory structure instead of flattening
    #[arg(long)]
    pub mirror: bool,

    /// Quiet mode (suppress per-file output and the summary)
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Verbose output (can be repeated: -v, -vv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// How claimed files are placed under the destination directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DestLayout {
    /// Every file lands directly in the destination directory. Files from
    /// different subdirectories that share a basename overwrite each other,
    /// last writer wins.
    #[default]
    Flat,
    /// Each file keeps its path relative to the source root.
    Mirror,
}

/// Runtime configuration derived from CLI args
#[derive(Debug, Clone)]
pub struct CopyConfig {
    /// Source directory
    pub source: PathBuf,
    /// Destination directory
    pub destination: PathBuf,
    /// Worker thread count
    pub threads: usize,
    /// Copy buffer size in bytes
    pub buffer_size: usize,
    /// Destination layout
    pub layout: DestLayout,
    /// Journal file path
    pub log_file: PathBuf,
    /// Suppress per-file stdout lines and the summary
    pub quiet: bool,
}

impl Default for CopyConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::new(),
            destination: PathBuf::new(),
            threads: DEFAULT_WORKERS,
            buffer_size: default_buffer_size(),
            layout: DestLayout::Flat,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            quiet: false,
        }
    }
}

impl CopyConfig {
    /// Create config from CLI arguments
    pub fn from_cli(args: &CliArgs) -> Result<Self> {
        if args.threads == 0 {
            return Err(FlatcopyError::config("thread count must be at least 1"));
        }

        let buffer_size = match &args.buffer_size {
            Some(s) => {
                let bytes = parse_size(s)
                    .map_err(|e| FlatcopyError::config(format!("invalid buffer size: {}", e)))?;
                if bytes == 0 {
                    return Err(FlatcopyError::config("buffer size must be at least 1 byte"));
                }
                bytes as usize
            }
            None => default_buffer_size(),
        };

        Ok(Self {
            source: args.source.clone(),
            destination: args.destination.clone(),
            threads: args.threads,
            buffer_size,
            layout: if args.mirror {
                DestLayout::Mirror
            } else {
                DestLayout::Flat
            },
            log_file: args.log_file.clone(),
            quiet: args.quiet,
        })
    }
}

/// Parse human-readable size string to bytes
pub fn parse_size(size: &str) -> std::result::Result<u64, String> {
    let size = size.trim().to_uppercase();

    if size.is_empty() {
        return Err("empty size string".to_string());
    }

    let (num_str, multiplier) = if size.ends_with("TB") || size.ends_with('T') {
        let num = size.trim_end_matches(|c| c == 'T' || c == 'B');
        (num, 1024u64 * 1024 * 1024 * 1024)
    } else if size.ends_with("GB") || size.ends_with('G') {
        let num = size.trim_end_matches(|c| c == 'G' || c == 'B');
        (num, 1024u64 * 1024 * 1024)
    } else if size.ends_with("MB") || size.ends_with('M') {
        let num = size.trim_end_matches(|c| c == 'M' || c == 'B');
        (num, 1024u64 * 1024)
    } else if size.ends_with("KB") || size.ends_with('K') {
        let num = size.trim_end_matches(|c| c == 'K' || c == 'B');
        (num, 1024u64)
    } else if size.ends_with('B') {
        let num = size.trim_end_matches('B');
        (num, 1u64)
    } else {
        // Assume bytes if no suffix
        (size.as_str(), 1u64)
    };

    let num: f64 = num_str
        .trim()
        .parse()
        .map_err(|_| format!("invalid number: {}", num_str))?;

    Ok((num * multiplier as f64) as u64)
}
