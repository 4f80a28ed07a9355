//! Streamed copy primitive
//!
//! One file at a time, one reused buffer, plain blocking reads and writes.
//! The buffer defaults to the platform's preferred I/O block size rather
//! than a hand-picked constant.

use crate::error::{FlatcopyError, Result};
use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::Path;

/// Returns the platform's preferred I/O block size in bytes.
#[cfg(unix)]
pub fn default_buffer_size() -> usize {
    libc::BUFSIZ as usize
}

/// Returns the platform's preferred I/O block size in bytes.
#[cfg(not(unix))]
pub fn default_buffer_size() -> usize {
    8 * 1024
}

/// Copies `source` to `dest` through a fixed-size buffer and returns the
/// number of bytes written.
///
/// The destination is created if absent and truncated if present, so an
/// existing file is silently replaced. A write that lands fewer bytes than
/// were read fails the copy immediately with
/// [`FlatcopyError::PartialWrite`]; there is no retry of the remainder.
/// A zero `buffer_size` is rejected with [`FlatcopyError::Config`] before
/// either file is touched. Both handles are closed on every exit path.
pub fn copy_file(source: &Path, dest: &Path, buffer_size: usize) -> Result<u64> {
    if buffer_size == 0 {
        return Err(FlatcopyError::config("copy buffer size must be at least 1 byte"));
    }

    let mut reader = File::open(source).map_err(|e| FlatcopyError::SourceOpen {
        path: source.to_path_buf(),
        source: e,
    })?;

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o644);
    }
    let mut writer = options.open(dest).map_err(|e| FlatcopyError::DestOpen {
        path: dest.to_path_buf(),
        source: e,
    })?;

    let mut buffer = vec![0u8; buffer_size];
    let mut bytes_copied = 0u64;

    loop {
        let bytes_read = reader
            .read(&mut buffer)
            .map_err(|e| FlatcopyError::io(source, e))?;
        if bytes_read == 0 {
            break;
        }

        let bytes_written = writer
            .write(&buffer[..bytes_read])
            .map_err(|e| FlatcopyError::io(dest, e))?;
        if bytes_written != bytes_read {
            return Err(FlatcopyError::PartialWrite {
                path: dest.to_path_buf(),
                expected: bytes_read,
                written: bytes_written,
            });
        }

        bytes_copied += bytes_written as u64;
    }

    Ok(bytes_copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const TEST_BUFFER: usize = 64;

    fn write_file(path: &Path, content: &[u8]) {
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_default_buffer_size_is_positive() {
        assert!(default_buffer_size() > 0);
    }

    #[test]
    fn test_copy_small_file() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("source.txt");
        let dest = temp.path().join("dest.txt");
        write_file(&source, b"hello world");

        let bytes = copy_file(&source, &dest, TEST_BUFFER).unwrap();

        assert_eq!(bytes, 11);
        assert_eq!(fs::read(&dest).unwrap(), b"hello world");
    }

    #[test]
    fn test_copy_empty_file() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("empty");
        let dest = temp.path().join("empty.out");
        write_file(&source, b"");

        let bytes = copy_file(&source, &dest, TEST_BUFFER).unwrap();

        assert_eq!(bytes, 0);
        assert!(dest.exists());
        assert_eq!(fs::metadata(&dest).unwrap().len(), 0);
    }

    #[test]
    fn test_copy_spans_multiple_buffers() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("source.bin");
        let dest = temp.path().join("dest.bin");
        // Not a multiple of the buffer size, so the last read is short.
        let content: Vec<u8> = (0..3 * TEST_BUFFER + 7).map(|i| (i % 251) as u8).collect();
        write_file(&source, &content);

        let bytes = copy_file(&source, &dest, TEST_BUFFER).unwrap();

        assert_eq!(bytes, content.len() as u64);
        assert_eq!(fs::read(&dest).unwrap(), content);
    }

    #[test]
    fn test_copy_exact_buffer_multiple() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("source.bin");
        let dest = temp.path().join("dest.bin");
        let content = vec![0xabu8; 2 * TEST_BUFFER];
        write_file(&source, &content);

        let bytes = copy_file(&source, &dest, TEST_BUFFER).unwrap();

        assert_eq!(bytes, content.len() as u64);
        assert_eq!(fs::read(&dest).unwrap(), content);
    }

    #[test]
    fn test_copy_overwrites_and_truncates() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("source.txt");
        let dest = temp.path().join("dest.txt");
        write_file(&source, b"short");
        write_file(&dest, b"a much longer pre-existing destination");

        copy_file(&source, &dest, TEST_BUFFER).unwrap();

        assert_eq!(fs::read(&dest).unwrap(), b"short");
    }

    #[test]
    fn test_zero_buffer_is_rejected_before_touching_dest() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("source.txt");
        let dest = temp.path().join("dest.txt");
        write_file(&source, b"data");
        write_file(&dest, b"precious");

        let result = copy_file(&source, &dest, 0);

        assert!(matches!(result, Err(FlatcopyError::Config(_))));
        assert_eq!(fs::read(&dest).unwrap(), b"precious");
    }

    #[test]
    fn test_missing_source_is_source_open_error() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("absent.txt");
        let dest = temp.path().join("dest.txt");

        let result = copy_file(&source, &dest, TEST_BUFFER);

        assert!(matches!(result, Err(FlatcopyError::SourceOpen { .. })));
        assert!(!dest.exists());
    }

    #[test]
    fn test_missing_dest_directory_is_dest_open_error() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("source.txt");
        let dest = temp.path().join("no-such-dir").join("dest.txt");
        write_file(&source, b"data");

        let result = copy_file(&source, &dest, TEST_BUFFER);

        assert!(matches!(result, Err(FlatcopyError::DestOpen { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_source_is_source_open_error() {
        use std::os::unix::fs::PermissionsExt;

        if unsafe { libc::geteuid() } == 0 {
            return;
        }

        let temp = TempDir::new().unwrap();
        let source = temp.path().join("locked.txt");
        let dest = temp.path().join("dest.txt");
        write_file(&source, b"secret");
        fs::set_permissions(&source, fs::Permissions::from_mode(0o000)).unwrap();

        let result = copy_file(&source, &dest, TEST_BUFFER);

        fs::set_permissions(&source, fs::Permissions::from_mode(0o644)).unwrap();
        assert!(matches!(result, Err(FlatcopyError::SourceOpen { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_new_destination_mode_is_644() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let source = temp.path().join("source.txt");
        let dest = temp.path().join("dest.txt");
        write_file(&source, b"data");

        copy_file(&source, &dest, TEST_BUFFER).unwrap();

        let mode = fs::metadata(&dest).unwrap().permissions().mode() & 0o777;
        // The process umask can only clear bits, never add them.
        assert_eq!(mode & !0o644, 0);
        assert!(mode & 0o600 != 0);
    }
}
