//! Rotating file writer with size-based rotation and backup retention.
//!
//! Keeps trace files from growing without bound. When the current file exceeds
//! the configured size it is renamed with a UTC timestamp suffix, a fresh file is
//! started, and only the newest backups are retained.

use chrono::Utc;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Default maximum file size before rotation (10 MiB).
pub const DEFAULT_MAX_BYTES: u64 = 10 * 1024 * 1024;

/// Default number of backup files to retain.
pub const DEFAULT_BACKUPS: usize = 3;

/// Thread-safe rotating line writer.
///
/// The file is opened lazily on the first write. Backups are named
/// `<file name>.<YYYYmmddTHHMMSSfff>` and ordered by name, oldest first.
pub struct RotatingFileWriter {
    file_path: PathBuf,
    max_bytes: u64,
    backups: usize,
    writer: Mutex<Option<File>>,
}

impl RotatingFileWriter {
    #[must_use]
    pub const fn new(file_path: PathBuf, max_bytes: u64, backups: usize) -> Self {
        Self {
            file_path,
            max_bytes,
            backups,
            writer: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Appends `line` plus a newline, rotating first if the file is too large.
    ///
    /// # Errors
    ///
    /// Returns an error if rotation, opening, writing or flushing fails, or if
    /// another thread panicked while holding the lock.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| io::Error::other(format!("Mutex poisoned: {e}")))?;

        if fs::metadata(&self.file_path).is_ok_and(|m| m.len() > self.max_bytes) {
            *writer = None;
            self.rotate()?;
        }

        if writer.is_none() {
            *writer = Some(
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&self.file_path)?,
            );
        }
        let Some(file) = writer.as_mut() else {
            return Err(io::Error::other("No file available"));
        };

        writeln!(file, "{line}")?;
        file.flush()
    }

    fn rotate(&self) -> io::Result<()> {
        let stamp = Utc::now().format("%Y%m%dT%H%M%S%3f").to_string();
        let base = self.backup_prefix()?;

        let mut backup = self.file_path.with_file_name(format!("{base}{stamp}"));
        let mut n = 1;
        while backup.exists() {
            backup = self.file_path.with_file_name(format!("{base}{stamp}-{n}"));
            n += 1;
        }

        fs::rename(&self.file_path, &backup)?;
        self.cleanup_old_backups()
    }

    fn backup_prefix(&self) -> io::Result<String> {
        self.file_path
            .file_name()
            .and_then(|s| s.to_str())
            .map(|name| format!("{name}."))
            .ok_or_else(|| io::Error::other("Invalid file name"))
    }

    /// Existing backups, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be read.
    pub fn backup_files(&self) -> io::Result<Vec<PathBuf>> {
        let prefix = self.backup_prefix()?;
        let parent = match self.file_path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };

        let mut backups: Vec<PathBuf> = fs::read_dir(parent)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with(&prefix))
            })
            .collect();
        backups.sort();
        Ok(backups)
    }

    fn cleanup_old_backups(&self) -> io::Result<()> {
        let backups = self.backup_files()?;
        let excess = backups.len().saturating_sub(self.backups);
        for old in &backups[..excess] {
            let _ = fs::remove_file(old);
        }
        Ok(())
    }
}

impl std::fmt::Debug for RotatingFileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingFileWriter")
            .field("file_path", &self.file_path)
            .field("max_bytes", &self.max_bytes)
            .field("backups", &self.backups)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_lines_below_threshold() {
        let dir = tempfile::tempdir().unwrap();
        let writer = RotatingFileWriter::new(dir.path().join("trace.json"), 1024, 3);

        writer.write_line("{\"a\":1}").unwrap();
        writer.write_line("{\"b\":2}").unwrap();

        let contents = fs::read_to_string(writer.path()).unwrap();
        assert_eq!(contents, "{\"a\":1}\n{\"b\":2}\n");
        assert!(writer.backup_files().unwrap().is_empty());
    }

    #[test]
    fn rotates_and_keeps_newest_backups() {
        let dir = tempfile::tempdir().unwrap();
        let writer = RotatingFileWriter::new(dir.path().join("trace.json"), 10, 2);

        for i in 0..5 {
            writer.write_line(&format!("line number {i}")).unwrap();
        }

        assert_eq!(fs::read_to_string(writer.path()).unwrap(), "line number 4\n");

        let backups = writer.backup_files().unwrap();
        assert_eq!(backups.len(), 2);
        let newest = fs::read_to_string(&backups[1]).unwrap();
        assert_eq!(newest, "line number 3\n");
    }
}
