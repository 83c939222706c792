//! Daily file logger.
//!
//! Appends one line per entry to a file named after the current date in the
//! Zurich time zone and keeps at most `MAX_LOG_FILES` files on disk, deleting
//! the oldest by modification time. Logging never fails from the caller's
//! point of view: I/O errors are reported on stderr and swallowed.

use std::borrow::Cow;
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use chrono::{DateTime, Utc};

use crate::config::{LOG_FILE_EXTENSION, LOG_TIMEZONE, MAX_LOG_FILES};

/// Severity of a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warning,
    Error,
    Critical,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Critical => "CRITICAL",
        };
        f.write_str(label)
    }
}

struct Inner {
    dir: PathBuf,
    max_files: usize,
    disabled: bool,
}

/// Daily rotating file logger. Cheap to clone.
#[derive(Clone)]
pub struct DailyLogger {
    inner: Arc<Inner>,
}

impl fmt::Debug for DailyLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DailyLogger")
            .field("dir", &self.inner.dir)
            .field("max_files", &self.inner.max_files)
            .field("disabled", &self.inner.disabled)
            .finish()
    }
}

impl DailyLogger {
    /// Create a logger writing into `dir`, creating it if needed.
    ///
    /// If the directory cannot be created the logger disables itself and
    /// every later call is a no-op.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_max_files(dir, MAX_LOG_FILES)
    }

    /// Same as [`DailyLogger::new`] with a custom retention count.
    pub fn with_max_files(dir: impl Into<PathBuf>, max_files: usize) -> Self {
        let dir = dir.into();
        let disabled = match fs::create_dir_all(&dir) {
            Ok(()) => false,
            Err(e) => {
                eprintln!(
                    "[Logger Init Error] Failed to create log dir {}: {}",
                    dir.display(),
                    e
                );
                true
            }
        };

        Self {
            inner: Arc::new(Inner {
                dir,
                max_files,
                disabled,
            }),
        }
    }

    /// Directory the log files live in.
    pub fn dir(&self) -> &Path {
        &self.inner.dir
    }

    /// Whether directory creation failed at construction.
    pub fn is_disabled(&self) -> bool {
        self.inner.disabled
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Info, message);
    }

    pub fn warning(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Warning, message);
    }

    pub fn error(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Error, message);
    }

    pub fn critical(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Critical, message);
    }

    /// Record an entry at the current time.
    pub fn log(&self, level: LogLevel, message: impl AsRef<str>) {
        self.log_at(level, message.as_ref(), Utc::now());
    }

    /// Record an entry as if written at `at`.
    pub fn log_at(&self, level: LogLevel, message: &str, at: DateTime<Utc>) {
        mirror_to_tracing(level, message);

        if self.inner.disabled {
            return;
        }

        if let Err(e) = self.append(level, message, at) {
            eprintln!("[Logger Error] {}", e);
            return;
        }

        if let Err(e) = self.enforce_limit() {
            eprintln!("[Logger Cleanup Error] {}", e);
        }
    }

    /// Path of the file an entry written at `at` lands in.
    pub fn file_for(&self, at: DateTime<Utc>) -> PathBuf {
        let local = at.with_timezone(&LOG_TIMEZONE);
        self.inner.dir.join(format!(
            "{}.{}",
            local.format("%d.%m.%Y"),
            LOG_FILE_EXTENSION
        ))
    }

    fn append(&self, level: LogLevel, message: &str, at: DateTime<Utc>) -> io::Result<()> {
        let local = at.with_timezone(&LOG_TIMEZONE);
        let line = format!(
            "[{}] [{}] {}\n",
            local.format("%H:%M:%S"),
            level,
            single_line(message)
        );

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.file_for(at))?;
        file.write_all(line.as_bytes())
    }

    fn enforce_limit(&self) -> io::Result<()> {
        let mut files: Vec<(PathBuf, SystemTime)> = Vec::new();
        for entry in fs::read_dir(&self.inner.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(LOG_FILE_EXTENSION) {
                continue;
            }
            let modified = fs::metadata(&path)?.modified()?;
            files.push((path, modified));
        }

        if files.len() <= self.inner.max_files {
            return Ok(());
        }

        files.sort_by_key(|(_, modified)| *modified);
        let excess = files.len() - self.inner.max_files;
        for (path, _) in files.into_iter().take(excess) {
            fs::remove_file(path)?;
        }

        Ok(())
    }
}

fn mirror_to_tracing(level: LogLevel, message: &str) {
    match level {
        LogLevel::Info => tracing::info!(target: "notifier", "{}", message),
        LogLevel::Warning => tracing::warn!(target: "notifier", "{}", message),
        LogLevel::Error => tracing::error!(target: "notifier", "{}", message),
        LogLevel::Critical => tracing::error!(target: "notifier", critical = true, "{}", message),
    }
}

/// Escape line breaks so one call always writes exactly one line.
fn single_line(message: &str) -> Cow<'_, str> {
    if message.contains(['\r', '\n']) {
        Cow::Owned(message.replace('\r', "\\r").replace('\n', "\\n"))
    } else {
        Cow::Borrowed(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use std::fs::File;
    use std::time::{Duration as StdDuration, UNIX_EPOCH};

    fn log_files(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|n| n.ends_with(".log"))
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_entry_uses_zurich_time() {
        let tmp = tempfile::tempdir().unwrap();
        let logger = DailyLogger::new(tmp.path());

        // 22:30 UTC in summer is 00:30 the next day in Zurich
        let at = Utc.with_ymd_and_hms(2024, 7, 1, 22, 30, 0).unwrap();
        logger.log_at(LogLevel::Warning, "late night", at);

        let path = tmp.path().join("02.07.2024.log");
        let content = fs::read_to_string(path).unwrap();
        assert_eq!(content, "[00:30:00] [WARNING] late night\n");
    }

    #[test]
    fn test_entries_append_to_same_day() {
        let tmp = tempfile::tempdir().unwrap();
        let logger = DailyLogger::new(tmp.path());
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap();

        logger.log_at(LogLevel::Info, "first", at);
        logger.log_at(LogLevel::Critical, "second", at + Duration::seconds(5));

        let content = fs::read_to_string(tmp.path().join("15.01.2024.log")).unwrap();
        assert_eq!(
            content,
            "[10:00:00] [INFO] first\n[10:00:05] [CRITICAL] second\n"
        );
    }

    #[test]
    fn test_line_breaks_cannot_forge_entries() {
        let tmp = tempfile::tempdir().unwrap();
        let logger = DailyLogger::new(tmp.path());
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap();

        logger.log_at(
            LogLevel::Warning,
            "Failed login for user: x\r\n[10:00:00] [INFO] forged",
            at,
        );

        let content = fs::read_to_string(tmp.path().join("15.01.2024.log")).unwrap();
        assert_eq!(content.lines().count(), 1);
        assert_eq!(
            content,
            "[10:00:00] [WARNING] Failed login for user: x\\r\\n[10:00:00] [INFO] forged\n"
        );
    }

    #[test]
    fn test_creates_missing_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested").join("log");
        let logger = DailyLogger::new(&dir);

        assert!(!logger.is_disabled());
        logger.info("hello");
        assert_eq!(log_files(&dir).len(), 1);
    }

    #[test]
    fn test_disabled_when_directory_cannot_be_created() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("blocker");
        File::create(&blocker).unwrap();

        let logger = DailyLogger::new(blocker.join("log"));
        assert!(logger.is_disabled());

        // Must not panic or create anything
        logger.error("dropped");
        assert!(!blocker.join("log").exists());
    }

    #[test]
    fn test_retention_keeps_newest_files() {
        let tmp = tempfile::tempdir().unwrap();
        let logger = DailyLogger::new(tmp.path());

        // 199 older days with strictly increasing modification times
        let first_day = Utc.with_ymd_and_hms(2020, 1, 1, 12, 0, 0).unwrap();
        let mut names = Vec::new();
        for day in 0..199 {
            let at = first_day + Duration::days(day);
            let path = logger.file_for(at);
            let file = File::create(&path).unwrap();
            let mtime = UNIX_EPOCH + StdDuration::from_secs(at.timestamp() as u64);
            file.set_modified(mtime).unwrap();
            names.push(path.file_name().unwrap().to_string_lossy().into_owned());
        }

        // The 200th day is written through the logger
        logger.info("day 200");

        let remaining = log_files(tmp.path());
        assert_eq!(remaining.len(), MAX_LOG_FILES);
        for oldest in &names[..30] {
            assert!(!remaining.contains(oldest), "{} should be pruned", oldest);
        }
        for kept in &names[30..] {
            assert!(remaining.contains(kept), "{} should be kept", kept);
        }
    }

    #[test]
    fn test_retention_ignores_other_files() {
        let tmp = tempfile::tempdir().unwrap();
        let logger = DailyLogger::with_max_files(tmp.path(), 1);
        File::create(tmp.path().join("notes.txt")).unwrap();

        let at = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        logger.log_at(LogLevel::Info, "a", at);
        logger.log_at(LogLevel::Info, "b", at + Duration::days(1));

        assert!(tmp.path().join("notes.txt").exists());
        assert_eq!(log_files(tmp.path()).len(), 1);
    }

    #[test]
    fn test_level_labels() {
        assert_eq!(LogLevel::Info.to_string(), "INFO");
        assert_eq!(LogLevel::Warning.to_string(), "WARNING");
        assert_eq!(LogLevel::Error.to_string(), "ERROR");
        assert_eq!(LogLevel::Critical.to_string(), "CRITICAL");
    }
}
