//! Studio process configuration

use crate::watch::WatchConfig;
use std::path::PathBuf;
use std::time::Duration;

/// Name of the database file inside the storage directory
pub const DB_FILE_NAME: &str = "scribe.db";

/// Configuration for the studio data server
///
/// Plain values only; reading flags or the environment is the caller's
/// job.
#[derive(Debug, Clone)]
pub struct StudioConfig {
    /// Directory holding the serialized store; `None` disables the
    /// database watcher entirely
    pub storage_dir: Option<PathBuf>,

    /// Watcher cadence while the database file is present
    pub poll_interval: Duration,

    /// Watcher cadence while the database file is missing
    pub absent_backoff: Duration,

    /// Timestamp jitter absorbed by the watcher's change predicate
    pub mtime_tolerance: Duration,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            storage_dir: None,
            poll_interval: Duration::from_millis(100),
            absent_backoff: Duration::from_secs(1),
            mtime_tolerance: Duration::from_secs(1),
        }
    }
}

impl StudioConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn storage_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage_dir = Some(dir.into());
        self
    }

    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn absent_backoff(mut self, interval: Duration) -> Self {
        self.absent_backoff = interval;
        self
    }

    pub fn mtime_tolerance(mut self, tolerance: Duration) -> Self {
        self.mtime_tolerance = tolerance;
        self
    }

    /// Path of the watched database file, when storage is configured
    pub fn database_path(&self) -> Option<PathBuf> {
        self.storage_dir.as_ref().map(|dir| dir.join(DB_FILE_NAME))
    }

    /// Watcher configuration, when storage is configured
    pub fn watch_config(&self) -> Option<WatchConfig> {
        self.database_path().map(|path| {
            WatchConfig::new(path)
                .poll_interval(self.poll_interval)
                .absent_backoff(self.absent_backoff)
                .mtime_tolerance(self.mtime_tolerance)
        })
    }
}
