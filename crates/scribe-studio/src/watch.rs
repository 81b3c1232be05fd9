//! Polling change detector for the studio database file
//!
//! A fixed-cadence poll loop rather than a filesystem-event subscription:
//! the database may live on storage with no native change notification.
//! Each tick stats the file, reduces the result to a `Snapshot`, and runs
//! an explicit state machine whose only output is the occasional
//! `ChangeKind` handed to the notification hub.

use crate::notify::{ChangeKind, ChangeNotice, NotificationHub};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tokio_util::sync::CancellationToken;

/// Point-in-time summary of the watched file
///
/// Replaced wholesale on every successful stat; fields are never merged
/// individually.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    /// Size in bytes
    pub size: u64,

    /// Modification timestamp as reported by the filesystem
    pub modified: SystemTime,

    /// Storage-location identity token (inode on Unix, constant elsewhere)
    pub identity: u64,
}

impl Snapshot {
    /// Reduce stat metadata to the fields the change predicate reads
    pub fn of(meta: &std::fs::Metadata) -> Self {
        Self {
            size: meta.len(),
            modified: meta.modified().unwrap_or(SystemTime::UNIX_EPOCH),
            identity: location_identity(meta),
        }
    }
}

#[cfg(unix)]
fn location_identity(meta: &std::fs::Metadata) -> u64 {
    use std::os::unix::fs::MetadataExt;
    meta.ino()
}

#[cfg(not(unix))]
fn location_identity(_meta: &std::fs::Metadata) -> u64 {
    0
}

/// Watcher tuning
#[derive(Debug, Clone)]
pub struct WatchConfig {
    /// File to watch
    pub path: PathBuf,

    /// Cadence while the file is present
    pub poll_interval: Duration,

    /// Widened cadence while the file is missing or after a stat error
    pub absent_backoff: Duration,

    /// Timestamp jitter absorbed by the change predicate. Some storage
    /// layers report mtimes at coarse granularity; deltas at or below
    /// this are not changes on their own.
    pub mtime_tolerance: Duration,
}

impl WatchConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            poll_interval: Duration::from_millis(100),
            absent_backoff: Duration::from_secs(1),
            mtime_tolerance: Duration::from_secs(1),
        }
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
}

/// What one poll tick observed
#[derive(Debug)]
pub enum Observation {
    /// The file exists and was stat'ed
    Found(Snapshot),

    /// The file does not exist
    Missing,

    /// The stat failed for some other reason
    Failed(std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WatchState {
    /// No poll has completed yet
    Unknown,

    /// The file exists; holds the latest snapshot
    Present(Snapshot),

    /// The file is confirmed missing
    Absent,
}

/// The change-detector state machine and its poll loop
///
/// `observe` is the entire transition function and is pure with respect
/// to time and I/O, so every emission rule is testable without touching
/// the filesystem. `run` is the thin cancellable loop feeding it.
pub struct DbWatcher {
    config: WatchConfig,
    state: WatchState,
    widened: bool,
}

impl DbWatcher {
    pub fn new(config: WatchConfig) -> Self {
        Self {
            config,
            state: WatchState::Unknown,
            widened: false,
        }
    }

    /// Sleep before the next poll: the normal cadence, widened while the
    /// file is missing or after a stat error.
    pub fn next_interval(&self) -> Duration {
        if self.widened {
            self.config.absent_backoff
        } else {
            self.config.poll_interval
        }
    }

    /// Apply one observation; returns the notice to emit, if any.
    pub fn observe(&mut self, observation: Observation) -> Option<ChangeKind> {
        match observation {
            Observation::Found(next) => {
                let emitted = match self.state {
                    WatchState::Unknown => {
                        tracing::info!(path = %self.config.path.display(), "database file found");
                        Some(ChangeKind::Appeared)
                    }
                    WatchState::Absent => {
                        tracing::info!(
                            path = %self.config.path.display(),
                            "database file reappeared"
                        );
                        Some(ChangeKind::Appeared)
                    }
                    WatchState::Present(prev) => {
                        if changed(&prev, &next, self.config.mtime_tolerance) {
                            tracing::info!(
                                old_size = prev.size,
                                new_size = next.size,
                                old_identity = prev.identity,
                                new_identity = next.identity,
                                "database changed"
                            );
                            Some(ChangeKind::Updated)
                        } else {
                            None
                        }
                    }
                };
                // The snapshot is replaced even when nothing is emitted
                self.state = WatchState::Present(next);
                self.widened = false;
                emitted
            }
            Observation::Missing => {
                let emitted = if matches!(self.state, WatchState::Present(_)) {
                    tracing::info!(path = %self.config.path.display(), "database file deleted");
                    Some(ChangeKind::Disappeared)
                } else {
                    None
                };
                self.state = WatchState::Absent;
                self.widened = true;
                emitted
            }
            Observation::Failed(error) => {
                // Transient I/O noise: keep the current state, retry slower
                tracing::warn!(
                    path = %self.config.path.display(),
                    error = %error,
                    "error checking database file"
                );
                self.widened = true;
                None
            }
        }
    }

    /// Poll until cancelled. Cancellation is honored between ticks only;
    /// a tick in progress finishes its stat first.
    pub async fn run(mut self, hub: Arc<NotificationHub>, shutdown: CancellationToken) {
        tracing::info!(
            path = %self.config.path.display(),
            poll_ms = self.config.poll_interval.as_millis() as u64,
            "db watcher started"
        );

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = tokio::time::sleep(self.next_interval()) => {}
            }

            let observation = match tokio::fs::metadata(&self.config.path).await {
                Ok(meta) => Observation::Found(Snapshot::of(&meta)),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Observation::Missing,
                Err(e) => Observation::Failed(e),
            };

            if let Some(kind) = self.observe(observation) {
                hub.notify(ChangeNotice::new(kind, &self.config.path));
            }
        }

        tracing::info!(path = %self.config.path.display(), "db watcher stopped");
    }
}

/// The change predicate: size, identity, or an mtime delta beyond the
/// tolerance. Equality within tolerance is not a change.
fn changed(prev: &Snapshot, next: &Snapshot, tolerance: Duration) -> bool {
    if next.size != prev.size || next.identity != prev.identity {
        return true;
    }
    mtime_delta(prev.modified, next.modified) > tolerance
}

/// Absolute difference between two timestamps
fn mtime_delta(a: SystemTime, b: SystemTime) -> Duration {
    b.duration_since(a).unwrap_or_else(|e| e.duration())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(size: u64, mtime_secs: u64, identity: u64) -> Snapshot {
        Snapshot {
            size,
            modified: SystemTime::UNIX_EPOCH + Duration::from_secs(mtime_secs),
            identity,
        }
    }

    fn watcher() -> DbWatcher {
        DbWatcher::new(WatchConfig::new("/tmp/scribe.db"))
    }

    #[test]
    fn test_first_sighting_emits_once() {
        let mut w = watcher();
        assert_eq!(
            w.observe(Observation::Found(snapshot(10, 1000, 7))),
            Some(ChangeKind::Appeared)
        );
        assert_eq!(w.observe(Observation::Found(snapshot(10, 1000, 7))), None);
    }

    #[test]
    fn test_size_change_emits_updated() {
        let mut w = watcher();
        w.observe(Observation::Found(snapshot(10, 1000, 7)));
        assert_eq!(w.observe(Observation::Found(snapshot(10, 1000, 7))), None);
        assert_eq!(
            w.observe(Observation::Found(snapshot(12, 1000, 7))),
            Some(ChangeKind::Updated)
        );
    }

    #[test]
    fn test_identity_change_emits_updated() {
        let mut w = watcher();
        w.observe(Observation::Found(snapshot(10, 1000, 7)));
        assert_eq!(
            w.observe(Observation::Found(snapshot(10, 1000, 8))),
            Some(ChangeKind::Updated)
        );
    }

    #[test]
    fn test_mtime_jitter_within_tolerance_is_silent() {
        let mut w = watcher();
        w.observe(Observation::Found(snapshot(10, 1000, 7)));
        // Tolerance is 1 s: a 1 s delta is absorbed, larger is a change
        assert_eq!(w.observe(Observation::Found(snapshot(10, 1001, 7))), None);
        assert_eq!(
            w.observe(Observation::Found(snapshot(10, 1003, 7))),
            Some(ChangeKind::Updated)
        );
    }

    #[test]
    fn test_mtime_moving_backwards_still_compares() {
        let mut w = watcher();
        w.observe(Observation::Found(snapshot(10, 1000, 7)));
        assert_eq!(
            w.observe(Observation::Found(snapshot(10, 990, 7))),
            Some(ChangeKind::Updated)
        );
    }

    #[test]
    fn test_disappear_then_reappear() {
        let mut w = watcher();
        w.observe(Observation::Found(snapshot(10, 1000, 7)));

        assert_eq!(
            w.observe(Observation::Missing),
            Some(ChangeKind::Disappeared)
        );
        // Continued absence stays silent
        assert_eq!(w.observe(Observation::Missing), None);
        assert_eq!(w.observe(Observation::Missing), None);

        assert_eq!(
            w.observe(Observation::Found(snapshot(11, 1005, 9))),
            Some(ChangeKind::Appeared)
        );
    }

    #[test]
    fn test_missing_before_first_sighting_is_silent() {
        let mut w = watcher();
        assert_eq!(w.observe(Observation::Missing), None);
        assert_eq!(w.observe(Observation::Missing), None);
        assert_eq!(
            w.observe(Observation::Found(snapshot(10, 1000, 7))),
            Some(ChangeKind::Appeared)
        );
    }

    #[test]
    fn test_stat_error_keeps_state_and_stays_silent() {
        let mut w = watcher();
        w.observe(Observation::Found(snapshot(10, 1000, 7)));

        let err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert_eq!(w.observe(Observation::Failed(err)), None);

        // State was preserved: an identical snapshot is still "unchanged"
        assert_eq!(w.observe(Observation::Found(snapshot(10, 1000, 7))), None);
    }

    #[test]
    fn test_interval_widens_on_absence_and_errors() {
        let config = WatchConfig::new("/tmp/scribe.db")
            .poll_interval(Duration::from_millis(100))
            .absent_backoff(Duration::from_secs(1));
        let mut w = DbWatcher::new(config);

        assert_eq!(w.next_interval(), Duration::from_millis(100));

        w.observe(Observation::Missing);
        assert_eq!(w.next_interval(), Duration::from_secs(1));

        w.observe(Observation::Found(snapshot(10, 1000, 7)));
        assert_eq!(w.next_interval(), Duration::from_millis(100));

        let err = std::io::Error::other("transient");
        w.observe(Observation::Failed(err));
        assert_eq!(w.next_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_predicate_tolerance_boundary() {
        let tolerance = Duration::from_secs(1);
        let base = snapshot(10, 1000, 7);

        assert!(!changed(&base, &snapshot(10, 1000, 7), tolerance));
        assert!(!changed(&base, &snapshot(10, 1001, 7), tolerance));
        assert!(changed(&base, &snapshot(10, 1002, 7), tolerance));
        assert!(changed(&base, &snapshot(12, 1000, 7), tolerance));
        assert!(changed(&base, &snapshot(10, 1000, 8), tolerance));
    }
}
