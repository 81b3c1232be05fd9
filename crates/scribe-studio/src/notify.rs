//! Change notification fan-out

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use tokio::sync::broadcast;

/// Why a notice was raised
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChangeKind {
    /// The watched resource became visible (first sighting or return)
    Appeared,

    /// The watched resource's content changed
    Updated,

    /// The watched resource went missing
    Disappeared,
}

impl ChangeKind {
    /// The reason token carried to subscribers
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Appeared => "appeared",
            Self::Updated => "updated",
            Self::Disappeared => "disappeared",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One "data changed" event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeNotice {
    pub kind: ChangeKind,
    pub path: PathBuf,
}

impl ChangeNotice {
    pub fn new(kind: ChangeKind, path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            path: path.into(),
        }
    }
}

/// Broadcast hub distributing notices to all current subscribers
///
/// This is the hand-off boundary: the watcher calls `notify` once per
/// emission and subscribers receive each notice at least once for as long
/// as they keep up. Nothing is persisted across restarts.
pub struct NotificationHub {
    tx: broadcast::Sender<ChangeNotice>,
}

impl NotificationHub {
    /// Create a hub buffering up to `capacity` undelivered notices per
    /// subscriber
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Deliver a notice to all current subscribers. A send with no
    /// subscribers is not an error; the notice is simply dropped.
    pub fn notify(&self, notice: ChangeNotice) {
        let _ = self.tx.send(notice);
    }

    /// Subscribe to notices raised after this call
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeNotice> {
        self.tx.subscribe()
    }

    /// Number of live subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for NotificationHub {
    fn default() -> Self {
        Self::new(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hub_starts_empty() {
        let hub = NotificationHub::default();
        assert_eq!(hub.subscriber_count(), 0);
    }

    #[test]
    fn test_notify_without_subscribers_is_fine() {
        let hub = NotificationHub::default();
        hub.notify(ChangeNotice::new(ChangeKind::Updated, "/tmp/scribe.db"));
    }

    #[tokio::test]
    async fn test_all_subscribers_receive_each_notice() {
        let hub = NotificationHub::default();
        let mut rx1 = hub.subscribe();
        let mut rx2 = hub.subscribe();
        assert_eq!(hub.subscriber_count(), 2);

        hub.notify(ChangeNotice::new(ChangeKind::Appeared, "/tmp/scribe.db"));

        assert_eq!(rx1.recv().await.unwrap().kind, ChangeKind::Appeared);
        assert_eq!(rx2.recv().await.unwrap().kind, ChangeKind::Appeared);
    }

    #[test]
    fn test_reason_tokens() {
        assert_eq!(ChangeKind::Appeared.as_str(), "appeared");
        assert_eq!(ChangeKind::Updated.to_string(), "updated");
        assert_eq!(
            serde_json::to_value(ChangeKind::Disappeared).unwrap(),
            serde_json::json!("disappeared")
        );
    }
}
