//! scribe-studio: studio-side change detection and notification fan-out
//!
//! A long-running studio process serves LMP data out of a single database
//! file that other processes rewrite underneath it. This crate watches
//! that file by polling (it must work on storage with no native change
//! events), decides whether a stat result is a real change or filesystem
//! noise, and hands each decision to a broadcast hub as a `ChangeNotice`.
//! Delivery past the hub is the embedding application's concern.

pub mod config;
pub mod logging;
pub mod notify;
pub mod watch;

pub use config::StudioConfig;
pub use notify::{ChangeKind, ChangeNotice, NotificationHub};
pub use watch::{DbWatcher, Observation, Snapshot, WatchConfig};
