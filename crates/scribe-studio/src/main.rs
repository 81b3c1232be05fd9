//! Scribe Studio data server
//!
//! Watches the backing database file and fans "data changed" notices out
//! to subscribers until interrupted.

use clap::Parser;
use scribe_studio::{logging, DbWatcher, NotificationHub, StudioConfig};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tokio::sync::broadcast::error::RecvError;
use tokio_util::sync::CancellationToken;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(name = "scribe-studio")]
#[command(about = "Scribe studio data server")]
struct Args {
    /// Directory holding the store's database file
    #[arg(long)]
    storage_dir: Option<PathBuf>,

    /// Database poll interval in milliseconds
    #[arg(long, default_value = "100")]
    poll_interval_ms: u64,

    /// Widened poll interval while the database file is missing, in
    /// milliseconds
    #[arg(long, default_value = "1000")]
    absent_backoff_ms: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: Level,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::setup(args.log_level);

    let mut config = StudioConfig::new()
        .poll_interval(Duration::from_millis(args.poll_interval_ms))
        .absent_backoff(Duration::from_millis(args.absent_backoff_ms));
    if let Some(dir) = args.storage_dir {
        config = config.storage_dir(dir);
    }

    let hub = Arc::new(NotificationHub::default());
    let shutdown = CancellationToken::new();

    let watcher_task = match config.watch_config() {
        Some(watch) => {
            let watcher = DbWatcher::new(watch);
            Some(tokio::spawn(watcher.run(hub.clone(), shutdown.clone())))
        }
        None => {
            tracing::warn!("no storage directory configured; change detection disabled");
            None
        }
    };

    let mut rx = hub.subscribe();
    let log_task = tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(notice) => tracing::info!(
                    reason = notice.kind.as_str(),
                    path = %notice.path.display(),
                    "data changed"
                ),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "notification log fell behind");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    signal::ctrl_c().await?;
    tracing::info!("shutting down");

    shutdown.cancel();
    if let Some(task) = watcher_task {
        task.await?;
    }
    log_task.abort();

    Ok(())
}
