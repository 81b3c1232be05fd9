//! Process-wide logging setup

use scribe_common::InitOnce;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

static LOG_INIT: InitOnce = InitOnce::new();

/// Install the colorized global subscriber at the given level.
///
/// Returns true only for the call that performed the installation; later
/// calls are no-ops regardless of level.
pub fn setup(level: Level) -> bool {
    setup_with(&LOG_INIT, level)
}

/// Same as [`setup`], against a caller-owned guard. Tests hold their own
/// guard and reset it between runs instead of fighting over the static.
pub fn setup_with(guard: &InitOnce, level: Level) -> bool {
    guard.run(|| {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(level)
            .with_ansi(true)
            .finish();

        // An embedding process may have installed its own subscriber
        // first; that one wins.
        let _ = tracing::subscriber::set_global_default(subscriber);
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_fires_once_per_guard() {
        let mut guard = InitOnce::new();

        assert!(setup_with(&guard, Level::DEBUG));
        assert!(!setup_with(&guard, Level::INFO));

        guard.reset();
        assert!(setup_with(&guard, Level::INFO));
    }
}
