//! One-shot initialization guard.
//!
//! Process-wide setup (installing the logging subscriber, mostly) must run
//! at most once, but tests need to re-arm it between runs. `InitOnce` is
//! that guard as an owned value rather than a bare module-level flag: the
//! process holds a `static` instance, tests hold their own and reset it.

use once_cell::sync::OnceCell;

/// A resettable run-at-most-once guard.
pub struct InitOnce {
    cell: OnceCell<()>,
}

impl InitOnce {
    /// Create an armed guard.
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// Run `f` if this guard has not fired yet.
    ///
    /// Returns true if `f` ran. Concurrent callers block until the winning
    /// initializer finishes, then observe the guard as done.
    pub fn run<F: FnOnce()>(&self, f: F) -> bool {
        let mut ran = false;
        self.cell.get_or_init(|| {
            f();
            ran = true;
        });
        ran
    }

    /// Whether the guard has already fired.
    pub fn is_done(&self) -> bool {
        self.cell.get().is_some()
    }

    /// Re-arm the guard. Requires exclusive access, so only a test that
    /// owns its guard can reset it.
    pub fn reset(&mut self) {
        self.cell.take();
    }
}

impl Default for InitOnce {
    fn default() -> Self {
        Self::new()
    }
}
