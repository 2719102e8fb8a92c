use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{SortError, SortResult};

/// The shared "is running" flag.
///
/// Clones share the same flag, so a UI handle can stop a run the session is
/// awaiting. Clearing it takes effect on the next hook call.
#[derive(Debug, Clone, Default)]
pub struct RunFlag {
    running: Arc<AtomicBool>,
}

impl RunFlag {
    /// Creates a cleared flag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a run as active.
    pub fn start(&self) {
        self.running.store(true, Ordering::Release);
    }

    /// Requests cancellation of the active run.
    pub fn stop(&self) {
        self.running.store(false, Ordering::Release);
    }

    /// Returns true while a run is active.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Fails with [`SortError::NotRunning`] once the flag is cleared.
    ///
    /// # Errors
    ///
    /// Returns `NotRunning` if no run is active.
    pub fn ensure_running(&self) -> SortResult<()> {
        if self.is_running() {
            Ok(())
        } else {
            Err(SortError::NotRunning)
        }
    }
}
