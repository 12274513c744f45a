//! Single-slot debouncer for search input.

use std::time::Duration;

use tokio::time::{Instant, sleep_until};

/// Quiet period after the last keystroke before the search runs.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Holds at most one pending value and releases it once no newer value has
/// arrived for the quiet period.
///
/// Pushing a value cancels the pending one and restarts the timer.
#[derive(Debug)]
pub struct Debouncer<T> {
    quiet: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    /// Replace the pending value and restart the quiet period.
    pub fn push(&mut self, value: T) {
        self.pending = Some((value, Instant::now() + self.quiet));
    }

    /// Drop the timer, returning the value it held.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Wait for the quiet period to elapse and take the pending value.
    ///
    /// Never resolves while nothing is pending. Cancel-safe: dropping the
    /// future leaves the pending value in place.
    pub async fn ready(&mut self) -> T {
        let Some(deadline) = self.pending.as_ref().map(|(_, deadline)| *deadline) else {
            return std::future::pending().await;
        };
        sleep_until(deadline).await;
        match self.pending.take() {
            Some((value, _)) => value,
            None => std::future::pending().await,
        }
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}
