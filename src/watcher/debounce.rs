//! Reload debouncer
//!
//! Each trigger cancels the pending timer, if any, and starts a new one.
//! The action runs only when a timer expires without being replaced, on the
//! blocking pool since it does file I/O.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebounceState {
    Idle,
    Pending,
}

pub struct Debouncer {
    delay: Duration,
    action: Arc<dyn Fn() + Send + Sync>,
    // Held across abort and spawn so concurrent triggers cannot both
    // leave a live timer behind.
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(delay: Duration, action: impl Fn() + Send + Sync + 'static) -> Self {
        Debouncer {
            delay,
            action: Arc::new(action),
            pending: Mutex::new(None),
        }
    }

    /// Restart the timer. Must be called from within a Tokio runtime.
    pub fn trigger(&self) {
        let mut pending = self.pending.lock();
        if let Some(timer) = pending.take() {
            timer.abort();
        }

        let action = Arc::clone(&self.action);
        let delay = self.delay;
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(e) = tokio::task::spawn_blocking(move || action()).await {
                tracing::warn!(error = %e, "Debounced action failed");
            }
        }));
    }

    pub fn state(&self) -> DebounceState {
        match self.pending.lock().as_ref() {
            Some(timer) if !timer.is_finished() => DebounceState::Pending,
            _ => DebounceState::Idle,
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        if let Some(timer) = self.pending.get_mut().take() {
            timer.abort();
        }
    }
}
