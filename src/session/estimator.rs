//! Debounced size estimation.
//!
//! The size estimate re-runs on every relevant input change (crop, slice
//! height, format, quality), so it is debounced: each change (re)schedules
//! an estimation task a few hundred milliseconds out, and only the newest
//! one is allowed to publish.
//!
//! Staleness is tracked with a generation counter rather than timer
//! cancellation alone: a task checks its generation both after the debounce
//! delay (superseded while waiting) and after the estimate completes
//! (superseded while computing), so out-of-order completions can never
//! overwrite a newer result.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

/// Delay between the last input change and the estimation run.
pub const ESTIMATE_DEBOUNCE: Duration = Duration::from_millis(300);

// =============================================================================
// DebouncedEstimator
// =============================================================================

/// Debounce and staleness guard around an estimation closure.
///
/// Results are published on a [`watch`] channel as `Option<u64>`: the
/// estimated total byte count, or `None` when no estimate is available.
pub struct DebouncedEstimator {
    generation: Arc<AtomicU64>,
    tx: watch::Sender<Option<u64>>,
    // Held so the channel stays open with no outside subscribers
    rx: watch::Receiver<Option<u64>>,
    delay: Duration,
}

impl DebouncedEstimator {
    /// Create an estimator with the default debounce delay.
    pub fn new() -> Self {
        Self::with_delay(ESTIMATE_DEBOUNCE)
    }

    /// Create an estimator with a custom debounce delay.
    pub fn with_delay(delay: Duration) -> Self {
        let (tx, rx) = watch::channel(None);
        Self {
            generation: Arc::new(AtomicU64::new(0)),
            tx,
            rx,
            delay,
        }
    }

    /// Subscribe to published estimates.
    pub fn subscribe(&self) -> watch::Receiver<Option<u64>> {
        self.tx.subscribe()
    }

    /// The most recently published estimate.
    pub fn latest(&self) -> Option<u64> {
        *self.rx.borrow()
    }

    /// Schedule an estimation, superseding any pending one.
    ///
    /// The closure runs after the debounce delay, unless a newer schedule
    /// or [`invalidate`](Self::invalidate) arrives first. Its result is
    /// published only if it is still the newest request when it finishes.
    ///
    /// The returned handle is for tests and shutdown; dropping it does not
    /// cancel the task.
    pub fn schedule<F, Fut>(&self, estimate: F) -> JoinHandle<()>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Option<u64>> + Send + 'static,
    {
        let generation = Arc::clone(&self.generation);
        let my_generation = generation.fetch_add(1, Ordering::SeqCst) + 1;
        let tx = self.tx.clone();
        let delay = self.delay;

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            if generation.load(Ordering::SeqCst) != my_generation {
                debug!(generation = my_generation, "estimate superseded while waiting");
                return;
            }

            let result = estimate().await;

            if generation.load(Ordering::SeqCst) != my_generation {
                debug!(generation = my_generation, "estimate superseded while computing");
                return;
            }

            let _ = tx.send(result);
        })
    }

    /// Drop any pending estimation and publish "no estimate available".
    ///
    /// Used when the inputs can no longer produce an estimate at all, e.g.
    /// the image was unloaded or the crop collapsed to zero area.
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        let _ = self.tx.send(None);
    }
}

impl Default for DebouncedEstimator {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
