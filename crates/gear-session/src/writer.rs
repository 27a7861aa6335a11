//! Debounced server writes with write-sequence tokens.
//!
//! Each scheduled write takes a token from a monotonically increasing
//! sequence. When the debounce window elapses, the write lands only if its
//! token is still the newest; anything staler is discarded. Clearing the
//! cart advances the sequence without scheduling, which is what keeps a
//! stale in-flight write from resurrecting a cleared cart.

use gear_commerce::cart::LineItem;
use gear_store::CartStore;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Coalesces rapid cart mutations into one server write.
#[derive(Debug)]
pub struct DebouncedWriter {
    seq: Arc<AtomicU64>,
    debounce: Duration,
    pending: Option<JoinHandle<()>>,
}

impl DebouncedWriter {
    /// Create a writer with the given debounce window.
    pub fn new(debounce: Duration) -> Self {
        Self {
            seq: Arc::new(AtomicU64::new(0)),
            debounce,
            pending: None,
        }
    }

    /// Schedule a write of the given items, superseding any pending write.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule(&mut self, store: Arc<dyn CartStore>, items: Vec<LineItem>) {
        let token = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(task) = self.pending.take() {
            task.abort();
        }

        let seq = Arc::clone(&self.seq);
        let debounce = self.debounce;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            if seq.load(Ordering::SeqCst) != token {
                tracing::debug!(token, "discarding stale cart write");
                return;
            }
            if let Err(e) = store.save(&items).await {
                // The next mutation's debounce cycle is the retry.
                tracing::warn!(error = %e, "server cart write failed");
            }
        }));
    }

    /// Invalidate any pending write without scheduling a new one.
    pub fn invalidate(&mut self) {
        self.seq.fetch_add(1, Ordering::SeqCst);
        if let Some(task) = self.pending.take() {
            task.abort();
        }
    }
}

impl Drop for DebouncedWriter {
    fn drop(&mut self) {
        // A session teardown must not leave a timer writing stale state.
        if let Some(task) = self.pending.take() {
            task.abort();
        }
    }
}
