use std::sync::Arc;
use tokio::sync::watch;

/// Cloneable cancellation handle for a polling loop.
///
/// Passed into the poller explicitly so the same core runs under a CLI
/// Ctrl+C handler or an embedding event loop without process-global signal
/// state. Cancellation is observation-side only: tripping the token detaches
/// the local watcher and never contacts the server.
#[derive(Clone)]
pub struct CancelToken {
    tx: Arc<watch::Sender<bool>>,
}

impl CancelToken {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Trip the token. Idempotent; wakes every pending `cancelled()` wait.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }

    /// Resolve once the token is tripped. Usable from multiple tasks and
    /// from repeated `select!` arms.
    pub async fn cancelled(&self) {
        let mut rx = self.tx.subscribe();
        loop {
            if *rx.borrow() {
                return;
            }
            // Sender lives in self, so changed() cannot error while we hold it
            if rx.changed().await.is_err() {
                return;
            }
        }
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_token_starts_untripped() {
        let token = CancelToken::new();
        assert!(!token.is_cancelled());
    }

    #[tokio::test]
    async fn test_cancel_is_visible_to_clones() {
        let token = CancelToken::new();
        let clone = token.clone();

        token.cancel();

        assert!(clone.is_cancelled());
        // Does not hang: already tripped
        clone.cancelled().await;
    }

    #[tokio::test]
    async fn test_pending_wait_wakes_on_cancel() {
        let token = CancelToken::new();
        let waiter = token.clone();

        let handle = tokio::spawn(async move {
            waiter.cancelled().await;
        });

        token.cancel();
        handle.await.expect("waiter task completes");
    }
}
