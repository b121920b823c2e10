//! Explicit request lifetimes.
//!
//! Every component owns a [`RequestScope`] and runs its backend calls
//! through it. Cancelling the scope (through a [`CancelHandle`] or by
//! dropping the component) resolves any in-flight call to [`Cancelled`]
//! so the late response never reaches component state.

use std::future::Future;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::watch;

/// Returned by [`RequestScope::run`] when the scope was cancelled first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("request cancelled")]
pub struct Cancelled;

/// Owner of a cancellation signal shared by a component's requests.
#[derive(Debug)]
pub struct RequestScope {
    cancel: Arc<watch::Sender<bool>>,
}

impl RequestScope {
    /// Creates a live scope.
    pub fn new() -> Self {
        let (cancel, _) = watch::channel(false);
        Self {
            cancel: Arc::new(cancel),
        }
    }

    /// Returns a handle that can cancel this scope from another task.
    pub fn handle(&self) -> CancelHandle {
        CancelHandle {
            cancel: Arc::clone(&self.cancel),
        }
    }

    /// Returns true once the scope has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        *self.cancel.borrow()
    }

    /// Cancels the scope.
    pub fn cancel(&self) {
        self.cancel.send_replace(true);
    }

    /// Runs `fut` unless the scope is cancelled before it completes.
    ///
    /// A cancelled scope stays cancelled; later calls return immediately.
    pub async fn run<F: Future>(&self, fut: F) -> Result<F::Output, Cancelled> {
        let mut signal = self.cancel.subscribe();
        let cancelled = async move {
            loop {
                if *signal.borrow_and_update() {
                    return;
                }
                if signal.changed().await.is_err() {
                    return;
                }
            }
        };

        tokio::select! {
            biased;
            () = cancelled => Err(Cancelled),
            out = fut => Ok(out),
        }
    }
}

impl Default for RequestScope {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for RequestScope {
    fn drop(&mut self) {
        self.cancel.send_replace(true);
    }
}

/// Cloneable handle that cancels a [`RequestScope`].
#[derive(Debug, Clone)]
pub struct CancelHandle {
    cancel: Arc<watch::Sender<bool>>,
}

impl CancelHandle {
    /// Cancels the scope this handle belongs to.
    pub fn cancel(&self) {
        self.cancel.send_replace(true);
    }

    /// Returns true once the scope has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        *self.cancel.borrow()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn test_run_completes_when_not_cancelled() {
        let scope = RequestScope::new();
        assert_eq!(scope.run(async { 7 }).await, Ok(7));
    }

    #[tokio::test]
    async fn test_cancelled_scope_short_circuits() {
        let scope = RequestScope::new();
        scope.cancel();
        assert_eq!(scope.run(async { 7 }).await, Err(Cancelled));
        assert!(scope.is_cancelled());
    }

    #[tokio::test]
    async fn test_handle_cancels_in_flight_call() {
        let scope = RequestScope::new();
        let handle = scope.handle();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            handle.cancel();
        });

        let result = scope
            .run(async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "late"
            })
            .await;
        assert_eq!(result, Err(Cancelled));
    }

    #[tokio::test]
    async fn test_dropping_scope_cancels_handles() {
        let scope = RequestScope::new();
        let handle = scope.handle();
        assert!(!handle.is_cancelled());
        drop(scope);
        assert!(handle.is_cancelled());
    }
}
