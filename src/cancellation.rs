//! Cooperative cancellation for long-running operations.
//!
//! A [`Cancellation`] is a cheap, cloneable observer; the paired
//! [`CancellationHandle`] trips it. Operations check the observer between
//! steps and race it against repository I/O with [`Cancellation::run`].

use std::future::Future;
use tokio::sync::watch;

/// Trigger side of a cancellation pair.
#[derive(Debug)]
pub struct CancellationHandle {
    sender: watch::Sender<bool>,
}

impl CancellationHandle {
    /// Signals every paired [`Cancellation`]. Idempotent.
    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }
}

/// Observer side of a cancellation pair.
#[derive(Debug, Clone, Default)]
pub struct Cancellation {
    receiver: Option<watch::Receiver<bool>>,
}

impl Cancellation {
    /// Returns an observer that is never cancelled.
    #[must_use]
    pub const fn never() -> Self {
        Self { receiver: None }
    }

    /// Creates a linked handle and observer.
    #[must_use]
    pub fn new() -> (CancellationHandle, Self) {
        let (sender, receiver) = watch::channel(false);
        (
            CancellationHandle { sender },
            Self {
                receiver: Some(receiver),
            },
        )
    }

    /// Returns `true` once the paired handle has been cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.receiver
            .as_ref()
            .is_some_and(|receiver| *receiver.borrow())
    }

    /// Resolves when the paired handle is cancelled.
    ///
    /// Never resolves for [`Cancellation::never`] or when the handle is
    /// dropped without cancelling.
    pub async fn cancelled(&self) {
        let Some(receiver) = self.receiver.as_ref() else {
            return std::future::pending().await;
        };
        let mut observed = receiver.clone();
        if observed.wait_for(|cancelled| *cancelled).await.is_err() {
            std::future::pending::<()>().await;
        }
    }

    /// Drives `operation` to completion unless cancellation fires first.
    ///
    /// Returns `None` when cancelled. An already-cancelled observer never
    /// polls `operation`.
    pub async fn run<F>(&self, operation: F) -> Option<F::Output>
    where
        F: Future,
    {
        tokio::select! {
            biased;
            () = self.cancelled() => None,
            output = operation => Some(output),
        }
    }
}
