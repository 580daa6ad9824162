// src/watch/signal.rs

//! Cooperative stop signal shared between a watcher handle and its task.
//!
//! A thin wrapper over `tokio::sync::watch<bool>`: the flag only ever
//! transitions unset -> set, setting it twice is a no-op, and a waiting task
//! wakes as soon as it flips. The receiver side can also race the flag
//! against a timeout, which is how the poll loop turns its sleep into a
//! cancellation point.

use std::time::Duration;

use tokio::sync::watch;

/// Owning side of the stop signal, held by the watcher handle.
#[derive(Debug)]
pub struct StopSignal {
    tx: watch::Sender<bool>,
}

impl StopSignal {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx }
    }

    /// Request termination. Idempotent, non-blocking, callable from any
    /// thread.
    pub fn stop(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_stopped(&self) -> bool {
        *self.tx.borrow()
    }

    /// Hand out a receiver for the background task to wait on.
    pub fn subscribe(&self) -> StopReceiver {
        StopReceiver {
            rx: self.tx.subscribe(),
        }
    }
}

impl Default for StopSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Waiting side of the stop signal, owned by the background task.
#[derive(Debug, Clone)]
pub struct StopReceiver {
    rx: watch::Receiver<bool>,
}

impl StopReceiver {
    pub fn is_stopped(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolve once the signal is set.
    ///
    /// Also resolves if the owning [`StopSignal`] was dropped; a watcher
    /// whose handle is gone has no reason to keep running.
    pub async fn stopped(&mut self) {
        let _ = self.rx.wait_for(|stopped| *stopped).await;
    }

    /// Wait at most `timeout` for the signal. Returns `true` if it was set
    /// (or the sender dropped), `false` if the timeout elapsed first.
    pub async fn stopped_within(&mut self, timeout: Duration) -> bool {
        tokio::time::timeout(timeout, self.stopped()).await.is_ok()
    }
}
