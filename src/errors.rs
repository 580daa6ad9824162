// src/errors.rs

//! Crate-wide error types.
//!
//! Setup paths (config loading, session construction) use `anyhow` with
//! context, like the rest of the CLI surface. Runtime failures inside the
//! watchers use [`WatchError`] so the loops can tell recoverable transport
//! failures apart from fatal malformed payloads.

use thiserror::Error;

/// A failure inside a watcher's connection/poll loop.
///
/// The distinction matters for recovery:
/// - `Transport` failures are expected during normal operation (the backend
///   restarts, the network drops). They are surfaced to the operator via a
///   notification and the loop continues.
/// - `Malformed` means the backend sent something that does not match the
///   expected shape. Retrying will not fix that; the watcher task logs it
///   and exits.
#[derive(Error, Debug)]
pub enum WatchError {
    #[error("transport failure: {0}")]
    Transport(anyhow::Error),

    #[error("malformed payload: {0}")]
    Malformed(anyhow::Error),
}

impl WatchError {
    pub fn transport(err: impl Into<anyhow::Error>) -> Self {
        Self::Transport(err.into())
    }

    pub fn malformed(err: impl Into<anyhow::Error>) -> Self {
        Self::Malformed(err.into())
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

pub type WatchResult<T> = std::result::Result<T, WatchError>;
