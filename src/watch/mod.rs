// src/watch/mod.rs

//! The two background watchers and their shared lifecycle.
//!
//! This module is responsible for:
//! - The [`BackgroundWatcher`] capability (`stop()`) both watchers expose.
//! - The cooperative [`StopSignal`] cancellation primitive (`signal.rs`).
//! - The live posts watcher (`live.rs`): persistent websocket, fixed-delay
//!   reconnects, evaluator-driven alerts.
//! - The reports watcher (`reports.rs`): fixed-interval polling with a
//!   single in-memory count for change detection.
//!
//! Watchers start their tokio task at construction and run until `stop()`
//! is called or the process exits. They never keep the process alive on
//! their own and never return errors to the constructing caller; everything
//! the operator needs to know goes through the `Notifier`.

pub mod live;
pub mod reports;
pub mod signal;

pub use live::{LiveFeedHandlers, LiveFeedWatcher};
pub use reports::{format_report_body, ReportSource, ReportedPostsWatcher};
pub use signal::{StopReceiver, StopSignal};

/// Capability shared by every watcher: ask the background work to stop.
///
/// `stop()` only flips a flag. It returns immediately, is idempotent, never
/// panics, and is safe to call from any thread while the watcher's own task
/// is running. The task observes the request at its next wait point: within
/// one poll interval for the reports watcher, within one connection
/// lifecycle event for the live watcher.
pub trait BackgroundWatcher {
    fn stop(&self);
}
