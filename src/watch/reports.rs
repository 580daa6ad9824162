// src/watch/reports.rs

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info};

use crate::alert::Notifier;
use crate::errors::WatchResult;
use crate::feed::post::Post;
use crate::watch::signal::{StopReceiver, StopSignal};
use crate::watch::BackgroundWatcher;

/// Where the reported-posts listing comes from.
///
/// Production uses [`crate::feed::Session`] (authenticated GET against
/// `reports.json`); tests plug in scripted sources to drive the loop
/// through failure and change sequences.
pub trait ReportSource: Send + 'static {
    fn fetch_reports(&mut self) -> impl Future<Output = WatchResult<Vec<Post>>> + Send;
}

/// Polls the reports endpoint on a fixed interval and notifies whenever the
/// report count changes to a nonzero value.
///
/// Construction spawns the poll task immediately; the handle only carries
/// the stop signal and the task handle.
pub struct ReportedPostsWatcher {
    stop: StopSignal,
    handle: tokio::task::JoinHandle<()>,
}

impl ReportedPostsWatcher {
    pub fn spawn<S: ReportSource>(
        source: S,
        notifier: Arc<dyn Notifier>,
        poll_interval: Duration,
    ) -> Self {
        let stop = StopSignal::new();
        let stop_rx = stop.subscribe();

        let handle = tokio::spawn(poll_loop(source, notifier, poll_interval, stop_rx));

        Self { stop, handle }
    }

    /// Wait for the background task to finish. Join errors only happen if
    /// the task panicked; they are logged, not propagated.
    pub async fn join(self) {
        if let Err(err) = self.handle.await {
            error!(error = %err, "reports watcher task panicked");
        }
    }
}

impl BackgroundWatcher for ReportedPostsWatcher {
    fn stop(&self) {
        debug!("stop requested for reports watcher");
        self.stop.stop();
    }
}

/// Main poll loop.
///
/// `known_reports` holds the most recently observed report count and nothing
/// else. It is read then overwritten exactly once per successful cycle;
/// failed fetches leave it alone. Setting it on `n == 0` as well is what
/// re-arms the notification after the queue has been cleared.
async fn poll_loop<S: ReportSource>(
    mut source: S,
    notifier: Arc<dyn Notifier>,
    poll_interval: Duration,
    mut stop: StopReceiver,
) {
    let mut known_reports: usize = 0;

    loop {
        // Cancellation is cooperative: an in-flight fetch always runs to
        // completion, the stop flag is checked at the wait boundary below.
        match source.fetch_reports().await {
            Ok(reports) => {
                let n = reports.len();
                debug!(count = n, known = known_reports, "fetched reports");

                if n > 0 && n != known_reports {
                    notifier.notify("New reports!", &format_report_body(&reports));
                }
                known_reports = n;
            }
            Err(err) if err.is_transport() => {
                error!(error = %err, "failed to fetch reports");
                notifier.notify("Error while fetching reports", "Trying to reconnect");
            }
            Err(err) => {
                // Malformed payload: the backend is speaking a shape we do
                // not understand. Retrying cannot help, so the task dies
                // loudly instead of alerting every interval.
                error!(error = %err, "unrecoverable failure while fetching reports, watcher exiting");
                break;
            }
        }

        if stop.stopped_within(poll_interval).await {
            info!("exiting reports watcher");
            break;
        }
    }
}

/// One line per reported post: its path, two spaces, then the report
/// reasons as a literal list, e.g. `>>>/b/12 (12)  ["spam", "flood"]`.
pub fn format_report_body(reports: &[Post]) -> String {
    reports
        .iter()
        .map(|post| {
            let reasons: Vec<&str> = post
                .global_reports
                .iter()
                .map(|r| r.reason.as_str())
                .collect();
            format!("{}  {:?}", post.path(), reasons)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
