// src/watch/live.rs

use std::sync::Arc;
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, error, info};

use crate::alert::{Evaluator, Notifier};
use crate::feed::session::Session;
use crate::feed::wire::{self, InboundEvent};
use crate::feed::Post;
use crate::watch::signal::{StopReceiver, StopSignal};
use crate::watch::BackgroundWatcher;

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Maintains a persistent websocket to the live feed, subscribes to the
/// global moderation room and alerts on evaluator hits.
///
/// Connection lifecycle: Disconnected -> Connecting -> Connected ->
/// (Disconnected | Stopped). Reconnects use a fixed delay, no backoff.
/// Construction spawns the feed task immediately and does not wait for the
/// connection to come up.
pub struct LiveFeedWatcher {
    stop: StopSignal,
    handle: tokio::task::JoinHandle<()>,
}

impl LiveFeedWatcher {
    pub fn spawn(
        session: Session,
        notifier: Arc<dyn Notifier>,
        evaluator: Arc<dyn Evaluator>,
        reconnect_delay: Duration,
    ) -> Self {
        let stop = StopSignal::new();
        let stop_rx = stop.subscribe();
        let handlers = LiveFeedHandlers::new(notifier, evaluator, reconnect_delay);

        let handle = tokio::spawn(feed_loop(session, handlers, reconnect_delay, stop_rx));

        Self { stop, handle }
    }

    /// Wait for the background task to finish. Join errors only happen if
    /// the task panicked; they are logged, not propagated.
    pub async fn join(self) {
        if let Err(err) = self.handle.await {
            error!(error = %err, "live posts watcher task panicked");
        }
    }
}

impl BackgroundWatcher for LiveFeedWatcher {
    fn stop(&self) {
        debug!("stop requested for live posts watcher");
        self.stop.stop();
    }
}

/// The three event reactions of the live watcher, bound to the collaborators
/// they need. The feed task calls these sequentially; a handler never runs
/// concurrently with another for the same watcher.
pub struct LiveFeedHandlers {
    notifier: Arc<dyn Notifier>,
    evaluator: Arc<dyn Evaluator>,
    reconnect_delay: Duration,
}

impl LiveFeedHandlers {
    pub fn new(
        notifier: Arc<dyn Notifier>,
        evaluator: Arc<dyn Evaluator>,
        reconnect_delay: Duration,
    ) -> Self {
        Self {
            notifier,
            evaluator,
            reconnect_delay,
        }
    }

    /// Called once per established connection, after the room subscription
    /// frame has gone out.
    pub fn on_connect(&self) {
        debug!("live posts client connected");
        self.notifier.notify("Connected", "Watching live posts");
    }

    /// Called on every unsolicited disconnect, before the reconnect wait.
    pub fn on_disconnect(&self) {
        error!("live posts client disconnected");
        self.notifier.notify(
            "Lost live posts connection",
            &format!("Retrying in {} seconds", self.reconnect_delay.as_secs()),
        );
    }

    /// Called for every inbound post.
    pub fn on_new_post(&self, post: &Post) {
        let evaluation = self.evaluator.evaluate(&post.nomarkup);
        if evaluation.is_empty() {
            return;
        }

        // The url block and the entry block are concatenated with no
        // separator between the groups; within each group entries are
        // newline-joined.
        let body = format!(
            "{}{}",
            evaluation.urls.join("\n"),
            evaluation.entries.join("\n")
        );
        self.notifier
            .notify(&format!("Alert! {}", post.path()), &body);
    }
}

/// How one connection attempt ended, as seen by the outer reconnect loop.
enum SocketOutcome {
    /// Stop signal observed; the loop exits.
    Stopped,
    /// Connection lost or never established; reconnect after the fixed delay.
    Disconnected,
    /// The server sent a frame we cannot understand; the task exits.
    Fatal,
}

/// Outer reconnect loop: connect, pump events, notify on disconnect, wait
/// the fixed delay, repeat. Every wait point doubles as a cancellation
/// point, so a stop request is observed within one connection lifecycle
/// event.
async fn feed_loop(
    session: Session,
    handlers: LiveFeedHandlers,
    reconnect_delay: Duration,
    mut stop: StopReceiver,
) {
    loop {
        if stop.is_stopped() {
            break;
        }

        match run_connection(&session, &handlers, &mut stop).await {
            SocketOutcome::Stopped | SocketOutcome::Fatal => break,
            SocketOutcome::Disconnected => {
                if stop.is_stopped() {
                    break;
                }
                handlers.on_disconnect();
                if stop.stopped_within(reconnect_delay).await {
                    break;
                }
            }
        }
    }

    info!("exiting live posts watcher");
}

/// Establish one connection and pump its events until it ends.
///
/// The task blocks on socket reads here, racing them against the stop
/// signal; there is no polling.
async fn run_connection(
    session: &Session,
    handlers: &LiveFeedHandlers,
    stop: &mut StopReceiver,
) -> SocketOutcome {
    let url = session.live_url();
    debug!(%url, "connecting to live feed");

    let mut socket: Socket = tokio::select! {
        _ = stop.stopped() => return SocketOutcome::Stopped,
        connected = connect_async(url.as_str()) => match connected {
            Ok((socket, _response)) => socket,
            Err(err) => {
                error!(error = %err, "live feed connection failed");
                return SocketOutcome::Disconnected;
            }
        },
    };

    if let Err(err) = socket.send(Message::Text(wire::subscribe_frame())).await {
        error!(error = %err, "failed to subscribe to live feed room");
        return SocketOutcome::Disconnected;
    }
    handlers.on_connect();

    loop {
        tokio::select! {
            _ = stop.stopped() => {
                let _ = socket.close(None).await;
                return SocketOutcome::Stopped;
            }
            frame = socket.next() => match frame {
                Some(Ok(Message::Text(text))) => match wire::decode_frame(&text) {
                    Ok(Some(InboundEvent::NewPost(post))) => handlers.on_new_post(&post),
                    Ok(None) => {}
                    Err(err) => {
                        error!(error = %err, "malformed live feed frame, watcher exiting");
                        let _ = socket.close(None).await;
                        return SocketOutcome::Fatal;
                    }
                },
                // Ping/pong are answered by the transport; binary frames
                // carry nothing we consume.
                Some(Ok(Message::Close(_))) | None => return SocketOutcome::Disconnected,
                Some(Ok(_)) => {}
                Some(Err(err)) => {
                    error!(error = %err, "live feed read error");
                    return SocketOutcome::Disconnected;
                }
            }
        }
    }
}
