use std::collections::VecDeque;
use std::error::Error;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::anyhow;
use tokio::sync::mpsc;
use tokio::time::timeout;

use modwatch::alert::Notifier;
use modwatch::errors::{WatchError, WatchResult};
use modwatch::feed::{Post, Report};
use modwatch::watch::{BackgroundWatcher, ReportSource, ReportedPostsWatcher};

type TestResult = Result<(), Box<dyn Error>>;

const JOIN_TIMEOUT: Duration = Duration::from_secs(5);
const SHORT_INTERVAL: Duration = Duration::from_millis(10);

/// Notifier that records every (title, body) pair it is handed.
#[derive(Default)]
struct RecordingNotifier {
    events: Mutex<Vec<(String, String)>>,
}

impl RecordingNotifier {
    fn events(&self) -> Vec<(String, String)> {
        self.events.lock().unwrap().clone()
    }

    fn titles(&self) -> Vec<String> {
        self.events().into_iter().map(|(title, _)| title).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, title: &str, body: &str) {
        self.events
            .lock()
            .unwrap()
            .push((title.to_string(), body.to_string()));
    }
}

/// Report source that replays a scripted sequence of fetch results, then
/// keeps repeating the last successful listing. Every fetch is announced on
/// `polls` so tests know how far the loop has come.
struct ScriptedSource {
    script: VecDeque<WatchResult<Vec<Post>>>,
    last_ok: Vec<Post>,
    polls: mpsc::UnboundedSender<()>,
}

impl ScriptedSource {
    fn new(
        script: Vec<WatchResult<Vec<Post>>>,
    ) -> (Self, mpsc::UnboundedReceiver<()>) {
        let (polls, polls_rx) = mpsc::unbounded_channel();
        let source = Self {
            script: script.into(),
            last_ok: Vec::new(),
            polls,
        };
        (source, polls_rx)
    }
}

impl ReportSource for ScriptedSource {
    fn fetch_reports(&mut self) -> impl Future<Output = WatchResult<Vec<Post>>> + Send {
        let item = match self.script.pop_front() {
            Some(item) => {
                if let Ok(reports) = &item {
                    self.last_ok = reports.clone();
                }
                item
            }
            None => Ok(self.last_ok.clone()),
        };
        let _ = self.polls.send(());
        std::future::ready(item)
    }
}

fn reported_post(post_id: u64, reasons: &[&str]) -> Post {
    Post {
        board: "b".to_string(),
        thread: None,
        post_id,
        nomarkup: String::new(),
        global_reports: reasons
            .iter()
            .map(|reason| Report {
                reason: reason.to_string(),
            })
            .collect(),
    }
}

fn reports(count: usize) -> Vec<Post> {
    (0..count)
        .map(|i| reported_post(i as u64 + 1, &["spam"]))
        .collect()
}

async fn wait_for_polls(polls: &mut mpsc::UnboundedReceiver<()>, count: usize) -> TestResult {
    for _ in 0..count {
        timeout(JOIN_TIMEOUT, polls.recv())
            .await?
            .ok_or("poll channel closed early")?;
    }
    Ok(())
}

#[tokio::test]
async fn notifies_only_when_nonzero_count_changes() -> TestResult {
    let script = vec![
        Ok(reports(0)),
        Ok(reports(3)),
        Ok(reports(3)),
        Ok(reports(0)),
        Ok(reports(5)),
    ];
    let (source, mut polls) = ScriptedSource::new(script);
    let notifier = Arc::new(RecordingNotifier::default());

    let watcher = ReportedPostsWatcher::spawn(source, notifier.clone(), SHORT_INTERVAL);

    // Let the scripted polls plus two repeats of the final count run; the
    // repeats prove the stored count ended at 5.
    wait_for_polls(&mut polls, 7).await?;
    watcher.stop();
    timeout(JOIN_TIMEOUT, watcher.join()).await?;

    assert_eq!(notifier.titles(), vec!["New reports!", "New reports!"]);
    Ok(())
}

#[tokio::test]
async fn transport_failure_notifies_once_and_preserves_count() -> TestResult {
    let script = vec![
        Ok(reports(2)),
        Err(WatchError::transport(anyhow!("connection reset"))),
        Ok(reports(2)),
    ];
    let (source, mut polls) = ScriptedSource::new(script);
    let notifier = Arc::new(RecordingNotifier::default());

    let watcher = ReportedPostsWatcher::spawn(source, notifier.clone(), SHORT_INTERVAL);

    wait_for_polls(&mut polls, 4).await?;
    watcher.stop();
    timeout(JOIN_TIMEOUT, watcher.join()).await?;

    // One alert for the first nonzero count, one for the failure. The
    // post-failure fetch sees the same 2 reports as the stored count and
    // stays quiet.
    assert_eq!(
        notifier.titles(),
        vec!["New reports!", "Error while fetching reports"]
    );
    let events = notifier.events();
    assert_eq!(events[1].1, "Trying to reconnect");

    Ok(())
}

#[tokio::test]
async fn first_batch_notifies_once_with_paths_and_reasons() -> TestResult {
    let batch = vec![
        reported_post(12, &["spam"]),
        reported_post(34, &["flood"]),
    ];
    let script = vec![Ok(batch.clone()), Ok(batch)];
    let (source, mut polls) = ScriptedSource::new(script);
    let notifier = Arc::new(RecordingNotifier::default());

    let watcher = ReportedPostsWatcher::spawn(source, notifier.clone(), SHORT_INTERVAL);

    wait_for_polls(&mut polls, 3).await?;
    watcher.stop();
    timeout(JOIN_TIMEOUT, watcher.join()).await?;

    let events = notifier.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].0, "New reports!");
    assert_eq!(
        events[0].1,
        ">>>/b/12 (12)  [\"spam\"]\n>>>/b/34 (34)  [\"flood\"]"
    );

    Ok(())
}

#[tokio::test]
async fn malformed_payload_ends_the_watcher() -> TestResult {
    let script = vec![
        Ok(reports(1)),
        Err(WatchError::malformed(anyhow!("reports field missing"))),
    ];
    let (source, _polls) = ScriptedSource::new(script);
    let notifier = Arc::new(RecordingNotifier::default());

    let watcher = ReportedPostsWatcher::spawn(source, notifier.clone(), SHORT_INTERVAL);

    // No stop() call: the malformed payload alone must end the task.
    timeout(JOIN_TIMEOUT, watcher.join()).await?;

    assert_eq!(notifier.titles(), vec!["New reports!"]);
    Ok(())
}

#[tokio::test]
async fn stop_is_prompt_and_idempotent() -> TestResult {
    let (source, mut polls) = ScriptedSource::new(vec![Ok(reports(0))]);
    let notifier = Arc::new(RecordingNotifier::default());

    // Long interval: termination must come from the stop signal cutting the
    // wait short, not from the interval elapsing.
    let watcher = ReportedPostsWatcher::spawn(source, notifier.clone(), Duration::from_secs(60));

    wait_for_polls(&mut polls, 1).await?;
    watcher.stop();
    watcher.stop();
    timeout(JOIN_TIMEOUT, watcher.join()).await?;

    assert!(notifier.events().is_empty());
    Ok(())
}
