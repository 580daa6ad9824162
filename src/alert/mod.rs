// src/alert/mod.rs

//! Alert evaluation and delivery.
//!
//! The watchers never decide what an alert looks like on screen, nor what
//! makes a post interesting. Both are behind small traits:
//! - [`Notifier`] delivers a `(title, body)` pair to the operator.
//! - [`Evaluator`] inspects post text and returns what it found.
//!
//! Built-in implementations live in `notify.rs` and `evaluate.rs`; tests
//! substitute their own recording/scripted versions.

pub mod evaluate;
pub mod notify;

pub use evaluate::RegexEvaluator;
pub use notify::{CommandNotifier, ConsoleNotifier};

/// Delivers one alert to the operator.
///
/// Expected to be non-blocking or acceptably fast; the watchers call it
/// inline from their own loops. Failures inside `notify` are the
/// implementation's problem and must not panic.
pub trait Notifier: Send + Sync {
    fn notify(&self, title: &str, body: &str);
}

/// Decides whether post text is alert-worthy.
///
/// Pure from the watchers' perspective: same text, same result.
pub trait Evaluator: Send + Sync {
    fn evaluate(&self, text: &str) -> Evaluation;
}

/// What an [`Evaluator`] found in a piece of post text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Evaluation {
    /// URLs extracted from the text.
    pub urls: Vec<String>,
    /// Matched watchword snippets.
    pub entries: Vec<String>,
}

impl Evaluation {
    /// True when nothing alert-worthy was found.
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty() && self.entries.is_empty()
    }
}
