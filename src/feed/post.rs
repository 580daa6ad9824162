// src/feed/post.rs

use serde::Deserialize;

/// A post as delivered by the backend, either over the live feed or inside
/// the reports listing.
///
/// Field names follow the backend's JSON (`postId`, `nomarkup`,
/// `globalreports`). Posts are consumed once and never mutated or persisted.
#[derive(Debug, Clone, Deserialize)]
pub struct Post {
    pub board: String,

    /// Thread the post belongs to. `null` (or `0`) for thread OPs, in which
    /// case the post id doubles as the thread id.
    #[serde(default)]
    pub thread: Option<u64>,

    #[serde(rename = "postId")]
    pub post_id: u64,

    /// Message text with all markup stripped.
    #[serde(default)]
    pub nomarkup: String,

    /// Reports attached to this post. Only populated on the reports
    /// endpoint; the live feed leaves it empty.
    #[serde(default, rename = "globalreports")]
    pub global_reports: Vec<Report>,
}

/// A single user-submitted report.
#[derive(Debug, Clone, Deserialize)]
pub struct Report {
    #[serde(default)]
    pub reason: String,
}

/// Body shape of `GET /globalmanage/reports.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportsPayload {
    pub reports: Vec<Post>,
}

impl Post {
    /// Render the moderation-UI style path of a post:
    /// `>>>/{board}/{thread-or-postId} ({postId})`.
    ///
    /// Thread OPs have no thread id of their own, so the post id fills both
    /// slots: `>>>/b/123 (123)`.
    pub fn path(&self) -> String {
        // A thread id of 0 means "no thread", same as null.
        let thread = self
            .thread
            .filter(|&t| t != 0)
            .unwrap_or(self.post_id);
        format!(">>>/{}/{} ({})", self.board, thread, self.post_id)
    }
}
