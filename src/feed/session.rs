// src/feed/session.rs

use std::future::Future;

use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, COOKIE};

use crate::errors::{WatchError, WatchResult};
use crate::feed::post::{Post, ReportsPayload};
use crate::watch::reports::ReportSource;

/// Authenticated transport towards the moderation backend.
///
/// One session is shared by both watchers: the reports watcher issues GETs
/// through the embedded `reqwest` client, and the live watcher derives its
/// websocket URL from the same domain. Cloning is cheap (the client is
/// internally reference-counted).
#[derive(Debug, Clone)]
pub struct Session {
    client: reqwest::Client,
    domain: String,
}

impl Session {
    /// Build a session for `domain`, attaching `cookie` as a default header
    /// on every request when present.
    pub fn new(domain: &str, cookie: Option<&str>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(cookie) = cookie {
            let value = HeaderValue::from_str(cookie)
                .context("session cookie contains characters not valid in a header")?;
            headers.insert(COOKIE, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .context("building HTTP client")?;

        Ok(Self {
            client,
            domain: domain.to_string(),
        })
    }

    /// Websocket endpoint of the live feed.
    pub fn live_url(&self) -> String {
        format!("wss://{}/", self.domain)
    }

    /// REST endpoint listing all currently reported posts.
    pub fn reports_url(&self) -> String {
        format!("https://{}/globalmanage/reports.json", self.domain)
    }

    /// One authenticated GET against the reports endpoint.
    ///
    /// Connection, status and body-read failures come back as
    /// `WatchError::Transport`; a body that is not the expected JSON shape
    /// comes back as `WatchError::Malformed`.
    pub async fn get_reports(&self) -> WatchResult<Vec<Post>> {
        let response = self
            .client
            .get(self.reports_url())
            .send()
            .await
            .map_err(WatchError::transport)?
            .error_for_status()
            .map_err(WatchError::transport)?;

        let body = response.text().await.map_err(WatchError::transport)?;
        let payload: ReportsPayload =
            serde_json::from_str(&body).map_err(WatchError::malformed)?;

        Ok(payload.reports)
    }
}

impl ReportSource for Session {
    fn fetch_reports(&mut self) -> impl Future<Output = WatchResult<Vec<Post>>> + Send {
        let session = self.clone();
        async move { session.get_reports().await }
    }
}
