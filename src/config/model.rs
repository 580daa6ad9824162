// src/config/model.rs

use serde::Deserialize;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// domain = "example.com"
///
/// [live_posts]
/// reconnect_delay_secs = 5
///
/// [reports]
/// poll_interval_secs = 60
///
/// [auth]
/// cookie = "connect.sid=..."
///
/// [alerts]
/// watchwords = ["(?i)raid"]
/// notify_command = "notify-send"
/// ```
///
/// Everything except `domain` is optional and has reasonable defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    /// Hostname of the moderation backend. Schemes are added by the session
    /// (`wss://` for the live feed, `https://` for the reports endpoint).
    pub domain: String,

    /// Live posts feed settings from `[live_posts]`.
    #[serde(default)]
    pub live_posts: LivePostsSection,

    /// Report polling settings from `[reports]`.
    #[serde(default)]
    pub reports: ReportsSection,

    /// Credentials from `[auth]`.
    #[serde(default)]
    pub auth: AuthSection,

    /// Alert evaluation / delivery settings from `[alerts]`.
    #[serde(default)]
    pub alerts: AlertsSection,
}

/// `[live_posts]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct LivePostsSection {
    /// Fixed delay between reconnection attempts, in seconds.
    ///
    /// This is deliberately a constant interval, not an exponential backoff:
    /// the feed is expected to come back quickly after backend restarts.
    #[serde(default = "default_reconnect_delay_secs")]
    pub reconnect_delay_secs: u64,
}

/// `[reports]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportsSection {
    /// Seconds between polls of the reports endpoint. Also the granularity
    /// at which the report watcher observes a stop request.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

/// `[auth]` section.
///
/// The session cookie is obtained by logging into the moderation UI in a
/// browser and copying it out; modwatch does not implement the login flow.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthSection {
    /// Raw `Cookie` header value sent with every request.
    #[serde(default)]
    pub cookie: Option<String>,
}

/// `[alerts]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlertsSection {
    /// Regex patterns matched against the plain text of each live post.
    /// Any match makes the post alert-worthy.
    #[serde(default)]
    pub watchwords: Vec<String>,

    /// Optional external command to deliver notifications, invoked as
    /// `<command> <title> <body>` (e.g. `notify-send`). When absent,
    /// notifications go to stdout.
    #[serde(default)]
    pub notify_command: Option<String>,
}

fn default_reconnect_delay_secs() -> u64 {
    5
}

fn default_poll_interval_secs() -> u64 {
    60
}

impl Default for LivePostsSection {
    fn default() -> Self {
        Self {
            reconnect_delay_secs: default_reconnect_delay_secs(),
        }
    }
}

impl Default for ReportsSection {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
        }
    }
}
