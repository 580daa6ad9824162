// src/config/validate.rs

use anyhow::{anyhow, Context, Result};
use regex::Regex;

use crate::config::model::ConfigFile;

/// Run basic semantic validation against a loaded configuration.
///
/// This checks:
/// - `domain` is a bare hostname (non-empty, no scheme, no path)
/// - `reconnect_delay_secs` and `poll_interval_secs` are `>= 1`
/// - every `[alerts].watchwords` pattern compiles as a regex
///
/// It does **not** check that the domain resolves or that the cookie is
/// still valid; both only surface once the watchers start talking to the
/// backend.
pub fn validate_config(cfg: &ConfigFile) -> Result<()> {
    validate_domain(cfg)?;
    validate_intervals(cfg)?;
    validate_watchwords(cfg)?;
    Ok(())
}

fn validate_domain(cfg: &ConfigFile) -> Result<()> {
    let domain = cfg.domain.trim();
    if domain.is_empty() {
        return Err(anyhow!("`domain` must not be empty"));
    }
    if domain.contains("://") {
        return Err(anyhow!(
            "`domain` must be a bare hostname, without a scheme (got '{}')",
            domain
        ));
    }
    if domain.contains('/') {
        return Err(anyhow!(
            "`domain` must not contain a path (got '{}')",
            domain
        ));
    }
    Ok(())
}

fn validate_intervals(cfg: &ConfigFile) -> Result<()> {
    if cfg.live_posts.reconnect_delay_secs == 0 {
        return Err(anyhow!(
            "[live_posts].reconnect_delay_secs must be >= 1 (got 0)"
        ));
    }
    if cfg.reports.poll_interval_secs == 0 {
        return Err(anyhow!(
            "[reports].poll_interval_secs must be >= 1 (got 0)"
        ));
    }
    Ok(())
}

fn validate_watchwords(cfg: &ConfigFile) -> Result<()> {
    for pattern in cfg.alerts.watchwords.iter() {
        Regex::new(pattern)
            .with_context(|| format!("invalid [alerts].watchwords pattern '{}'", pattern))?;
    }
    Ok(())
}
