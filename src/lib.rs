// src/lib.rs

pub mod alert;
pub mod cli;
pub mod config;
pub mod errors;
pub mod feed;
pub mod logging;
pub mod watch;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::info;

use crate::alert::{CommandNotifier, ConsoleNotifier, Evaluator, Notifier, RegexEvaluator};
use crate::cli::CliArgs;
use crate::config::loader::load_and_validate;
use crate::config::model::ConfigFile;
use crate::feed::Session;
use crate::watch::{BackgroundWatcher, LiveFeedWatcher, ReportedPostsWatcher};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - session construction
/// - notifier + evaluator selection
/// - both watchers
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let config_path = PathBuf::from(&args.config);
    let cfg = load_and_validate(&config_path)?;

    if args.check {
        print_check(&cfg);
        return Ok(());
    }

    let session = Session::new(&cfg.domain, cfg.auth.cookie.as_deref())?;

    let notifier: Arc<dyn Notifier> = match cfg.alerts.notify_command.as_deref() {
        Some(program) => Arc::new(CommandNotifier::new(program)),
        None => Arc::new(ConsoleNotifier::new()),
    };
    let evaluator: Arc<dyn Evaluator> = Arc::new(RegexEvaluator::new(&cfg.alerts.watchwords)?);

    info!(domain = %cfg.domain, "starting watchers");

    let live = LiveFeedWatcher::spawn(
        session.clone(),
        Arc::clone(&notifier),
        evaluator,
        Duration::from_secs(cfg.live_posts.reconnect_delay_secs),
    );
    let reports = ReportedPostsWatcher::spawn(
        session,
        notifier,
        Duration::from_secs(cfg.reports.poll_interval_secs),
    );

    // Ctrl-C -> graceful shutdown of both watchers.
    tokio::signal::ctrl_c().await?;
    info!("shutdown requested, stopping watchers");

    live.stop();
    reports.stop();

    live.join().await;
    reports.join().await;

    Ok(())
}

/// Simple --check output: print the effective configuration and exit.
fn print_check(cfg: &ConfigFile) {
    println!("modwatch config check");
    println!("  domain = {}", cfg.domain);
    println!(
        "  live_posts.reconnect_delay_secs = {}",
        cfg.live_posts.reconnect_delay_secs
    );
    println!(
        "  reports.poll_interval_secs = {}",
        cfg.reports.poll_interval_secs
    );
    println!("  auth.cookie set = {}", cfg.auth.cookie.is_some());
    println!("  alerts.watchwords ({}):", cfg.alerts.watchwords.len());
    for pattern in cfg.alerts.watchwords.iter() {
        println!("    - {pattern}");
    }
    match cfg.alerts.notify_command.as_deref() {
        Some(program) => println!("  alerts.notify_command = {program}"),
        None => println!("  alerts.notify_command = (stdout)"),
    }
}
