// src/alert/notify.rs

use std::process::Stdio;

use tokio::process::Command;
use tracing::warn;

use crate::alert::Notifier;

/// Notifier that prints alerts to stdout.
///
/// The fallback when no `[alerts].notify_command` is configured; useful when
/// modwatch runs in a terminal or under a process supervisor that captures
/// stdout.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, title: &str, body: &str) {
        println!("[{title}] {body}");
    }
}

/// Notifier that hands alerts to an external command, invoked as
/// `<program> <title> <body>`.
///
/// `notify-send` is the typical choice on Linux desktops. The child is
/// spawned through tokio and not waited on inline, so a slow notifier
/// cannot stall a watcher loop; once it exits, the runtime's reaper
/// collects it. `notify` must therefore run inside a tokio runtime, which
/// is where both watcher loops live. Spawn failures are logged and
/// otherwise dropped.
#[derive(Debug)]
pub struct CommandNotifier {
    program: String,
}

impl CommandNotifier {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Notifier for CommandNotifier {
    fn notify(&self, title: &str, body: &str) {
        let spawned = Command::new(&self.program)
            .arg(title)
            .arg(body)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        // Dropping the Child hands it over to the runtime for reaping.
        if let Err(err) = spawned {
            warn!(
                program = %self.program,
                error = %err,
                "failed to spawn notify command; alert dropped"
            );
        }
    }
}
