//! Line-oriented terminal driver for overload encounters.
//!
//! Reads commands from stdin, forwards them to the runtime, and prints the
//! replies. Runtime events are mirrored into the log as JSON.
mod commands;
mod config;
mod logging;
mod render;
mod session;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, info, trace, warn};

use commands::CliCommand;
use config::CliConfig;
use overload_content::ContentFactory;
use overload_runtime::{Runtime, RuntimeHandle, Topic};
use session::{Flow, Session};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = CliConfig::from_env();
    let _guard = logging::setup_logging(config.log_dir.as_deref())?;

    let factory = match &config.content_dir {
        Some(dir) => ContentFactory::new(dir),
        None => ContentFactory::embedded(),
    };
    let content = factory.load_all().context("failed to load content")?;
    info!(
        content_dir = ?factory.data_dir(),
        actions = content.catalog.len(),
        roster = content.roster.len(),
        "Content loaded"
    );

    let runtime = Runtime::builder()
        .config(config.runtime_config())
        .content(content)
        .build()
        .await?;

    let handle = runtime.handle();
    let event_logs = spawn_event_logs(&handle);

    let result = drive(Session::new(handle)).await;

    runtime.shutdown().await?;
    for task in event_logs {
        if let Err(e) = task.await {
            warn!("Event log task failed: {}", e);
        }
    }

    result
}

async fn drive(session: Session) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    stdout
        .write_all(b"overload: type 'help' for commands\n")
        .await?;

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let output = match line.parse::<CliCommand>() {
            Ok(command) => match session.execute(command).await? {
                Flow::Continue(text) => text,
                Flow::Quit => break,
            },
            Err(e) => e.to_string(),
        };
        stdout.write_all(output.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
    }

    Ok(())
}

/// One task per topic; each ends when the runtime drops its event bus.
fn spawn_event_logs(handle: &RuntimeHandle) -> Vec<JoinHandle<()>> {
    handle
        .subscribe_multiple(&Topic::ALL)
        .into_iter()
        .map(|(topic, mut rx)| {
            tokio::spawn(async move {
                loop {
                    match rx.recv().await {
                        Ok(event) => match serde_json::to_string(&event) {
                            // Regeneration ticks are too frequent for debug.
                            Ok(json) if topic == Topic::Resources => {
                                trace!(target: "overload::events", ?topic, %json)
                            }
                            Ok(json) => debug!(target: "overload::events", ?topic, %json),
                            Err(e) => warn!("Failed to serialize {:?} event: {}", topic, e),
                        },
                        Err(RecvError::Lagged(skipped)) => {
                            warn!("Dropped {} stale {:?} events", skipped, topic);
                        }
                        Err(RecvError::Closed) => break,
                    }
                }
            })
        })
        .collect()
}
