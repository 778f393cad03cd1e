//! Periodic regeneration ticks.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::debug;

use super::encounter::Command;

/// Sends [`Command::Regenerate`] to the encounter worker on a fixed interval.
///
/// The ticker never touches state itself. It stops when shutdown is signalled
/// or when the worker's command channel closes.
pub struct RegenTicker {
    command_tx: mpsc::Sender<Command>,
    period: Duration,
    shutdown: watch::Receiver<bool>,
}

impl RegenTicker {
    pub fn new(
        command_tx: mpsc::Sender<Command>,
        period: Duration,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            command_tx,
            period,
            shutdown,
        }
    }

    pub async fn run(mut self) {
        let mut ticker = time::interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;
        let mut last = Instant::now();

        loop {
            tokio::select! {
                now = ticker.tick() => {
                    let elapsed = now.saturating_duration_since(last);
                    last = now;
                    if self.command_tx.send(Command::Regenerate { elapsed }).await.is_err() {
                        break;
                    }
                }
                changed = self.shutdown.changed() => {
                    if changed.is_err() || *self.shutdown.borrow() {
                        break;
                    }
                }
            }
        }
        debug!("RegenTicker stopped");
    }
}
