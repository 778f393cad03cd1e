//! High-level runtime orchestrator.
//!
//! The runtime owns background workers, wires up command/event channels, and
//! exposes a builder-based API for clients to drive encounters.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use overload_content::ContentBundle;
use overload_core::{ActionCatalog, OverloadConfig, PlayerState, UnitArena, UnitSpec};

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::events::EventBus;
use crate::workers::{Command, EncounterWorker, RegenTicker, WorldState};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub overload: OverloadConfig,
    /// Period of regeneration ticks. `None` disables passive regeneration.
    pub regen_interval: Option<Duration>,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
}

impl RuntimeConfig {
    pub const DEFAULT_REGEN_INTERVAL: Duration = Duration::from_millis(100);
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            overload: OverloadConfig::default(),
            regen_interval: Some(Self::DEFAULT_REGEN_INTERVAL),
            event_buffer_size: 100,
            command_buffer_size: 32,
        }
    }
}

/// Main runtime that orchestrates an overload encounter
///
/// Runtime owns the workers; [`RuntimeHandle`] provides a cloneable façade
/// for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    shutdown_tx: watch::Sender<bool>,
    worker_handle: JoinHandle<()>,
    regen_handle: Option<JoinHandle<()>>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Stop the workers and wait for them to finish.
    ///
    /// Commands already queued by other handle clones may be dropped.
    pub async fn shutdown(self) -> Result<()> {
        // Receivers may already be gone if a worker exited on its own.
        let _ = self.shutdown_tx.send(true);
        drop(self.handle);

        if let Some(regen_handle) = self.regen_handle {
            regen_handle.await.map_err(RuntimeError::WorkerJoin)?;
        }
        self.worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)?;

        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    catalog: Option<ActionCatalog>,
    player: Option<(UnitSpec, PlayerState)>,
    roster: Vec<UnitSpec>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            catalog: None,
            player: None,
            roster: Vec::new(),
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Use everything from a loaded content bundle, including its overload
    /// configuration.
    pub fn content(mut self, content: ContentBundle) -> Self {
        self.config.overload = content.config;
        self.player = Some((content.player.unit_spec(), content.player.state()));
        self.catalog = Some(content.catalog);
        self.roster = content.roster;
        self
    }

    /// Set the action catalog (required unless [`content`](Self::content) is used)
    pub fn catalog(mut self, catalog: ActionCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Set the player's arena entry and starting state (required unless
    /// [`content`](Self::content) is used)
    pub fn player(mut self, unit: UnitSpec, state: PlayerState) -> Self {
        self.player = Some((unit, state));
        self
    }

    /// Units spawned when an encounter begins
    pub fn roster(mut self, roster: Vec<UnitSpec>) -> Self {
        self.roster = roster;
        self
    }

    /// Build the runtime
    pub async fn build(self) -> Result<Runtime> {
        let catalog = self.catalog.ok_or(RuntimeError::MissingContent)?;
        let (player_unit, player) = self.player.ok_or(RuntimeError::MissingContent)?;

        let world = WorldState {
            config: self.config.overload.clone(),
            catalog,
            player,
            arena: UnitArena::new(player_unit),
            roster: self.roster,
        };

        let (command_tx, command_rx) =
            mpsc::channel::<Command>(self.config.command_buffer_size.max(1));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let handle = RuntimeHandle::new(command_tx.clone(), event_bus.clone());

        let worker = EncounterWorker::new(world, command_rx, shutdown_rx.clone(), event_bus);
        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        let regen_handle = self
            .config
            .regen_interval
            .filter(|period| !period.is_zero())
            .map(|period| {
                let ticker = RegenTicker::new(command_tx, period, shutdown_rx);
                tokio::spawn(async move {
                    ticker.run().await;
                })
            });

        Ok(Runtime {
            handle,
            shutdown_tx,
            worker_handle,
            regen_handle,
        })
    }
}
