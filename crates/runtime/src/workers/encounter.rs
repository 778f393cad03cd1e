//! Encounter worker that owns the authoritative player, units, and queue.
//!
//! Receives commands from [`RuntimeHandle`](crate::RuntimeHandle), runs them
//! through [`overload_core::Encounter`], and publishes events to the EventBus.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info, warn};

use overload_core::{
    ActionCatalog, ActionDef, ActionId, DrainReport, Encounter, Gauge, OverloadConfig,
    PlayerState, QueuePreview, TargetHandle, UnitArena, UnitSpec,
};

use crate::api::{Result, RuntimeError, UnitView};
use crate::events::{CombatEvent, EventBus, QueueEvent, ResourceEvent};

/// Commands that can be sent to the encounter worker
pub enum Command {
    BeginEncounter {
        reply: oneshot::Sender<Result<Vec<UnitView>>>,
    },
    EndEncounter {
        reply: oneshot::Sender<Result<u32>>,
    },
    Enqueue {
        action: ActionId,
        target: TargetHandle,
        reply: oneshot::Sender<Result<QueuePreview>>,
    },
    Undo {
        reply: oneshot::Sender<Result<Option<ActionId>>>,
    },
    Cancel {
        reply: oneshot::Sender<Result<usize>>,
    },
    Commit {
        reply: oneshot::Sender<Result<DrainReport>>,
    },
    Preview {
        reply: oneshot::Sender<Result<QueuePreview>>,
    },
    /// Tops the clip up to capacity. Not a queued action.
    Reload { reply: oneshot::Sender<usize> },
    SetCombat {
        in_combat: bool,
        reply: oneshot::Sender<()>,
    },
    Spawn {
        spec: UnitSpec,
        reply: oneshot::Sender<TargetHandle>,
    },
    Despawn {
        handle: TargetHandle,
        reply: oneshot::Sender<bool>,
    },
    /// Sent by the regen ticker; no reply.
    Regenerate { elapsed: Duration },
    QueryPlayer {
        reply: oneshot::Sender<PlayerState>,
    },
    QueryUnits {
        reply: oneshot::Sender<Vec<UnitView>>,
    },
    QueryActions {
        reply: oneshot::Sender<Vec<Arc<ActionDef>>>,
    },
}

/// Everything the worker owns besides its channels.
#[derive(Debug, Clone)]
pub struct WorldState {
    pub config: OverloadConfig,
    pub catalog: ActionCatalog,
    pub player: PlayerState,
    pub arena: UnitArena,
    /// Units spawned by `BeginEncounter`.
    pub roster: Vec<UnitSpec>,
}

/// Background task that processes encounter commands.
///
/// It is the only code that mutates [`WorldState`], so an enqueue can never
/// interleave with a drain or a regeneration tick.
pub struct EncounterWorker {
    world: WorldState,
    encounter: Option<Encounter>,
    spawned: Vec<TargetHandle>,
    in_combat: bool,
    command_rx: mpsc::Receiver<Command>,
    shutdown: watch::Receiver<bool>,
    event_bus: EventBus,
}

impl EncounterWorker {
    pub fn new(
        world: WorldState,
        command_rx: mpsc::Receiver<Command>,
        shutdown: watch::Receiver<bool>,
        event_bus: EventBus,
    ) -> Self {
        info!(
            actions = world.catalog.len(),
            roster = world.roster.len(),
            max_overload = world.config.effective_max_overload(),
            "EncounterWorker initialized"
        );

        Self {
            world,
            encounter: None,
            spawned: Vec::new(),
            in_combat: false,
            command_rx,
            shutdown,
            event_bus,
        }
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        loop {
            tokio::select! {
                Some(cmd) = self.command_rx.recv() => {
                    self.handle_command(cmd);
                }
                changed = self.shutdown.changed() => {
                    if changed.is_err() || *self.shutdown.borrow() {
                        break;
                    }
                }
                else => break,
            }
        }
        debug!("EncounterWorker stopped");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::BeginEncounter { reply } => {
                respond(reply, self.begin_encounter(), "BeginEncounter");
            }
            Command::EndEncounter { reply } => {
                respond(reply, self.end_encounter(), "EndEncounter");
            }
            Command::Enqueue {
                action,
                target,
                reply,
            } => {
                respond(reply, self.enqueue(action, target), "Enqueue");
            }
            Command::Undo { reply } => {
                respond(reply, self.undo(), "Undo");
            }
            Command::Cancel { reply } => {
                respond(reply, self.cancel(), "Cancel");
            }
            Command::Commit { reply } => {
                respond(reply, self.commit(), "Commit");
            }
            Command::Preview { reply } => {
                let preview = self
                    .encounter
                    .as_ref()
                    .map(Encounter::preview)
                    .ok_or(RuntimeError::NoEncounter);
                respond(reply, preview, "Preview");
            }
            Command::Reload { reply } => {
                let added = self.world.player.clip.reload();
                debug!(added, "Clip reloaded");
                respond(reply, added, "Reload");
            }
            Command::SetCombat { in_combat, reply } => {
                self.in_combat = in_combat;
                respond(reply, (), "SetCombat");
            }
            Command::Spawn { spec, reply } => {
                let handle = self.world.arena.spawn(spec);
                respond(reply, handle, "Spawn");
            }
            Command::Despawn { handle, reply } => {
                let removed = self.world.arena.despawn(handle).is_some();
                respond(reply, removed, "Despawn");
            }
            Command::Regenerate { elapsed } => self.regenerate(elapsed),
            Command::QueryPlayer { reply } => {
                respond(reply, self.world.player.clone(), "QueryPlayer");
            }
            Command::QueryUnits { reply } => {
                respond(reply, self.units(), "QueryUnits");
            }
            Command::QueryActions { reply } => {
                let actions = self.world.catalog.iter().cloned().collect();
                respond(reply, actions, "QueryActions");
            }
        }
    }

    fn begin_encounter(&mut self) -> Result<Vec<UnitView>> {
        if self.encounter.is_some() {
            return Err(RuntimeError::EncounterActive);
        }

        self.spawned = self
            .world
            .roster
            .iter()
            .cloned()
            .map(|spec| self.world.arena.spawn(spec))
            .collect();
        self.encounter = Some(Encounter::new(&self.world.config));
        self.in_combat = true;

        info!(units = self.spawned.len(), "Encounter started");
        self.event_bus.publish(CombatEvent::EncounterStarted {
            units: self.spawned.clone(),
        });

        Ok(self.units())
    }

    /// Drops any pending batch without charging, then despawns the roster.
    fn end_encounter(&mut self) -> Result<u32> {
        let mut encounter = self.encounter.take().ok_or(RuntimeError::NoEncounter)?;

        let dropped = encounter.queue().len();
        encounter.cancel();
        if dropped > 0 {
            self.event_bus.publish(QueueEvent::Cleared { dropped });
        }

        for handle in self.spawned.drain(..) {
            self.world.arena.despawn(handle);
        }
        self.in_combat = false;

        let commits = encounter.commits();
        info!(commits, "Encounter ended");
        self.event_bus
            .publish(CombatEvent::EncounterEnded { commits });

        Ok(commits)
    }

    fn enqueue(&mut self, action_id: ActionId, target: TargetHandle) -> Result<QueuePreview> {
        let encounter = self.encounter.as_mut().ok_or(RuntimeError::NoEncounter)?;
        let action = self
            .world
            .catalog
            .get(action_id)
            .cloned()
            .ok_or(RuntimeError::UnknownAction(action_id))?;

        match encounter.enqueue(action, target, &self.world.player, &self.world.arena) {
            Ok(preview) => {
                debug!(
                    action = %action_id,
                    target = %target,
                    queued = preview.queued,
                    energy = preview.energy_cost,
                    "Action queued"
                );
                self.event_bus.publish(QueueEvent::Enqueued {
                    action: action_id,
                    target,
                    preview,
                });
                Ok(preview)
            }
            Err(reason) => {
                debug!(action = %action_id, target = %target, %reason, "Action rejected");
                self.event_bus.publish(QueueEvent::Rejected {
                    action: action_id,
                    target,
                    reason: reason.clone(),
                });
                Err(reason.into())
            }
        }
    }

    fn undo(&mut self) -> Result<Option<ActionId>> {
        let encounter = self.encounter.as_mut().ok_or(RuntimeError::NoEncounter)?;
        let removed = encounter.undo().map(|entry| entry.action_id());

        if let Some(action) = removed {
            self.event_bus.publish(QueueEvent::Removed {
                action,
                preview: encounter.preview(),
            });
        }
        Ok(removed)
    }

    fn cancel(&mut self) -> Result<usize> {
        let encounter = self.encounter.as_mut().ok_or(RuntimeError::NoEncounter)?;
        let dropped = encounter.queue().len();
        encounter.cancel();

        if dropped > 0 {
            self.event_bus.publish(QueueEvent::Cleared { dropped });
        }
        Ok(dropped)
    }

    fn commit(&mut self) -> Result<DrainReport> {
        let encounter = self.encounter.as_mut().ok_or(RuntimeError::NoEncounter)?;
        let report = encounter.commit(&mut self.world.player, &mut self.world.arena);
        if report.is_empty() {
            return Ok(report);
        }

        for entry in report.entries.iter().filter(|entry| !entry.succeeded()) {
            if let Err(failure) = &entry.outcome {
                warn!(
                    order = entry.order,
                    action = %entry.action,
                    target = %entry.target,
                    %failure,
                    "Queued action failed during drain"
                );
            }
        }

        let resources = &self.world.player.resources;
        info!(
            executed = report.executed,
            failed = report.failed,
            energy_spent = report.energy_spent,
            previewed_energy = report.previewed_energy,
            energy_left = resources.get(Gauge::Energy),
            "Overload drained"
        );

        self.event_bus.publish(ResourceEvent::Spent {
            action_spent: report.action_spent,
            energy_spent: report.energy_spent,
            action: resources.get(Gauge::Action),
            energy: resources.get(Gauge::Energy),
        });
        self.event_bus.publish(CombatEvent::Drained {
            report: report.clone(),
        });

        Ok(report)
    }

    fn regenerate(&mut self, elapsed: Duration) {
        let resources = &mut self.world.player.resources;
        let delta = resources.regenerate(
            &self.world.config.regeneration,
            elapsed.as_secs_f32(),
            self.in_combat,
        );
        if delta.is_zero() {
            return;
        }

        self.event_bus.publish(ResourceEvent::Regenerated {
            delta,
            action: resources.get(Gauge::Action),
            energy: resources.get(Gauge::Energy),
        });
    }

    fn units(&self) -> Vec<UnitView> {
        self.world
            .arena
            .iter()
            .map(|(handle, unit)| UnitView {
                handle,
                unit: unit.clone(),
            })
            .collect()
    }
}

fn respond<T>(reply: oneshot::Sender<T>, value: T, command: &'static str) {
    if reply.send(value).is_err() {
        debug!("{} reply channel closed (caller dropped)", command);
    }
}
