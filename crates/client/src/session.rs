//! Executes parsed commands against the runtime.
use anyhow::{Result, anyhow};

use overload_core::{ActionId, GameError, TargetHandle};
use overload_runtime::{RuntimeError, RuntimeHandle, UnitView};

use crate::commands::{ActionRef, CliCommand, HELP, TargetRef};
use crate::render;

/// What the driver loop should do after a command.
pub enum Flow {
    Continue(String),
    Quit,
}

pub struct Session {
    handle: RuntimeHandle,
}

impl Session {
    pub fn new(handle: RuntimeHandle) -> Self {
        Self { handle }
    }

    /// Runs one command. Rejections from the runtime become output text; only
    /// channel failures are returned as errors.
    pub async fn execute(&self, command: CliCommand) -> Result<Flow> {
        match self.run(command).await {
            Ok(flow) => Ok(flow),
            Err(err) => match err.downcast::<RuntimeError>() {
                Ok(runtime) if runtime.is_fatal() => Err(runtime.into()),
                Ok(runtime) => Ok(Flow::Continue(format!(
                    "error ({}): {runtime}",
                    runtime.severity().as_str()
                ))),
                Err(other) => Ok(Flow::Continue(format!("error: {other}"))),
            },
        }
    }

    async fn run(&self, command: CliCommand) -> Result<Flow> {
        let h = &self.handle;
        let text = match command {
            CliCommand::Actions => render::actions(&h.actions().await?),
            CliCommand::Units => render::units(&h.units().await?),
            CliCommand::Begin => {
                let units = h.begin_encounter().await?;
                format!("encounter started\n{}", render::units(&units))
            }
            CliCommand::End => {
                let commits = h.end_encounter().await?;
                format!("encounter ended after {commits} batch(es)")
            }
            CliCommand::Add { action, target } => {
                let action = self.resolve_action(&action).await?;
                let target = self.resolve_target(&target).await?;
                let preview = h.enqueue(action, target).await?;
                render::preview(&preview)
            }
            CliCommand::Undo => match h.undo().await? {
                Some(action) => {
                    let preview = h.preview().await?;
                    format!("removed {action}\n{}", render::preview(&preview))
                }
                None => "queue is empty".to_string(),
            },
            CliCommand::Cancel => format!("dropped {} action(s)", h.cancel().await?),
            CliCommand::Preview => render::preview(&h.preview().await?),
            CliCommand::Commit => render::report(&h.commit().await?),
            CliCommand::Reload => format!("loaded {} round(s)", h.reload().await?),
            CliCommand::Combat(on) => {
                h.set_combat(on).await?;
                format!("combat {}", if on { "on" } else { "off" })
            }
            CliCommand::Status => render::player(&h.player().await?),
            CliCommand::Help => HELP.to_string(),
            CliCommand::Quit => return Ok(Flow::Quit),
        };
        Ok(Flow::Continue(text))
    }

    async fn resolve_action(&self, action: &ActionRef) -> Result<ActionId> {
        match action {
            ActionRef::Id(id) => Ok(ActionId(*id)),
            ActionRef::Name(name) => self
                .handle
                .actions()
                .await?
                .iter()
                .find(|def| def.name.eq_ignore_ascii_case(name))
                .map(|def| def.id)
                .ok_or_else(|| anyhow!("no action named '{name}'")),
        }
    }

    async fn resolve_target(&self, target: &TargetRef) -> Result<TargetHandle> {
        if let TargetRef::Player = target {
            return Ok(TargetHandle::PLAYER);
        }

        let units = self.handle.units().await?;
        let found = match target {
            TargetRef::Player => None,
            TargetRef::Slot(index) => units.iter().find(|view| view.handle.index == *index),
            TargetRef::Name(prefix) => units.iter().find(|view| name_matches(view, prefix)),
        };
        found
            .map(|view| view.handle)
            .ok_or_else(|| anyhow!("no unit matches '{}'", describe(target)))
    }
}

fn name_matches(view: &UnitView, prefix: &str) -> bool {
    let name = view.unit.spec.name.to_ascii_lowercase();
    let prefix = prefix.to_ascii_lowercase();
    name.starts_with(&prefix) || name.split_whitespace().any(|word| word.starts_with(&prefix))
}

fn describe(target: &TargetRef) -> String {
    match target {
        TargetRef::Player => "player".to_string(),
        TargetRef::Slot(index) => format!("#{index}"),
        TargetRef::Name(name) => name.clone(),
    }
}
