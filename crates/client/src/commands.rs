//! Parsing of the line-oriented command language.
use std::str::FromStr;

use thiserror::Error;

/// How the user names an action: by id or by (case-insensitive) name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionRef {
    Id(u16),
    Name(String),
}

/// How the user names a target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TargetRef {
    Player,
    /// Arena slot index, as printed by `units`.
    Slot(u32),
    /// Case-insensitive prefix of a unit name.
    Name(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CliCommand {
    Actions,
    Units,
    Begin,
    End,
    Add { action: ActionRef, target: TargetRef },
    Undo,
    Cancel,
    Preview,
    Commit,
    Reload,
    Combat(bool),
    Status,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}', try 'help'")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
}

pub const HELP: &str = "\
commands:
  actions                 list the action catalog
  units                   list live units and their handles
  begin | end             start or finish an encounter
  add <action> <target>   queue an action (id or name; target: player, slot, or name)
  undo | cancel           drop the last queued action, or all of them
  preview                 show the cost of the queued batch
  commit                  execute the queued batch
  reload                  refill the clip
  combat on|off           switch regeneration rates
  status                  show gauges, clip, and inventory
  quit";

impl FromStr for CliCommand {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let head = words.next().ok_or(ParseError::Empty)?.to_ascii_lowercase();
        let rest: Vec<&str> = words.collect();

        let command = match head.as_str() {
            "actions" => Self::Actions,
            "units" => Self::Units,
            "begin" => Self::Begin,
            "end" => Self::End,
            "add" | "queue" => parse_add(&rest)?,
            "undo" => Self::Undo,
            "cancel" => Self::Cancel,
            "preview" => Self::Preview,
            "commit" => Self::Commit,
            "reload" => Self::Reload,
            "combat" => match rest.as_slice() {
                ["on"] => Self::Combat(true),
                ["off"] => Self::Combat(false),
                _ => return Err(ParseError::Usage("combat on|off")),
            },
            "status" => Self::Status,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(ParseError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

/// The last word is the target; everything before it names the action, so
/// action names may contain spaces.
fn parse_add(words: &[&str]) -> Result<CliCommand, ParseError> {
    let [action @ .., target] = words else {
        return Err(ParseError::Usage("add <action> <target>"));
    };
    if action.is_empty() {
        return Err(ParseError::Usage("add <action> <target>"));
    }

    let action = action.join(" ");
    let action = match action.parse::<u16>() {
        Ok(id) => ActionRef::Id(id),
        Err(_) => ActionRef::Name(action),
    };

    Ok(CliCommand::Add {
        action,
        target: parse_target(target),
    })
}

fn parse_target(word: &str) -> TargetRef {
    let word = word.trim_start_matches('#');
    if word.eq_ignore_ascii_case("player") || word.eq_ignore_ascii_case("self") {
        return TargetRef::Player;
    }
    match word.parse::<u32>() {
        Ok(slot) => TargetRef::Slot(slot),
        Err(_) => TargetRef::Name(word.to_string()),
    }
}
