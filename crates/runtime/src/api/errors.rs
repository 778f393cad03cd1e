//! Unified error types surfaced by the runtime API.
//!
//! Wraps worker coordination failures and encounter rejections so clients can
//! bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use overload_core::{ActionId, ErrorSeverity, GameError, Unavailable};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("encounter worker command channel closed")]
    CommandChannelClosed,

    #[error("encounter worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("runtime worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("runtime requires content to be configured before building")]
    MissingContent,

    #[error("no encounter in progress")]
    NoEncounter,

    #[error("an encounter is already in progress")]
    EncounterActive,

    #[error("unknown action {0}")]
    UnknownAction(ActionId),

    #[error("action rejected: {0}")]
    Unavailable(#[from] Unavailable),
}

impl RuntimeError {
    /// Whether the caller can simply try something else.
    pub fn is_recoverable(&self) -> bool {
        self.severity().is_recoverable()
    }

    /// Whether the runtime itself is gone.
    pub fn is_fatal(&self) -> bool {
        self.severity() == ErrorSeverity::Fatal
    }
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NoEncounter | Self::EncounterActive | Self::UnknownAction(_) => {
                ErrorSeverity::Validation
            }
            Self::Unavailable(inner) => inner.severity(),
            Self::MissingContent => ErrorSeverity::Internal,
            Self::CommandChannelClosed | Self::ReplyChannelClosed(_) | Self::WorkerJoin(_) => {
                ErrorSeverity::Fatal
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::CommandChannelClosed => "RUNTIME_COMMAND_CHANNEL_CLOSED",
            Self::ReplyChannelClosed(_) => "RUNTIME_REPLY_CHANNEL_CLOSED",
            Self::WorkerJoin(_) => "RUNTIME_WORKER_JOIN",
            Self::MissingContent => "RUNTIME_MISSING_CONTENT",
            Self::NoEncounter => "RUNTIME_NO_ENCOUNTER",
            Self::EncounterActive => "RUNTIME_ENCOUNTER_ACTIVE",
            Self::UnknownAction(_) => "RUNTIME_UNKNOWN_ACTION",
            Self::Unavailable(inner) => inner.error_code(),
        }
    }
}
