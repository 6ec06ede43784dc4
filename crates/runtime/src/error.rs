//! Unified error type surfaced by the session API.
//!
//! Wraps interpreter, world and repository failures so clients can bubble
//! them up with one `?`.
use thiserror::Error;

use casebook_core::{DialogId, DiscoverError, ErrorKind, GameError, InterpreterError, StateError};

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Interpreter(#[from] InterpreterError),

    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Discover(#[from] DiscoverError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("session requires a case file before building")]
    MissingCase,

    #[error("no suspect is currently caught")]
    NoCaughtSuspect,

    #[error("cannot restore a snapshot while dialog '{active}' is active")]
    RestoreDuringDialog { active: DialogId },

    #[error("save slot '{slot}' not found")]
    SlotNotFound { slot: String },
}

impl RuntimeError {
    /// Taxonomy bucket for errors that come from the rules layer.
    ///
    /// Repository and builder failures have no rules-level kind.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Interpreter(err) => Some(err.kind()),
            Self::State(err) => Some(err.kind()),
            Self::Discover(err) => Some(err.kind()),
            Self::NoCaughtSuspect | Self::RestoreDuringDialog { .. } => {
                Some(ErrorKind::InvalidState)
            }
            Self::SlotNotFound { .. } => Some(ErrorKind::NotFound),
            Self::Repository(_) | Self::MissingCase => None,
        }
    }

    /// True when the failure points at inconsistent case content rather than
    /// a request the player can correct.
    pub fn is_internal(&self) -> bool {
        match self {
            Self::Interpreter(err) => err.severity().is_internal(),
            Self::State(err) => err.severity().is_internal(),
            Self::Discover(err) => err.severity().is_internal(),
            Self::MissingCase => true,
            Self::Repository(_)
            | Self::NoCaughtSuspect
            | Self::RestoreDuringDialog { .. }
            | Self::SlotNotFound { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use casebook_core::{ClueId, ConnectionId, NodeId};

    #[test]
    fn content_errors_are_internal() {
        let dangling = RuntimeError::from(InterpreterError::NodeNotFound {
            dialog: DialogId::from("intro"),
            node: NodeId::from("9"),
        });
        assert!(dangling.is_internal());

        let gated = RuntimeError::from(DiscoverError::CluesNotCollected {
            first: ClueId::from("1"),
            second: ClueId::from("2"),
        });
        assert!(!gated.is_internal());
        assert_eq!(gated.kind(), Some(ErrorKind::Gated));

        let unknown = RuntimeError::from(DiscoverError::UnknownConnection {
            connection: ConnectionId::from("9_9"),
        });
        assert_eq!(unknown.kind(), Some(ErrorKind::NotFound));
    }
}
