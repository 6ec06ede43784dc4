//! Error types for dialogue playback.

use crate::dialog::GraphError;
use crate::error::{ErrorKind, ErrorSeverity, GameError};
use crate::ids::{DialogId, EffectId, NodeId};
use crate::state::{DiscoverError, StateError};

/// Errors surfaced by [`crate::DialogInterpreter`] entry points.
///
/// A failed call never changes the interpreter or the world.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InterpreterError {
    #[error("dialog '{active}' is already active")]
    AlreadyInDialog { active: DialogId },

    #[error("dialog '{dialog}' not found")]
    DialogNotFound { dialog: DialogId },

    #[error("start node '{node}' not found in dialog '{dialog}'")]
    StartNodeNotFound { dialog: DialogId, node: NodeId },

    #[error("node '{node}' not found in dialog '{dialog}'")]
    NodeNotFound { dialog: DialogId, node: NodeId },

    #[error("no active dialog")]
    NoActiveDialog,

    #[error("option index {index} out of range ({len} options)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("option {index} of node '{node}' in dialog '{dialog}' is not available")]
    OptionGated {
        dialog: DialogId,
        node: NodeId,
        index: usize,
    },

    #[error("effect token '{effect}' is not bound")]
    UnknownEffect { effect: EffectId },

    #[error("effect failed: {0}")]
    State(#[from] StateError),

    #[error("effect failed: {0}")]
    Discover(#[from] DiscoverError),

    #[error("invalid transient dialog: {0}")]
    InvalidTransientDialog(#[from] GraphError),
}

impl GameError for InterpreterError {
    fn severity(&self) -> ErrorSeverity {
        use InterpreterError::*;
        match self {
            AlreadyInDialog { .. } | DialogNotFound { .. } | NoActiveDialog => {
                ErrorSeverity::Validation
            }
            IndexOutOfRange { .. } => ErrorSeverity::Validation,
            OptionGated { .. } => ErrorSeverity::Recoverable,

            // Registered dialogs are validated, so these point at a content bug
            StartNodeNotFound { .. } | NodeNotFound { .. } | UnknownEffect { .. } => {
                ErrorSeverity::Internal
            }

            State(err) => err.severity(),
            Discover(err) => err.severity(),
            InvalidTransientDialog(err) => err.severity(),
        }
    }

    fn kind(&self) -> ErrorKind {
        use InterpreterError::*;
        match self {
            DialogNotFound { .. }
            | StartNodeNotFound { .. }
            | NodeNotFound { .. }
            | UnknownEffect { .. } => ErrorKind::NotFound,
            AlreadyInDialog { .. } | NoActiveDialog | IndexOutOfRange { .. } => {
                ErrorKind::InvalidState
            }
            OptionGated { .. } => ErrorKind::Gated,
            State(err) => err.kind(),
            Discover(err) => err.kind(),
            InvalidTransientDialog(err) => err.kind(),
        }
    }

    fn error_code(&self) -> &'static str {
        use InterpreterError::*;
        match self {
            AlreadyInDialog { .. } => "DIALOG_ALREADY_ACTIVE",
            DialogNotFound { .. } => "DIALOG_NOT_FOUND",
            StartNodeNotFound { .. } => "DIALOG_START_NODE_NOT_FOUND",
            NodeNotFound { .. } => "DIALOG_NODE_NOT_FOUND",
            NoActiveDialog => "DIALOG_NOT_ACTIVE",
            IndexOutOfRange { .. } => "DIALOG_INDEX_OUT_OF_RANGE",
            OptionGated { .. } => "DIALOG_OPTION_GATED",
            UnknownEffect { .. } => "DIALOG_UNKNOWN_EFFECT",
            State(err) => err.error_code(),
            Discover(err) => err.error_code(),
            InvalidTransientDialog(err) => err.error_code(),
        }
    }
}
