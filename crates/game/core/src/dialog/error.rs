use crate::error::{ErrorKind, ErrorSeverity, GameError};
use crate::ids::{DialogId, EffectId, NodeId};

/// Structural problems found while registering dialogs or effect tables.
///
/// All of these are reported once at load time; a dialog that fails
/// validation is never registered.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("dialog id must not be empty")]
    EmptyDialogId,

    #[error("dialog '{dialog}' is registered more than once")]
    DuplicateDialog { dialog: DialogId },

    #[error("dialog '{dialog}' declares node '{node}' more than once")]
    DuplicateNode { dialog: DialogId, node: NodeId },

    #[error("dialog '{dialog}' starts at missing node '{node}'")]
    StartNodeNotFound { dialog: DialogId, node: NodeId },

    #[error("dialog '{dialog}' node '{node}' leads to missing node '{target}'")]
    DanglingTransition {
        dialog: DialogId,
        node: NodeId,
        target: NodeId,
    },

    #[error("dialog '{dialog}' node '{node}' uses unknown effect token '{effect}'")]
    UnknownEffect {
        dialog: DialogId,
        node: NodeId,
        effect: EffectId,
    },

    #[error("effect '{effect}' ({kind}) references unknown '{reference}'")]
    UnresolvedEffectReference {
        effect: EffectId,
        kind: &'static str,
        reference: String,
    },
}

impl GameError for GraphError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidState
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyDialogId => "GRAPH_EMPTY_DIALOG_ID",
            Self::DuplicateDialog { .. } => "GRAPH_DUPLICATE_DIALOG",
            Self::DuplicateNode { .. } => "GRAPH_DUPLICATE_NODE",
            Self::StartNodeNotFound { .. } => "GRAPH_START_NODE_NOT_FOUND",
            Self::DanglingTransition { .. } => "GRAPH_DANGLING_TRANSITION",
            Self::UnknownEffect { .. } => "GRAPH_UNKNOWN_EFFECT",
            Self::UnresolvedEffectReference { .. } => "GRAPH_UNRESOLVED_EFFECT_REFERENCE",
        }
    }
}
