//! World state errors.
//!
//! Errors related to building the world from case content and to the
//! clue/connection/suspect transitions applied during play.

use crate::error::{ErrorKind, ErrorSeverity, GameError};
use crate::ids::{ClueId, ConnectionId, SuspectId};
use crate::state::{SuspectAction, SuspectStage};

/// Errors raised by [`crate::WorldState`] construction and suspect transitions.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateError {
    #[error("unknown suspect '{suspect}'")]
    UnknownSuspect { suspect: SuspectId },

    #[error("clue '{clue}' is defined more than once")]
    DuplicateClue { clue: ClueId },

    #[error("connection '{connection}' is defined more than once")]
    DuplicateConnection { connection: ConnectionId },

    #[error("clues '{first}' and '{second}' are linked by more than one connection")]
    DuplicateConnectionPair { first: ClueId, second: ClueId },

    #[error("suspect '{suspect}' is defined more than once")]
    DuplicateSuspect { suspect: SuspectId },

    #[error("connection '{connection}' references unknown clue '{clue}'")]
    ConnectionClueMissing {
        connection: ConnectionId,
        clue: ClueId,
    },

    #[error("connection '{connection}' links clue '{clue}' to itself")]
    SelfConnection {
        connection: ConnectionId,
        clue: ClueId,
    },

    #[error("suspect '{suspect}' unlock requirements are not met")]
    SuspectLocked { suspect: SuspectId },

    #[error("cannot catch '{suspect}': suspect '{held}' is already caught")]
    CaughtSlotOccupied { suspect: SuspectId, held: SuspectId },

    #[error("cannot {action} suspect '{suspect}' while {stage}")]
    InvalidSuspectTransition {
        suspect: SuspectId,
        stage: SuspectStage,
        action: SuspectAction,
    },

    #[error("invalid day {day} (days start at 1)")]
    InvalidDay { day: u32 },
}

impl GameError for StateError {
    fn severity(&self) -> ErrorSeverity {
        use StateError::*;
        match self {
            UnknownSuspect { .. } => ErrorSeverity::Validation,

            // Construction errors mean the case file is inconsistent
            DuplicateClue { .. }
            | DuplicateConnection { .. }
            | DuplicateConnectionPair { .. }
            | DuplicateSuspect { .. }
            | ConnectionClueMissing { .. }
            | SelfConnection { .. } => ErrorSeverity::Internal,

            SuspectLocked { .. } | CaughtSlotOccupied { .. } => ErrorSeverity::Recoverable,

            InvalidSuspectTransition { .. } | InvalidDay { .. } => ErrorSeverity::Validation,
        }
    }

    fn kind(&self) -> ErrorKind {
        use StateError::*;
        match self {
            UnknownSuspect { .. } | ConnectionClueMissing { .. } => ErrorKind::NotFound,

            SuspectLocked { .. } => ErrorKind::Gated,

            DuplicateClue { .. }
            | DuplicateConnection { .. }
            | DuplicateConnectionPair { .. }
            | DuplicateSuspect { .. }
            | SelfConnection { .. }
            | CaughtSlotOccupied { .. }
            | InvalidSuspectTransition { .. }
            | InvalidDay { .. } => ErrorKind::InvalidState,
        }
    }

    fn error_code(&self) -> &'static str {
        use StateError::*;
        match self {
            UnknownSuspect { .. } => "STATE_UNKNOWN_SUSPECT",
            DuplicateClue { .. } => "STATE_DUPLICATE_CLUE",
            DuplicateConnection { .. } => "STATE_DUPLICATE_CONNECTION",
            DuplicateConnectionPair { .. } => "STATE_DUPLICATE_CONNECTION_PAIR",
            DuplicateSuspect { .. } => "STATE_DUPLICATE_SUSPECT",
            ConnectionClueMissing { .. } => "STATE_CONNECTION_CLUE_MISSING",
            SelfConnection { .. } => "STATE_SELF_CONNECTION",
            SuspectLocked { .. } => "STATE_SUSPECT_LOCKED",
            CaughtSlotOccupied { .. } => "STATE_CAUGHT_SLOT_OCCUPIED",
            InvalidSuspectTransition { .. } => "STATE_INVALID_SUSPECT_TRANSITION",
            InvalidDay { .. } => "STATE_INVALID_DAY",
        }
    }
}

/// Why linking two clues on the board failed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DiscoverError {
    #[error("both clues '{first}' and '{second}' must be collected first")]
    CluesNotCollected { first: ClueId, second: ClueId },

    #[error("no connection exists between '{first}' and '{second}'")]
    NoSuchConnection { first: ClueId, second: ClueId },

    #[error("unknown connection '{connection}'")]
    UnknownConnection { connection: ConnectionId },

    #[error("connection '{connection}' is already discovered")]
    AlreadyDiscovered { connection: ConnectionId },
}

impl GameError for DiscoverError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn kind(&self) -> ErrorKind {
        match self {
            Self::CluesNotCollected { .. } => ErrorKind::Gated,
            Self::NoSuchConnection { .. } | Self::UnknownConnection { .. } => ErrorKind::NotFound,
            Self::AlreadyDiscovered { .. } => ErrorKind::InvalidState,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::CluesNotCollected { .. } => "DISCOVER_CLUES_NOT_COLLECTED",
            Self::NoSuchConnection { .. } => "DISCOVER_NO_SUCH_CONNECTION",
            Self::UnknownConnection { .. } => "DISCOVER_UNKNOWN_CONNECTION",
            Self::AlreadyDiscovered { .. } => "DISCOVER_ALREADY_DISCOVERED",
        }
    }
}
