//! Notifications produced by world mutations and dialogue playback.
//!
//! Events are returned (never pushed to callbacks) so the caller decides when
//! observers run. Ordering within one call is the order in which things
//! happened: `OptionSelected` precedes the effect's world events, which
//! precede the next `NodePlayed` or the `DialogEnded`.

use crate::ids::{ClueId, ConnectionId, CutsceneId, DialogId, NodeId, SuspectId};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameEvent {
    // ========================================================================
    // Dialogue
    // ========================================================================
    DialogStarted {
        dialog: DialogId,
        speaker: String,
    },
    NodePlayed {
        dialog: DialogId,
        node: NodeId,
        speaker: String,
        text: String,
    },
    HighlightsUpdated {
        dialog: DialogId,
        node: NodeId,
    },
    OptionSelected {
        dialog: DialogId,
        node: NodeId,
        index: usize,
        text: String,
    },
    DialogEnded {
        dialog: DialogId,
    },

    // ========================================================================
    // Case board
    // ========================================================================
    ClueCollected {
        clue: ClueId,
    },
    ConnectionDiscovered {
        connection: ConnectionId,
        clues: (ClueId, ClueId),
        description: String,
    },
    SuspectRevealed {
        suspect: SuspectId,
    },
    SuspectCaught {
        suspect: SuspectId,
    },
    SuspectReleased {
        suspect: SuspectId,
    },
    SuspectEliminated {
        suspect: SuspectId,
    },

    // ========================================================================
    // Calendar and outside actions
    // ========================================================================
    DayChanged {
        previous: u32,
        current: u32,
    },
    CutscenePending {
        cutscene: CutsceneId,
    },
    CutsceneStarted {
        cutscene: CutsceneId,
    },

    // ========================================================================
    // Requests for the session
    // ========================================================================
    /// Start this dialog once the current one has ended.
    FollowUpDialogRequested {
        dialog: DialogId,
    },
    /// Show the description of this connection once the current dialog has ended.
    ConnectionDialogRequested {
        connection: ConnectionId,
    },
}

impl GameEvent {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DialogStarted { .. } => "dialog_started",
            Self::NodePlayed { .. } => "node_played",
            Self::HighlightsUpdated { .. } => "highlights_updated",
            Self::OptionSelected { .. } => "option_selected",
            Self::DialogEnded { .. } => "dialog_ended",
            Self::ClueCollected { .. } => "clue_collected",
            Self::ConnectionDiscovered { .. } => "connection_discovered",
            Self::SuspectRevealed { .. } => "suspect_revealed",
            Self::SuspectCaught { .. } => "suspect_caught",
            Self::SuspectReleased { .. } => "suspect_released",
            Self::SuspectEliminated { .. } => "suspect_eliminated",
            Self::DayChanged { .. } => "day_changed",
            Self::CutscenePending { .. } => "cutscene_pending",
            Self::CutsceneStarted { .. } => "cutscene_started",
            Self::FollowUpDialogRequested { .. } => "follow_up_dialog_requested",
            Self::ConnectionDialogRequested { .. } => "connection_dialog_requested",
        }
    }
}
