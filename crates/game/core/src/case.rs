//! Static case content: the clue catalog, the connection table and suspect
//! unlock predicates.
//!
//! A [`CaseFile`] is authored data and never changes during play. The mutable
//! per-session view built from it is [`crate::WorldState`].

use crate::ids::{ClueId, ConnectionId, SuspectId};

/// Complete static description of an investigation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CaseFile {
    pub clues: Vec<ClueDefinition>,
    pub connections: Vec<ConnectionDefinition>,
    pub suspects: Vec<SuspectDefinition>,
}

impl CaseFile {
    pub fn clue(&self, id: &ClueId) -> Option<&ClueDefinition> {
        self.clues.iter().find(|clue| &clue.id == id)
    }

    pub fn connection(&self, id: &ConnectionId) -> Option<&ConnectionDefinition> {
        self.connections.iter().find(|connection| &connection.id == id)
    }

    pub fn suspect(&self, id: &SuspectId) -> Option<&SuspectDefinition> {
        self.suspects.iter().find(|suspect| &suspect.id == id)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClueDefinition {
    pub id: ClueId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub title: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
}

impl ClueDefinition {
    pub fn new(id: impl Into<ClueId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
        }
    }
}

/// Authored relationship between exactly two clues.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConnectionDefinition {
    pub id: ConnectionId,
    pub clues: (ClueId, ClueId),
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
}

impl ConnectionDefinition {
    pub fn new(
        id: impl Into<ConnectionId>,
        first: impl Into<ClueId>,
        second: impl Into<ClueId>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            clues: (first.into(), second.into()),
            description: description.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SuspectDefinition {
    pub id: SuspectId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub unlock: UnlockRequirements,
}

impl SuspectDefinition {
    pub fn new(id: impl Into<SuspectId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            unlock: UnlockRequirements::default(),
        }
    }

    pub fn with_unlock(mut self, unlock: UnlockRequirements) -> Self {
        self.unlock = unlock;
        self
    }
}

/// Conjunction of clues and connections that reveals a suspect.
///
/// An empty requirement set is satisfied immediately, so such suspects are
/// revealed by the first re-scan after any mutation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct UnlockRequirements {
    pub clues: Vec<ClueId>,
    pub connections: Vec<ConnectionId>,
}

impl UnlockRequirements {
    pub fn new(
        clues: impl IntoIterator<Item = impl Into<ClueId>>,
        connections: impl IntoIterator<Item = impl Into<ConnectionId>>,
    ) -> Self {
        Self {
            clues: clues.into_iter().map(Into::into).collect(),
            connections: connections.into_iter().map(Into::into).collect(),
        }
    }
}
