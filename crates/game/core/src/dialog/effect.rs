//! Typed side effects bound to dialogue option tokens.
//!
//! Authored documents name effects by token (for example `_sleep` or
//! `_news_1_end`). The [`EffectTable`] maps each token to an [`Effect`] once
//! at load time, so the interpreter never matches strings during play.

use std::collections::BTreeMap;

use crate::case::CaseFile;
use crate::ids::{ClueId, ConnectionId, CutsceneId, DialogId, EffectId, SuspectId};

use super::error::GraphError;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Effect {
    GrantClue(ClueId),

    /// Discover the connection and show its description afterwards.
    GrantConnectionDialog(ConnectionId),

    /// Queue a cutscene for the next time the player leaves the house.
    SetPendingExternalCutscene(CutsceneId),

    CatchSuspect(SuspectId),
    ReleaseSuspect(SuspectId),
    SkipDay,

    /// Queue `cutscene`, unless a suspect is already held. In that case the
    /// `otherwise` dialog (or the configured follow-up) is started instead.
    CutsceneUnlessCaught {
        cutscene: CutsceneId,
        #[cfg_attr(feature = "serde", serde(default))]
        otherwise: Option<DialogId>,
    },

    #[default]
    None,
}

impl Effect {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::GrantClue(_) => "grant_clue",
            Self::GrantConnectionDialog(_) => "grant_connection_dialog",
            Self::SetPendingExternalCutscene(_) => "set_pending_external_cutscene",
            Self::CatchSuspect(_) => "catch_suspect",
            Self::ReleaseSuspect(_) => "release_suspect",
            Self::SkipDay => "skip_day",
            Self::CutsceneUnlessCaught { .. } => "cutscene_unless_caught",
            Self::None => "none",
        }
    }
}

/// Token to effect lookup, ordered by token.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct EffectTable(BTreeMap<EffectId, Effect>);

impl EffectTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a token, returning the effect it replaced.
    pub fn insert(&mut self, token: impl Into<EffectId>, effect: Effect) -> Option<Effect> {
        self.0.insert(token.into(), effect)
    }

    pub fn with(mut self, token: impl Into<EffectId>, effect: Effect) -> Self {
        self.insert(token, effect);
        self
    }

    pub fn get(&self, token: &EffectId) -> Option<&Effect> {
        self.0.get(token)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.0.contains_key(token)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EffectId, &Effect)> {
        self.0.iter()
    }

    /// Checks that every effect names content that exists in `case`.
    ///
    /// Cutscene and dialog ids are not checked: cutscenes live outside the
    /// rules engine and dialogs may be registered after the table.
    pub fn validate(&self, case: &CaseFile) -> Result<(), GraphError> {
        for (token, effect) in &self.0 {
            let missing = match effect {
                Effect::GrantClue(id) => case.clue(id).is_none().then(|| id.to_string()),
                Effect::GrantConnectionDialog(id) => {
                    case.connection(id).is_none().then(|| id.to_string())
                }
                Effect::CatchSuspect(id) | Effect::ReleaseSuspect(id) => {
                    case.suspect(id).is_none().then(|| id.to_string())
                }
                Effect::SetPendingExternalCutscene(_)
                | Effect::CutsceneUnlessCaught { .. }
                | Effect::SkipDay
                | Effect::None => None,
            };

            if let Some(reference) = missing {
                return Err(GraphError::UnresolvedEffectReference {
                    effect: token.clone(),
                    kind: effect.as_str(),
                    reference,
                });
            }
        }
        Ok(())
    }
}

impl FromIterator<(EffectId, Effect)> for EffectTable {
    fn from_iter<I: IntoIterator<Item = (EffectId, Effect)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::case::{ClueDefinition, SuspectDefinition};

    #[test]
    fn validate_rejects_unknown_references() {
        let case = CaseFile {
            clues: vec![ClueDefinition::new("1", "News")],
            suspects: vec![SuspectDefinition::new("0", "Morgue manager")],
            ..CaseFile::default()
        };

        let table = EffectTable::new()
            .with("_news_1_end", Effect::GrantClue("1".into()))
            .with("_outside_result_is_stels:false_0", Effect::CatchSuspect("0".into()))
            .with("_sleep", Effect::SkipDay);
        assert!(table.validate(&case).is_ok());

        let table = table.with("_news_2_end", Effect::GrantClue("4".into()));
        let err = table.validate(&case).unwrap_err();
        assert!(matches!(
            err,
            GraphError::UnresolvedEffectReference { ref effect, .. } if effect.as_str() == "_news_2_end"
        ));
    }
}
