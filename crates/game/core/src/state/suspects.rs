use crate::case::UnlockRequirements;
use crate::ids::SuspectId;

/// Stage of a suspect's investigation.
///
/// ```text
/// Hidden ──reveal──▶ Revealed ──catch──▶ Caught ──release──▶ Released
///                                          └─────eliminate──▶ Eliminated
/// ```
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SuspectStage {
    #[default]
    Hidden,
    Revealed,
    Caught,
    Released,
    Eliminated,
}

impl SuspectStage {
    pub const fn is_revealed(self) -> bool {
        !matches!(self, Self::Hidden)
    }

    pub const fn is_alive_and_free(self) -> bool {
        matches!(self, Self::Hidden | Self::Revealed | Self::Released)
    }
}

/// Transition requested on a suspect, for error reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum SuspectAction {
    Catch,
    Release,
    Eliminate,
}

/// Runtime state of one suspect.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SuspectState {
    pub id: SuspectId,
    pub name: String,
    pub description: String,
    pub unlock: UnlockRequirements,
    pub stage: SuspectStage,
}
