use crate::condition::ConditionPolicy;
use crate::ids::DialogId;

/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Day number a fresh session starts on. Days are 1-based.
    pub starting_day: u32,

    /// How malformed condition trees evaluate.
    pub condition_policy: ConditionPolicy,

    /// Dialog shown after the player links two clues.
    pub connection_dialog: ConnectionDialogConfig,

    /// Dialog started instead of a capture cutscene while a suspect is already held.
    pub follow_up_on_caught: DialogId,

    /// News broadcast scheduled for each day.
    pub news: Vec<DayNews>,
}

impl GameConfig {
    pub const DEFAULT_STARTING_DAY: u32 = 1;
    pub const DEFAULT_FOLLOW_UP_ON_CAUGHT: &'static str = "need_to_release";

    pub fn new() -> Self {
        Self {
            starting_day: Self::DEFAULT_STARTING_DAY,
            condition_policy: ConditionPolicy::default(),
            connection_dialog: ConnectionDialogConfig::default(),
            follow_up_on_caught: DialogId::from(Self::DEFAULT_FOLLOW_UP_ON_CAUGHT),
            news: Vec::new(),
        }
    }

    /// Returns the news dialog scheduled for `day`, if any.
    pub fn news_for_day(&self, day: u32) -> Option<&DialogId> {
        self.news
            .iter()
            .find(|entry| entry.day == day)
            .map(|entry| &entry.dialog_id)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Presentation of the synthetic dialog describing a freshly discovered connection.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConnectionDialogConfig {
    pub enabled: bool,
    pub speaker: String,
    pub acknowledge_text: String,
}

impl Default for ConnectionDialogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            speaker: "Detective".to_owned(),
            acknowledge_text: "OK".to_owned(),
        }
    }
}

/// A news dialog that becomes available on a given day.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DayNews {
    pub day: u32,
    pub dialog_id: DialogId,
}
