//! String-keyed identifiers for authored content.
//!
//! Content is keyed by short strings chosen by writers ("1", "news_2",
//! "_sleep"). Each kind of key gets its own newtype so a clue id can never be
//! passed where a suspect id is expected.

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl core::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(
    /// Key of a collectible clue.
    ClueId
);
string_id!(
    /// Key of an authored link between two clues.
    ConnectionId
);
string_id!(
    /// Key of a suspect.
    SuspectId
);
string_id!(
    /// Key of a dialog in the graph.
    DialogId
);
string_id!(
    /// Key of a node, unique within its dialog.
    NodeId
);
string_id!(
    /// Effect token as authored in dialogue data (e.g. `_sleep`).
    EffectId
);
string_id!(
    /// Key of a cutscene owned by the presentation layer.
    CutsceneId
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn ids_order_and_borrow_as_str() {
        let mut map = BTreeMap::new();
        map.insert(ClueId::from("2"), "second");
        map.insert(ClueId::from("1"), "first");

        assert_eq!(map.get("1"), Some(&"first"));
        assert_eq!(map.keys().next().map(ClueId::as_str), Some("1"));
        assert_eq!(ClueId::new("8").to_string(), "8");
    }
}
