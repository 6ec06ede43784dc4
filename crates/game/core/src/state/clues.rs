use crate::ids::{ClueId, ConnectionId};

/// Runtime state of one clue.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClueState {
    pub id: ClueId,
    pub title: String,
    pub description: String,
    pub collected: bool,
}

/// Unordered pair of clue ids.
///
/// Construction sorts the pair, so `ConnectionKey::new(a, b) == ConnectionKey::new(b, a)`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConnectionKey(ClueId, ClueId);

impl ConnectionKey {
    pub fn new(first: ClueId, second: ClueId) -> Self {
        if first <= second {
            Self(first, second)
        } else {
            Self(second, first)
        }
    }

    pub fn from_refs(first: &ClueId, second: &ClueId) -> Self {
        Self::new(first.clone(), second.clone())
    }

    pub fn first(&self) -> &ClueId {
        &self.0
    }

    pub fn second(&self) -> &ClueId {
        &self.1
    }

    pub fn into_pair(self) -> (ClueId, ClueId) {
        (self.0, self.1)
    }
}

/// Runtime state of one authored connection.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConnectionState {
    pub id: ConnectionId,
    pub key: ConnectionKey,
    pub description: String,
    pub discovered: bool,
}

impl ConnectionState {
    pub fn to_discovered(&self) -> Discovered {
        Discovered {
            connection: self.id.clone(),
            clues: self.key.clone().into_pair(),
            description: self.description.clone(),
        }
    }
}

/// Result of a successful discovery, for display.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Discovered {
    pub connection: ConnectionId,
    pub clues: (ClueId, ClueId),
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_order_independent() {
        let a = ConnectionKey::new(ClueId::from("2"), ClueId::from("1"));
        let b = ConnectionKey::new(ClueId::from("1"), ClueId::from("2"));
        assert_eq!(a, b);
        assert_eq!(a.first().as_str(), "1");
        assert_eq!(a.second().as_str(), "2");
    }
}
