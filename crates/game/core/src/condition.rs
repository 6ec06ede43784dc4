//! Boolean condition language that gates dialogue options and tooltips.
//!
//! Conditions are evaluated against a read-only [`ConditionContext`]; the
//! evaluator never mutates anything and never fails. References to clues,
//! connections or suspects that the context does not know evaluate to
//! `false`, so partially authored content degrades instead of crashing.

use crate::ids::{ClueId, ConnectionId, SuspectId};

/// Condition tree attached to an option or tooltip.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Condition {
    /// The clue has been collected.
    HasClue(ClueId),

    /// The connection has been discovered.
    HasConnection(ConnectionId),

    /// The suspect exists and is neither caught nor eliminated.
    SuspectAliveAndFree(SuspectId),

    /// All children hold. Empty is `true`.
    And(Vec<Condition>),

    /// Any child holds. Empty is malformed; see [`ConditionPolicy`].
    Or(Vec<Condition>),

    /// The child does not hold. `None` is a malformed node; see [`ConditionPolicy`].
    Not(Option<Box<Condition>>),
}

/// Composite operator as authored in dialogue documents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum LogicType {
    And,
    Or,
}

/// Evaluation of malformed trees: `Not` without a child and empty composites.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ConditionPolicy {
    /// Malformed nodes pass, so an empty `Or` is `true`. Matches the shipped
    /// game content.
    #[default]
    Permissive,

    /// Malformed nodes follow plain boolean algebra: `Not` without a child
    /// fails, `And([])` is `true` and `Or([])` is `false`.
    Strict,
}

impl ConditionPolicy {
    const fn malformed(self) -> bool {
        matches!(self, Self::Permissive)
    }
}

/// Read-only view of the world that conditions are evaluated against.
pub trait ConditionContext {
    fn has_clue(&self, id: &ClueId) -> bool;

    fn is_connection_discovered_by_id(&self, id: &ConnectionId) -> bool;

    fn is_suspect_alive_and_free(&self, id: &SuspectId) -> bool;
}

/// Evaluates an optional condition. An absent condition always holds.
pub fn evaluate<C>(condition: Option<&Condition>, ctx: &C, policy: ConditionPolicy) -> bool
where
    C: ConditionContext + ?Sized,
{
    condition.is_none_or(|condition| condition.evaluate(ctx, policy))
}

impl Condition {
    pub fn all(children: impl IntoIterator<Item = Condition>) -> Self {
        Self::And(children.into_iter().collect())
    }

    pub fn any(children: impl IntoIterator<Item = Condition>) -> Self {
        Self::Or(children.into_iter().collect())
    }

    pub fn negate(child: Condition) -> Self {
        Self::Not(Some(Box::new(child)))
    }

    /// Builds a composite from an authored logic type.
    pub fn composite(logic: LogicType, children: Vec<Condition>) -> Self {
        match logic {
            LogicType::And => Self::And(children),
            LogicType::Or => Self::Or(children),
        }
    }

    pub fn evaluate<C>(&self, ctx: &C, policy: ConditionPolicy) -> bool
    where
        C: ConditionContext + ?Sized,
    {
        match self {
            Self::HasClue(id) => ctx.has_clue(id),
            Self::HasConnection(id) => ctx.is_connection_discovered_by_id(id),
            Self::SuspectAliveAndFree(id) => ctx.is_suspect_alive_and_free(id),
            Self::And(children) => children.iter().all(|child| child.evaluate(ctx, policy)),
            Self::Or(children) if children.is_empty() => policy.malformed(),
            Self::Or(children) => children.iter().any(|child| child.evaluate(ctx, policy)),
            Self::Not(Some(child)) => !child.evaluate(ctx, policy),
            Self::Not(None) => policy.malformed(),
        }
    }

    /// Returns true if the tree contains a `Not` without a child or an empty
    /// composite.
    pub fn is_malformed(&self) -> bool {
        match self {
            Self::Not(None) => true,
            Self::And(children) | Self::Or(children) if children.is_empty() => true,
            Self::Not(Some(child)) => child.is_malformed(),
            Self::And(children) | Self::Or(children) => children.iter().any(Self::is_malformed),
            Self::HasClue(_) | Self::HasConnection(_) | Self::SuspectAliveAndFree(_) => false,
        }
    }

    /// Nesting depth; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        match self {
            Self::And(children) | Self::Or(children) => {
                1 + children.iter().map(Self::depth).max().unwrap_or(0)
            }
            Self::Not(child) => 1 + child.as_deref().map_or(0, Self::depth),
            Self::HasClue(_) | Self::HasConnection(_) | Self::SuspectAliveAndFree(_) => 1,
        }
    }

    /// Collects the leaf references of the tree, in declaration order.
    pub fn references(&self) -> ConditionReferences<'_> {
        let mut refs = ConditionReferences::default();
        self.collect_references(&mut refs);
        refs
    }

    fn collect_references<'a>(&'a self, refs: &mut ConditionReferences<'a>) {
        match self {
            Self::HasClue(id) => refs.clues.push(id),
            Self::HasConnection(id) => refs.connections.push(id),
            Self::SuspectAliveAndFree(id) => refs.suspects.push(id),
            Self::And(children) | Self::Or(children) => {
                for child in children {
                    child.collect_references(refs);
                }
            }
            Self::Not(child) => {
                if let Some(child) = child {
                    child.collect_references(refs);
                }
            }
        }
    }
}

/// Leaf ids referenced by a condition tree.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConditionReferences<'a> {
    pub clues: Vec<&'a ClueId>,
    pub connections: Vec<&'a ConnectionId>,
    pub suspects: Vec<&'a SuspectId>,
}
