use crate::condition::{Condition, ConditionContext, ConditionPolicy, evaluate};
use crate::config::ConnectionDialogConfig;
use crate::ids::{ClueId, DialogId, EffectId, NodeId};
use crate::state::Discovered;

use super::effect::EffectTable;
use super::error::GraphError;

/// Node id used as the entry point of generated dialogs.
pub const GENERATED_START_NODE: &str = "start";

/// Where an option leads once selected.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Transition {
    /// Continue at another node of the same dialog.
    ToNode(NodeId),

    /// Apply the effect bound to this token, then end the dialog.
    EffectThenEnd(EffectId),

    #[default]
    End,
}

impl Transition {
    pub fn is_end(&self) -> bool {
        !matches!(self, Self::ToNode(_))
    }

    pub fn effect(&self) -> Option<&EffectId> {
        match self {
            Self::EffectThenEnd(effect) => Some(effect),
            Self::ToNode(_) | Self::End => None,
        }
    }
}

/// A conversation: a speaker and a set of nodes reachable from a start node.
///
/// Nodes keep their authored order so documents re-serialize unchanged.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dialog {
    pub id: DialogId,
    pub start_node_id: NodeId,
    pub speaker: String,
    pub nodes: Vec<DialogNode>,
}

impl Dialog {
    pub fn new(
        id: impl Into<DialogId>,
        speaker: impl Into<String>,
        start_node_id: impl Into<NodeId>,
    ) -> Self {
        Self {
            id: id.into(),
            start_node_id: start_node_id.into(),
            speaker: speaker.into(),
            nodes: Vec::new(),
        }
    }

    pub fn with_node(mut self, node: DialogNode) -> Self {
        self.nodes.push(node);
        self
    }

    /// Builds the one-node dialog that reads out a freshly discovered connection.
    pub fn for_connection(discovered: &Discovered, config: &ConnectionDialogConfig) -> Self {
        let (first, second) = &discovered.clues;
        Self::new(
            format!("connection_{first}_{second}"),
            config.speaker.clone(),
            GENERATED_START_NODE,
        )
        .with_node(
            DialogNode::new(GENERATED_START_NODE, discovered.description.clone())
                .with_option(DialogOption::new(
                    config.acknowledge_text.clone(),
                    Transition::End,
                )),
        )
    }

    pub fn node(&self, id: &NodeId) -> Option<&DialogNode> {
        self.nodes.iter().find(|node| &node.id == id)
    }

    pub fn start_node(&self) -> Option<&DialogNode> {
        self.node(&self.start_node_id)
    }

    /// Checks structural soundness against an effect table.
    ///
    /// # Errors
    ///
    /// Returns the first problem found: empty or duplicate ids, a start node
    /// that does not resolve, a `ToNode` that leaves the dialog, or an effect
    /// token missing from `effects`.
    pub fn validate(&self, effects: &EffectTable) -> Result<(), GraphError> {
        if self.id.is_empty() {
            return Err(GraphError::EmptyDialogId);
        }

        for (index, node) in self.nodes.iter().enumerate() {
            if self.nodes[..index].iter().any(|prior| prior.id == node.id) {
                return Err(GraphError::DuplicateNode {
                    dialog: self.id.clone(),
                    node: node.id.clone(),
                });
            }
        }

        if self.start_node().is_none() {
            return Err(GraphError::StartNodeNotFound {
                dialog: self.id.clone(),
                node: self.start_node_id.clone(),
            });
        }

        for node in &self.nodes {
            for option in &node.options {
                match &option.transition {
                    Transition::ToNode(target) if self.node(target).is_none() => {
                        return Err(GraphError::DanglingTransition {
                            dialog: self.id.clone(),
                            node: node.id.clone(),
                            target: target.clone(),
                        });
                    }
                    Transition::EffectThenEnd(effect) if !effects.contains(effect.as_str()) => {
                        return Err(GraphError::UnknownEffect {
                            dialog: self.id.clone(),
                            node: node.id.clone(),
                            effect: effect.clone(),
                        });
                    }
                    _ => {}
                }
            }
        }

        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DialogNode {
    pub id: NodeId,
    pub text: String,
    pub options: Vec<DialogOption>,

    /// Clues granted whenever the node is played.
    pub notebook_entries: Vec<NotebookEntry>,
    pub highlights: Vec<Highlight>,
}

impl DialogNode {
    pub fn new(id: impl Into<NodeId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_option(mut self, option: DialogOption) -> Self {
        self.options.push(option);
        self
    }

    pub fn with_notebook_entry(mut self, entry: NotebookEntry) -> Self {
        self.notebook_entries.push(entry);
        self
    }

    pub fn with_highlight(mut self, highlight: Highlight) -> Self {
        self.highlights.push(highlight);
        self
    }

    pub fn option(&self, index: usize) -> Option<&DialogOption> {
        self.options.get(index)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DialogOption {
    pub text: String,
    pub transition: Transition,
    pub condition: Option<Condition>,
}

impl DialogOption {
    pub fn new(text: impl Into<String>, transition: Transition) -> Self {
        Self {
            text: text.into(),
            transition,
            condition: None,
        }
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    pub fn is_available<C>(&self, ctx: &C, policy: ConditionPolicy) -> bool
    where
        C: ConditionContext + ?Sized,
    {
        evaluate(self.condition.as_ref(), ctx, policy)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NotebookEntry {
    pub clue_id: ClueId,
    pub description: String,
}

impl NotebookEntry {
    pub fn new(clue_id: impl Into<ClueId>, description: impl Into<String>) -> Self {
        Self {
            clue_id: clue_id.into(),
            description: description.into(),
        }
    }
}

/// A word in the node text that shows tooltips on hover.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Highlight {
    pub word: String,
    pub tooltips: Vec<Tooltip>,
}

impl Highlight {
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            tooltips: Vec::new(),
        }
    }

    pub fn with_tooltip(mut self, tooltip: Tooltip) -> Self {
        self.tooltips.push(tooltip);
        self
    }

    /// Tooltips whose condition currently holds, in authored order.
    pub fn visible_tooltips<'a, C>(
        &'a self,
        ctx: &'a C,
        policy: ConditionPolicy,
    ) -> impl Iterator<Item = &'a Tooltip> + 'a
    where
        C: ConditionContext + ?Sized,
    {
        self.tooltips
            .iter()
            .filter(move |tooltip| evaluate(tooltip.condition.as_ref(), ctx, policy))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tooltip {
    pub condition: Option<Condition>,
    pub text: String,
}

impl Tooltip {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            condition: None,
            text: text.into(),
        }
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }
}
