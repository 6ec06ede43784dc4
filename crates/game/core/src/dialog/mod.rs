//! Immutable dialogue graph.
//!
//! A [`DialogGraph`] holds every registered [`Dialog`] plus the
//! [`EffectTable`] their option tokens resolve against. Dialogs are validated
//! on registration, so the interpreter can rely on start nodes and `ToNode`
//! targets resolving.
mod effect;
mod error;
mod model;

pub use effect::{Effect, EffectTable};
pub use error::GraphError;
pub use model::{
    Dialog, DialogNode, DialogOption, GENERATED_START_NODE, Highlight, NotebookEntry, Tooltip,
    Transition,
};

use std::collections::BTreeMap;

use crate::ids::{DialogId, EffectId};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DialogGraph {
    dialogs: BTreeMap<DialogId, Dialog>,
    effects: EffectTable,
}

impl DialogGraph {
    pub fn new(effects: EffectTable) -> Self {
        Self {
            dialogs: BTreeMap::new(),
            effects,
        }
    }

    /// Validates and adds a dialog.
    ///
    /// # Errors
    ///
    /// Refuses ids already registered and any dialog failing [`Dialog::validate`].
    pub fn register(&mut self, dialog: Dialog) -> Result<(), GraphError> {
        if self.dialogs.contains_key(&dialog.id) {
            return Err(GraphError::DuplicateDialog { dialog: dialog.id });
        }
        dialog.validate(&self.effects)?;

        tracing::debug!(
            "Registered dialog '{}' ({} nodes)",
            dialog.id,
            dialog.nodes.len()
        );
        self.dialogs.insert(dialog.id.clone(), dialog);
        Ok(())
    }

    pub fn dialog(&self, id: &DialogId) -> Option<&Dialog> {
        self.dialogs.get(id)
    }

    pub fn contains(&self, id: &DialogId) -> bool {
        self.dialogs.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.dialogs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dialogs.is_empty()
    }

    /// Dialogs ordered by id.
    pub fn dialogs(&self) -> impl Iterator<Item = &Dialog> {
        self.dialogs.values()
    }

    pub fn effects(&self) -> &EffectTable {
        &self.effects
    }

    pub fn effect(&self, token: &EffectId) -> Option<&Effect> {
        self.effects.get(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::{Condition, ConditionPolicy};
    use crate::config::ConnectionDialogConfig;
    use crate::ids::ClueId;
    use crate::state::Discovered;

    fn skip_day() -> Dialog {
        Dialog::new("skip_day", "Detective", "0").with_node(
            DialogNode::new("0", "Go to bed?")
                .with_option(DialogOption::new(
                    "Sleep",
                    Transition::EffectThenEnd("_sleep".into()),
                ))
                .with_option(DialogOption::new("Work", Transition::End)),
        )
    }

    fn effects() -> EffectTable {
        EffectTable::new().with("_sleep", Effect::SkipDay)
    }

    #[test]
    fn register_accepts_valid_dialog() {
        let mut graph = DialogGraph::new(effects());
        graph.register(skip_day()).unwrap();
        assert!(graph.contains(&"skip_day".into()));
        assert_eq!(graph.len(), 1);

        let err = graph.register(skip_day()).unwrap_err();
        assert!(matches!(err, GraphError::DuplicateDialog { .. }));
    }

    #[test]
    fn register_refuses_structural_errors() {
        let mut graph = DialogGraph::new(effects());

        let missing_start = Dialog::new("a", "Detective", "9").with_node(DialogNode::new("0", ""));
        assert!(matches!(
            graph.register(missing_start),
            Err(GraphError::StartNodeNotFound { .. })
        ));

        let dangling = Dialog::new("b", "Detective", "0").with_node(
            DialogNode::new("0", "").with_option(DialogOption::new("?", Transition::ToNode("7".into()))),
        );
        assert!(matches!(
            graph.register(dangling),
            Err(GraphError::DanglingTransition { .. })
        ));

        let unknown_effect = Dialog::new("c", "Detective", "0").with_node(
            DialogNode::new("0", "")
                .with_option(DialogOption::new("?", Transition::EffectThenEnd("_fly".into()))),
        );
        assert!(matches!(
            graph.register(unknown_effect),
            Err(GraphError::UnknownEffect { .. })
        ));

        let duplicate_node = Dialog::new("d", "Detective", "0")
            .with_node(DialogNode::new("0", ""))
            .with_node(DialogNode::new("0", ""));
        assert!(matches!(
            graph.register(duplicate_node),
            Err(GraphError::DuplicateNode { .. })
        ));

        assert!(graph.is_empty());
    }

    #[test]
    fn connection_dialog_has_single_acknowledge_option() {
        let discovered = Discovered {
            connection: "1_2".into(),
            clues: (ClueId::from("1"), ClueId::from("2")),
            description: "The morgue never released the body".to_owned(),
        };
        let dialog = Dialog::for_connection(&discovered, &ConnectionDialogConfig::default());

        assert_eq!(dialog.id.as_str(), "connection_1_2");
        assert!(dialog.validate(&EffectTable::new()).is_ok());
        let start = dialog.start_node().unwrap();
        assert_eq!(start.text, discovered.description);
        assert_eq!(start.options.len(), 1);
        assert_eq!(start.options[0].transition, Transition::End);
    }

    #[test]
    fn visible_tooltips_follow_conditions() {
        struct Nothing;
        impl crate::condition::ConditionContext for Nothing {
            fn has_clue(&self, _: &ClueId) -> bool {
                false
            }
            fn is_connection_discovered_by_id(&self, _: &crate::ids::ConnectionId) -> bool {
                false
            }
            fn is_suspect_alive_and_free(&self, _: &crate::ids::SuspectId) -> bool {
                false
            }
        }

        let highlight = Highlight::new("morgue")
            .with_tooltip(Tooltip::new("A cold building"))
            .with_tooltip(Tooltip::new("Body 8 is missing").with_condition(Condition::HasClue("8".into())));

        let visible: Vec<_> = highlight
            .visible_tooltips(&Nothing, ConditionPolicy::Permissive)
            .map(|tooltip| tooltip.text.as_str())
            .collect();
        assert_eq!(visible, vec!["A cold building"]);
    }
}
