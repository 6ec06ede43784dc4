//! Dialogue interpreter.
//!
//! The [`DialogInterpreter`] walks a [`DialogGraph`] one call at a time and is
//! the only component that applies dialogue effects to the [`WorldState`].
//! It is either idle or holds exactly one [`DialogSession`].
//!
//! Every entry point returns the [`GameEvent`]s it produced, in order, and
//! drains the world journal into them. On error nothing is returned and
//! neither the interpreter nor the world has changed.

mod effects;
mod errors;

pub use errors::InterpreterError;

use crate::condition::ConditionPolicy;
use crate::config::GameConfig;
use crate::dialog::{Dialog, DialogGraph, DialogNode, DialogOption, Transition};
use crate::events::GameEvent;
use crate::ids::{DialogId, NodeId};
use crate::state::WorldState;

/// Where the active dialog lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DialogSource {
    /// Registered in the graph under this id.
    Graph(DialogId),

    /// Built at runtime (connection descriptions) and owned by the session.
    Transient(Box<Dialog>),
}

/// The active dialog and the node currently shown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DialogSession {
    source: DialogSource,
    node: NodeId,
}

impl DialogSession {
    pub fn source(&self) -> &DialogSource {
        &self.source
    }

    pub fn dialog_id(&self) -> &DialogId {
        match &self.source {
            DialogSource::Graph(id) => id,
            DialogSource::Transient(dialog) => &dialog.id,
        }
    }

    pub fn node_id(&self) -> &NodeId {
        &self.node
    }

    fn resolve<'a>(&'a self, graph: &'a DialogGraph) -> Option<&'a Dialog> {
        match &self.source {
            DialogSource::Graph(id) => graph.dialog(id),
            DialogSource::Transient(dialog) => Some(dialog.as_ref()),
        }
    }
}

#[derive(Clone, Debug)]
pub struct DialogInterpreter {
    session: Option<DialogSession>,
    policy: ConditionPolicy,
    follow_up_on_caught: DialogId,
}

impl Default for DialogInterpreter {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}

impl DialogInterpreter {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            session: None,
            policy: config.condition_policy,
            follow_up_on_caught: config.follow_up_on_caught.clone(),
        }
    }

    pub fn policy(&self) -> ConditionPolicy {
        self.policy
    }

    pub fn session(&self) -> Option<&DialogSession> {
        self.session.as_ref()
    }

    pub fn is_in_dialog(&self) -> bool {
        self.session.is_some()
    }

    pub fn current_dialog_id(&self) -> Option<&DialogId> {
        self.session.as_ref().map(DialogSession::dialog_id)
    }

    pub fn current_dialog<'a>(&'a self, graph: &'a DialogGraph) -> Option<&'a Dialog> {
        self.session.as_ref()?.resolve(graph)
    }

    pub fn current_node<'a>(&'a self, graph: &'a DialogGraph) -> Option<&'a DialogNode> {
        let session = self.session.as_ref()?;
        session.resolve(graph)?.node(&session.node)
    }

    /// Options of the current node whose condition holds, with their index,
    /// in declaration order. Empty when idle.
    pub fn available_options<'a>(
        &'a self,
        graph: &'a DialogGraph,
        world: &WorldState,
    ) -> Vec<(usize, &'a DialogOption)> {
        let Some(node) = self.current_node(graph) else {
            return Vec::new();
        };
        node.options
            .iter()
            .enumerate()
            .filter(|(_, option)| option.is_available(world, self.policy))
            .collect()
    }

    /// Starts a registered dialog at its start node.
    pub fn start_dialog(
        &mut self,
        graph: &DialogGraph,
        world: &mut WorldState,
        id: &DialogId,
    ) -> Result<Vec<GameEvent>, InterpreterError> {
        self.ensure_idle()?;
        let dialog = graph.dialog(id).ok_or_else(|| {
            tracing::warn!("Dialog '{}' not found", id);
            InterpreterError::DialogNotFound { dialog: id.clone() }
        })?;

        let (node, events) = Self::open(dialog, world)?;
        self.session = Some(DialogSession {
            source: DialogSource::Graph(id.clone()),
            node,
        });
        Ok(events)
    }

    /// Starts a dialog that is not part of the graph.
    ///
    /// The dialog is validated against the graph's effect table first.
    pub fn start_transient(
        &mut self,
        graph: &DialogGraph,
        world: &mut WorldState,
        dialog: Dialog,
    ) -> Result<Vec<GameEvent>, InterpreterError> {
        self.ensure_idle()?;
        dialog.validate(graph.effects())?;

        let (node, events) = Self::open(&dialog, world)?;
        self.session = Some(DialogSession {
            source: DialogSource::Transient(Box::new(dialog)),
            node,
        });
        Ok(events)
    }

    /// Selects an option of the current node by its index in declaration order.
    ///
    /// The option's effect, if any, is applied to a staged copy of the world
    /// and committed only once it fully succeeds.
    pub fn select_option(
        &mut self,
        graph: &DialogGraph,
        world: &mut WorldState,
        index: usize,
    ) -> Result<Vec<GameEvent>, InterpreterError> {
        let Some(session) = self.session.as_ref() else {
            tracing::warn!("No active dialog to select option {} in", index);
            return Err(InterpreterError::NoActiveDialog);
        };
        let dialog = session
            .resolve(graph)
            .ok_or_else(|| InterpreterError::DialogNotFound {
                dialog: session.dialog_id().clone(),
            })?;
        let node = dialog
            .node(&session.node)
            .ok_or_else(|| InterpreterError::NodeNotFound {
                dialog: dialog.id.clone(),
                node: session.node.clone(),
            })?;
        let option = node
            .option(index)
            .ok_or(InterpreterError::IndexOutOfRange {
                index,
                len: node.options.len(),
            })?;

        if !option.is_available(world, self.policy) {
            tracing::warn!(
                "Option '{}' is not available in dialog '{}'",
                option.text,
                dialog.id
            );
            return Err(InterpreterError::OptionGated {
                dialog: dialog.id.clone(),
                node: node.id.clone(),
                index,
            });
        }

        // Resolve everything before touching the world
        let next = match &option.transition {
            Transition::ToNode(target) => {
                Some(
                    dialog
                        .node(target)
                        .ok_or_else(|| InterpreterError::NodeNotFound {
                            dialog: dialog.id.clone(),
                            node: target.clone(),
                        })?,
                )
            }
            Transition::EffectThenEnd(_) | Transition::End => None,
        };
        let effect = match option.transition.effect() {
            Some(token) => Some(graph.effect(token).ok_or_else(|| {
                InterpreterError::UnknownEffect {
                    effect: token.clone(),
                }
            })?),
            None => None,
        };

        let mut events = vec![GameEvent::OptionSelected {
            dialog: dialog.id.clone(),
            node: node.id.clone(),
            index,
            text: option.text.clone(),
        }];
        if let Some(effect) = effect {
            let mark = world.journal_mark();
            let mut staged = world.clone();
            let requests = effects::apply_effect(effect, &mut staged, &self.follow_up_on_caught)?;
            events.extend(staged.take_events_since(mark));
            events.extend(requests);
            *world = staged;
        }

        match next {
            Some(next) => {
                Self::enter_node(dialog, next, world, &mut events);
                let next_id = next.id.clone();
                if let Some(session) = self.session.as_mut() {
                    session.node = next_id;
                }
            }
            None => {
                let dialog_id = dialog.id.clone();
                self.session = None;
                tracing::info!("Dialog '{}' ended", dialog_id);
                events.push(GameEvent::DialogEnded { dialog: dialog_id });
            }
        }

        Ok(events)
    }

    /// Ends the active dialog. Does nothing when idle.
    pub fn end_dialog(&mut self) -> Option<GameEvent> {
        let session = self.session.take()?;
        let dialog = session.dialog_id().clone();
        tracing::info!("Dialog '{}' ended", dialog);
        Some(GameEvent::DialogEnded { dialog })
    }

    fn ensure_idle(&self) -> Result<(), InterpreterError> {
        match &self.session {
            Some(session) => {
                tracing::warn!(
                    "Dialog '{}' is active, end it before starting another",
                    session.dialog_id()
                );
                Err(InterpreterError::AlreadyInDialog {
                    active: session.dialog_id().clone(),
                })
            }
            None => Ok(()),
        }
    }

    fn open(
        dialog: &Dialog,
        world: &mut WorldState,
    ) -> Result<(NodeId, Vec<GameEvent>), InterpreterError> {
        let start = dialog
            .start_node()
            .ok_or_else(|| InterpreterError::StartNodeNotFound {
                dialog: dialog.id.clone(),
                node: dialog.start_node_id.clone(),
            })?;

        tracing::info!("Dialog '{}' started", dialog.id);
        let mut events = vec![GameEvent::DialogStarted {
            dialog: dialog.id.clone(),
            speaker: dialog.speaker.clone(),
        }];
        Self::enter_node(dialog, start, world, &mut events);
        Ok((start.id.clone(), events))
    }

    /// Grants the node's notebook clues, then announces the node.
    fn enter_node(
        dialog: &Dialog,
        node: &DialogNode,
        world: &mut WorldState,
        events: &mut Vec<GameEvent>,
    ) {
        let mark = world.journal_mark();
        for entry in &node.notebook_entries {
            if entry.clue_id.is_empty() {
                tracing::warn!(
                    "Notebook entry without clue id in node '{}' of dialog '{}'",
                    node.id,
                    dialog.id
                );
                continue;
            }
            world.grant_clue(&entry.clue_id);
        }
        events.extend(world.take_events_since(mark));

        tracing::debug!("[{}]: {}", dialog.speaker, node.text);
        events.push(GameEvent::NodePlayed {
            dialog: dialog.id.clone(),
            node: node.id.clone(),
            speaker: dialog.speaker.clone(),
            text: node.text.clone(),
        });
        events.push(GameEvent::HighlightsUpdated {
            dialog: dialog.id.clone(),
            node: node.id.clone(),
        });
    }
}
