//! Dialog document loader.
//!
//! The document is the JSON format produced by the writing tools:
//!
//! ```json
//! { "dialogs": [ { "id": "skip_day", "startNodeId": "1", "speaker": "Thoughts",
//!     "nodes": [ { "id": "1", "text": "...", "notebookEntries": [], "highlights": [],
//!       "options": [ { "text": "Sleep", "nextNodeId": "_sleep", "condition": null } ] } ] } ] }
//! ```
//!
//! `nextNodeId` is overloaded in the document: it names either a node of the
//! same dialog or an effect token. The loader resolves it once into a
//! [`Transition`] and refuses dialogs whose references are dangling or ambiguous.
//!
//! Conditions are tolerant: a `type` the engine does not know is dropped with
//! a warning, and the option or tooltip behaves as unconditioned (or, nested,
//! as if the child were absent). `logicType` is matched case-insensitively, so
//! `"or"` and `"Or"` select OR as well as `"OR"`; any other value means AND.

use std::collections::BTreeSet;
use std::path::Path;
use std::str::FromStr;

use casebook_core::{
    Condition, Dialog, DialogGraph, DialogId, DialogNode, DialogOption, EffectTable, Highlight,
    LogicType, NotebookEntry, Tooltip, Transition,
};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

// ============================================================================
// Document format
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DialogDocument {
    #[serde(default)]
    pub dialogs: Vec<DialogRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogRecord {
    pub id: String,
    pub start_node_id: String,
    #[serde(default)]
    pub speaker: String,
    #[serde(default)]
    pub nodes: Vec<NodeRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRecord {
    pub id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub notebook_entries: Vec<NotebookRecord>,
    #[serde(default)]
    pub highlights: Vec<HighlightRecord>,
    #[serde(default)]
    pub options: Vec<OptionRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotebookRecord {
    #[serde(default)]
    pub clue_id: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightRecord {
    pub word: String,
    #[serde(default)]
    pub tooltips: Vec<TooltipRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipRecord {
    #[serde(default)]
    pub condition: Option<ConditionRecord>,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<ConditionRecord>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub next_node_id: Option<String>,
}

/// Condition tree as authored, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ConditionRecord {
    HasEvidence {
        id: String,
    },
    HasConnection {
        id: String,
    },
    SuspectAliveAndFree {
        #[serde(rename = "suspectId")]
        suspect_id: String,
    },
    MultiCondition {
        #[serde(rename = "logicType", default)]
        logic_type: Option<String>,
        #[serde(default)]
        conditions: Vec<ConditionRecord>,
    },
    NotCondition {
        #[serde(default)]
        condition: Option<Box<ConditionRecord>>,
    },
    /// Any `type` not listed above.
    #[serde(other)]
    Unsupported,
}

impl ConditionRecord {
    /// Converts the record, dropping unsupported nodes.
    fn to_condition(&self) -> Option<Condition> {
        let condition = match self {
            Self::HasEvidence { id } => Condition::HasClue(id.as_str().into()),
            Self::HasConnection { id } => Condition::HasConnection(id.as_str().into()),
            Self::SuspectAliveAndFree { suspect_id } => {
                Condition::SuspectAliveAndFree(suspect_id.as_str().into())
            }
            Self::MultiCondition {
                logic_type,
                conditions,
            } => {
                // Anything but OR is treated as AND
                let logic = logic_type
                    .as_deref()
                    .and_then(|raw| LogicType::from_str(raw).ok())
                    .unwrap_or(LogicType::And);
                Condition::composite(
                    logic,
                    conditions.iter().filter_map(Self::to_condition).collect(),
                )
            }
            Self::NotCondition { condition } => {
                Condition::Not(condition.as_deref().and_then(Self::to_condition).map(Box::new))
            }
            Self::Unsupported => return None,
        };
        Some(condition)
    }

    fn has_unsupported(&self) -> bool {
        match self {
            Self::Unsupported => true,
            Self::MultiCondition { conditions, .. } => conditions.iter().any(Self::has_unsupported),
            Self::NotCondition { condition } => {
                condition.as_deref().is_some_and(Self::has_unsupported)
            }
            Self::HasEvidence { .. }
            | Self::HasConnection { .. }
            | Self::SuspectAliveAndFree { .. } => false,
        }
    }

    fn from_condition(condition: &Condition) -> Self {
        match condition {
            Condition::HasClue(id) => Self::HasEvidence { id: id.to_string() },
            Condition::HasConnection(id) => Self::HasConnection { id: id.to_string() },
            Condition::SuspectAliveAndFree(id) => Self::SuspectAliveAndFree {
                suspect_id: id.to_string(),
            },
            Condition::And(children) => Self::multi(LogicType::And, children),
            Condition::Or(children) => Self::multi(LogicType::Or, children),
            Condition::Not(child) => Self::NotCondition {
                condition: child
                    .as_deref()
                    .map(|c| Box::new(Self::from_condition(c))),
            },
        }
    }

    fn multi(logic: LogicType, children: &[Condition]) -> Self {
        Self::MultiCondition {
            logic_type: Some(logic.to_string()),
            conditions: children.iter().map(Self::from_condition).collect(),
        }
    }
}

// ============================================================================
// Loader
// ============================================================================

/// A dialog that was left out of the graph, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedDialog {
    pub dialog: DialogId,
    pub reason: String,
}

/// Result of parsing a document: the registered graph plus what was refused.
#[derive(Debug, Clone)]
pub struct LoadedDialogs {
    pub graph: DialogGraph,
    pub rejected: Vec<RejectedDialog>,
}

/// Loader for dialog documents from JSON files.
pub struct DialogLoader;

impl DialogLoader {
    pub fn load(path: &Path, effects: EffectTable) -> LoadResult<LoadedDialogs> {
        let content = read_file(path)?;
        Self::parse(&content, effects)
    }

    /// Parses a document and registers every valid dialog.
    ///
    /// Malformed JSON fails the whole document. Structurally invalid dialogs
    /// are logged once, listed in [`LoadedDialogs::rejected`] and skipped.
    pub fn parse(json: &str, effects: EffectTable) -> LoadResult<LoadedDialogs> {
        let document: DialogDocument = serde_json::from_str(json)
            .map_err(|e| anyhow::anyhow!("Failed to parse dialog document JSON: {}", e))?;
        Ok(Self::from_document(document, effects))
    }

    pub fn from_document(document: DialogDocument, effects: EffectTable) -> LoadedDialogs {
        let mut graph = DialogGraph::new(effects);
        let mut rejected = Vec::new();

        for record in document.dialogs {
            let id = DialogId::from(record.id.as_str());
            let result = Self::build_dialog(record, graph.effects())
                .and_then(|dialog| graph.register(dialog).map_err(|e| e.to_string()));

            if let Err(reason) = result {
                tracing::warn!("Dialog '{}' rejected: {}", id, reason);
                rejected.push(RejectedDialog { dialog: id, reason });
            }
        }

        tracing::info!(
            "Loaded {} dialogs ({} rejected)",
            graph.len(),
            rejected.len()
        );
        LoadedDialogs { graph, rejected }
    }

    /// Serializes a graph back into the document format.
    pub fn to_json(graph: &DialogGraph) -> LoadResult<String> {
        let document = Self::to_document(graph);
        serde_json::to_string_pretty(&document)
            .map_err(|e| anyhow::anyhow!("Failed to serialize dialog document: {}", e))
    }

    pub fn to_document(graph: &DialogGraph) -> DialogDocument {
        DialogDocument {
            dialogs: graph.dialogs().map(Self::dialog_record).collect(),
        }
    }

    fn build_dialog(record: DialogRecord, effects: &EffectTable) -> Result<Dialog, String> {
        let node_ids: BTreeSet<&str> = record.nodes.iter().map(|node| node.id.as_str()).collect();

        let mut nodes = Vec::with_capacity(record.nodes.len());
        for node in &record.nodes {
            let mut options = Vec::with_capacity(node.options.len());
            for option in &node.options {
                let transition =
                    Self::resolve_next(option.next_node_id.as_deref(), &node_ids, effects)
                        .map_err(|reason| format!("node '{}': {}", node.id, reason))?;
                options.push(DialogOption {
                    text: option.text.clone(),
                    transition,
                    condition: Self::condition(option.condition.as_ref(), &record.id, &node.id),
                });
            }

            nodes.push(DialogNode {
                id: node.id.as_str().into(),
                text: node.text.clone(),
                options,
                notebook_entries: node
                    .notebook_entries
                    .iter()
                    .map(|entry| NotebookEntry::new(entry.clue_id.as_str(), entry.description.clone()))
                    .collect(),
                highlights: node
                    .highlights
                    .iter()
                    .map(|highlight| Self::highlight(highlight, &record.id, &node.id))
                    .collect(),
            });
        }

        Ok(Dialog {
            id: record.id.as_str().into(),
            start_node_id: record.start_node_id.as_str().into(),
            speaker: record.speaker,
            nodes,
        })
    }

    fn resolve_next(
        next: Option<&str>,
        node_ids: &BTreeSet<&str>,
        effects: &EffectTable,
    ) -> Result<Transition, String> {
        let target = match next {
            None | Some("") | Some("null") => return Ok(Transition::End),
            Some(target) => target,
        };

        match (node_ids.contains(target), effects.contains(target)) {
            (true, false) => Ok(Transition::ToNode(target.into())),
            (false, true) => Ok(Transition::EffectThenEnd(target.into())),
            (true, true) => Err(format!(
                "'{target}' is both a node id and an effect token"
            )),
            (false, false) => Err(format!(
                "'{target}' is neither a node of this dialog nor a known effect token"
            )),
        }
    }

    fn condition(
        record: Option<&ConditionRecord>,
        dialog: &str,
        node: &str,
    ) -> Option<Condition> {
        let record = record?;
        if record.has_unsupported() {
            tracing::warn!(
                "Dialog '{}' node '{}': dropping condition of unsupported type",
                dialog,
                node
            );
        }
        record.to_condition()
    }

    fn highlight(record: &HighlightRecord, dialog: &str, node: &str) -> Highlight {
        Highlight {
            word: record.word.clone(),
            tooltips: record
                .tooltips
                .iter()
                .map(|tooltip| Tooltip {
                    condition: Self::condition(tooltip.condition.as_ref(), dialog, node),
                    text: tooltip.text.clone(),
                })
                .collect(),
        }
    }

    fn dialog_record(dialog: &Dialog) -> DialogRecord {
        DialogRecord {
            id: dialog.id.to_string(),
            start_node_id: dialog.start_node_id.to_string(),
            speaker: dialog.speaker.clone(),
            nodes: dialog
                .nodes
                .iter()
                .map(|node| NodeRecord {
                    id: node.id.to_string(),
                    text: node.text.clone(),
                    notebook_entries: node
                        .notebook_entries
                        .iter()
                        .map(|entry| NotebookRecord {
                            clue_id: entry.clue_id.to_string(),
                            description: entry.description.clone(),
                        })
                        .collect(),
                    highlights: node
                        .highlights
                        .iter()
                        .map(|highlight| HighlightRecord {
                            word: highlight.word.clone(),
                            tooltips: highlight
                                .tooltips
                                .iter()
                                .map(|tooltip| TooltipRecord {
                                    condition: tooltip
                                        .condition
                                        .as_ref()
                                        .map(ConditionRecord::from_condition),
                                    text: tooltip.text.clone(),
                                })
                                .collect(),
                        })
                        .collect(),
                    options: node
                        .options
                        .iter()
                        .map(|option| OptionRecord {
                            condition: option
                                .condition
                                .as_ref()
                                .map(ConditionRecord::from_condition),
                            text: option.text.clone(),
                            next_node_id: match &option.transition {
                                Transition::ToNode(node) => Some(node.to_string()),
                                Transition::EffectThenEnd(effect) => Some(effect.to_string()),
                                Transition::End => None,
                            },
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}
