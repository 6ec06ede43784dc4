//! Deterministic rules for the casebook investigation game.
//!
//! `casebook-core` defines the canonical case model (clues, connections,
//! suspects), the condition language that gates dialogue options, the
//! dialogue graph and the interpreter that walks it. Everything here is
//! synchronous and free of I/O: loaders live in `casebook-content` and the
//! session/observer plumbing lives in `casebook-runtime`.
//!
//! All world mutation flows through [`WorldState`] methods, either called
//! directly by the session or dispatched from dialogue effects by the
//! [`DialogInterpreter`].
pub mod case;
pub mod condition;
pub mod config;
pub mod dialog;
pub mod engine;
pub mod error;
pub mod events;
pub mod ids;
pub mod state;

pub use case::{
    CaseFile, ClueDefinition, ConnectionDefinition, SuspectDefinition, UnlockRequirements,
};
pub use condition::{
    Condition, ConditionContext, ConditionPolicy, ConditionReferences, LogicType, evaluate,
};
pub use config::{ConnectionDialogConfig, DayNews, GameConfig};
pub use dialog::{
    Dialog, DialogGraph, DialogNode, DialogOption, Effect, EffectTable, GraphError, Highlight,
    NotebookEntry, Tooltip, Transition,
};
pub use engine::{DialogInterpreter, DialogSession, DialogSource, InterpreterError};
pub use error::{ErrorKind, ErrorSeverity, GameError};
pub use events::GameEvent;
pub use ids::{ClueId, ConnectionId, CutsceneId, DialogId, EffectId, NodeId, SuspectId};
pub use state::{
    ClueState, ConnectionKey, ConnectionState, DiscoverError, Discovered, StateError,
    SuspectAction, SuspectStage, SuspectState, WorldState,
};
