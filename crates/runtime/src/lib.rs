//! Session orchestration for a casebook investigation.
//!
//! This crate wires the rules from `casebook-core` into a playable session.
//! Consumers embed [`GameSession`] to drive dialogs and the case board,
//! subscribe observers per [`Topic`], and save or load the board through a
//! [`StateRepository`].
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the orchestrator and builder
//! - [`events`] provides topic-based observer dispatch, drained once per tick
//! - [`repository`] persists world snapshots under named slots
pub mod error;
pub mod events;
pub mod repository;
pub mod session;

pub use error::{Result, RuntimeError};
pub use events::{EventBus, EventRecorder, SessionObserver, Topic};
pub use repository::{
    FileStateRepository, InMemoryStateRepository, RepositoryError, StateRepository,
};
pub use session::{FollowUp, GameSession, GameSessionBuilder};
