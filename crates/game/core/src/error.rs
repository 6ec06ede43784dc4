//! Common error infrastructure for casebook-core.
//!
//! Domain-specific errors (`StateError`, `DiscoverError`, `GraphError`,
//! `InterpreterError`) live next to the code that raises them. This module
//! holds the shared classification they all report through [`GameError`].
//!
//! # Design Principles
//!
//! - **Recoverable by construction**: no error here terminates the session;
//!   callers get a value and the session stays usable.
//! - **Explicit taxonomy**: every error maps to one [`ErrorKind`] so the
//!   presentation layer can react without matching on concrete types.
//! - **Stable codes**: `error_code()` strings are safe to log and assert on.

/// Severity level of an error, used for logging priority and recovery.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ErrorSeverity {
    /// The player can try something else (option gated, suspect not caught).
    Recoverable,

    /// The request itself is invalid (unknown id, wrong interpreter state).
    Validation,

    /// Authored content is inconsistent (dangling node reference).
    Internal,
}

impl ErrorSeverity {
    /// Returns true if this error indicates a content or engine bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// What went wrong, independent of which subsystem reported it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// A dialog, node, clue, connection or suspect id did not resolve.
    NotFound,

    /// The operation is not valid from the current interpreter or suspect stage.
    InvalidState,

    /// A condition or unlock predicate blocked the action.
    Gated,
}

/// Common trait for all casebook-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - Keep `error_code()` values unique across the crate
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns the taxonomy bucket of this error.
    fn kind(&self) -> ErrorKind;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
