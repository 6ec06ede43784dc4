//! Data-driven case content and loaders.
//!
//! This crate reads the authored parts of an investigation:
//! - Dialog documents (JSON, shared with the writing tools)
//! - The case file: clues, connections, suspects (RON)
//! - The effect token table (RON)
//! - Game configuration (TOML)
//!
//! A sample case is bundled under `data/` and available through
//! [`ContentFactory::bundled`].

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    CaseContent, CaseLoader, ConfigLoader, ContentFactory, DialogDocument, DialogLoader,
    EffectLoader, LoadResult, LoadedDialogs, RejectedDialog,
};
