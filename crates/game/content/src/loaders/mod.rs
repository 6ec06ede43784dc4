//! Content loaders for reading case data from files.
//!
//! Dialogs come from the JSON document format shared with the writing tools;
//! the case file and effect table are RON; the game configuration is TOML.
//! Every loader has a `parse` entry point over text and a `load` entry point
//! over a path so bundled content and on-disk content go through the same code.

pub mod case;
pub mod config;
pub mod dialogs;
pub mod effects;
pub mod factory;

pub use case::CaseLoader;
pub use config::ConfigLoader;
pub use dialogs::{DialogDocument, DialogLoader, LoadedDialogs, RejectedDialog};
pub use effects::EffectLoader;
pub use factory::{CaseContent, ContentFactory};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
