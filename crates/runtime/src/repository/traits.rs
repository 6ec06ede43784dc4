//! Repository contract for saving and loading the case board.

use casebook_core::WorldState;

use super::error::Result;

/// Repository for world state persistence, indexed by save slot name.
///
/// Only the [`WorldState`] is persisted. Authored content (dialogs, effect
/// table, config) is reloaded from data files and an in-progress dialog is
/// never saved.
pub trait StateRepository: Send + Sync {
    /// Save a world state under `slot`, replacing any previous save.
    fn save(&self, slot: &str, state: &WorldState) -> Result<()>;

    /// Load the world state saved under `slot`.
    fn load(&self, slot: &str) -> Result<Option<WorldState>>;

    /// Check if a save exists.
    fn exists(&self, slot: &str) -> bool;

    /// Delete a save. Deleting a missing slot is not an error.
    fn delete(&self, slot: &str) -> Result<()>;

    /// List all slot names, sorted.
    fn list_slots(&self) -> Result<Vec<String>> {
        Ok(vec![])
    }
}
