//! In-memory StateRepository implementation for tests and local runs.

use std::collections::BTreeMap;
use std::sync::RwLock;

use casebook_core::WorldState;

use super::error::{RepositoryError, Result, validate_slot};
use super::StateRepository;

/// In-memory implementation of StateRepository.
pub struct InMemoryStateRepository {
    states: RwLock<BTreeMap<String, WorldState>>,
}

impl InMemoryStateRepository {
    pub fn new() -> Self {
        Self {
            states: RwLock::new(BTreeMap::new()),
        }
    }
}

impl Default for InMemoryStateRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl StateRepository for InMemoryStateRepository {
    fn save(&self, slot: &str, state: &WorldState) -> Result<()> {
        validate_slot(slot)?;
        let mut states = self
            .states
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        states.insert(slot.to_owned(), state.clone());
        Ok(())
    }

    fn load(&self, slot: &str) -> Result<Option<WorldState>> {
        let states = self
            .states
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(states.get(slot).cloned())
    }

    fn exists(&self, slot: &str) -> bool {
        self.states
            .read()
            .map(|states| states.contains_key(slot))
            .unwrap_or(false)
    }

    fn delete(&self, slot: &str) -> Result<()> {
        let mut states = self
            .states
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        states.remove(slot);
        Ok(())
    }

    fn list_slots(&self) -> Result<Vec<String>> {
        let states = self
            .states
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(states.keys().cloned().collect())
    }
}
