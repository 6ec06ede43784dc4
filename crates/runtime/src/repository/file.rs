//! File-based StateRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use casebook_core::WorldState;

use super::error::{RepositoryError, Result, validate_slot};
use super::StateRepository;

/// File-based implementation of StateRepository.
///
/// Stores each save as `{slot}.bin` in bincode format. Writes go to a
/// temporary file first and are renamed into place, so a crash never leaves
/// a half-written save behind.
pub struct FileStateRepository {
    base_dir: PathBuf,
}

impl FileStateRepository {
    /// Create a new file-based state repository.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn slot_path(&self, slot: &str) -> Result<PathBuf> {
        validate_slot(slot)?;
        Ok(self.base_dir.join(format!("{slot}.bin")))
    }
}

impl StateRepository for FileStateRepository {
    fn save(&self, slot: &str, state: &WorldState) -> Result<()> {
        let path = self.slot_path(slot)?;
        let temp_path = path.with_extension("bin.tmp");

        let bytes =
            bincode::serialize(state).map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!("Saved slot '{}' to {}", slot, path.display());
        Ok(())
    }

    fn load(&self, slot: &str) -> Result<Option<WorldState>> {
        let path = self.slot_path(slot)?;
        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path)?;
        let state: WorldState = bincode::deserialize(&bytes)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        tracing::debug!("Loaded slot '{}' from {}", slot, path.display());
        Ok(Some(state))
    }

    fn exists(&self, slot: &str) -> bool {
        self.slot_path(slot).is_ok_and(|path| path.exists())
    }

    fn delete(&self, slot: &str) -> Result<()> {
        let path = self.slot_path(slot)?;
        if path.exists() {
            fs::remove_file(&path)?;
            tracing::debug!("Deleted slot '{}'", slot);
        }
        Ok(())
    }

    fn list_slots(&self) -> Result<Vec<String>> {
        let mut slots = Vec::new();

        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();
            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(slot) = filename.strip_suffix(".bin")
                && validate_slot(slot).is_ok()
            {
                slots.push(slot.to_owned());
            }
        }

        slots.sort_unstable();
        Ok(slots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use casebook_core::{CaseFile, ClueDefinition, ClueId};

    fn world() -> WorldState {
        let case = CaseFile {
            clues: vec![ClueDefinition {
                id: ClueId::from("1"),
                title: "Body withheld".into(),
                description: "The hospital keeps a body.".into(),
            }],
            ..CaseFile::default()
        };
        WorldState::new(&case, 1).unwrap()
    }

    #[test]
    fn save_load_delete() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileStateRepository::new(dir.path()).unwrap();

        let mut state = world();
        state.grant_clue(&ClueId::from("1"));
        state.skip_day();
        state.take_events();

        repo.save("slot-1", &state).unwrap();
        assert!(repo.exists("slot-1"));
        assert_eq!(repo.list_slots().unwrap(), vec!["slot-1".to_owned()]);

        let loaded = repo.load("slot-1").unwrap().unwrap();
        assert_eq!(loaded, state);
        assert!(loaded.has_clue(&ClueId::from("1")));
        assert_eq!(loaded.day(), 2);

        repo.delete("slot-1").unwrap();
        assert!(!repo.exists("slot-1"));
        assert!(repo.load("slot-1").unwrap().is_none());
    }

    #[test]
    fn rejects_path_like_slots() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileStateRepository::new(dir.path()).unwrap();

        let err = repo.save("../escape", &world()).unwrap_err();
        assert!(matches!(err, RepositoryError::InvalidSlot(_)));
        assert!(!repo.exists(""));
    }

    #[test]
    fn corrupted_save_reports_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileStateRepository::new(dir.path()).unwrap();
        fs::write(dir.path().join("broken.bin"), [0xff, 0x00, 0x13]).unwrap();

        let err = repo.load("broken").unwrap_err();
        assert!(matches!(err, RepositoryError::Serialization(_)));
    }
}
