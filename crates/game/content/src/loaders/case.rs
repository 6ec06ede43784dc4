//! Case file loader.

use std::path::Path;

use casebook_core::{CaseFile, WorldState};

use crate::loaders::{LoadResult, read_file};

/// Loader for the clue catalog, connection table and suspects from RON files.
pub struct CaseLoader;

impl CaseLoader {
    /// Load a case file from a RON file.
    pub fn load(path: &Path) -> LoadResult<CaseFile> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parses and checks a case file.
    ///
    /// The file is rejected if a fresh [`WorldState`] cannot be built from it
    /// (duplicate ids, connections over unknown clues).
    pub fn parse(content: &str) -> LoadResult<CaseFile> {
        let case: CaseFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse case file RON: {}", e))?;

        WorldState::new(&case, 1).map_err(|e| anyhow::anyhow!("Invalid case file: {}", e))?;

        for suspect in &case.suspects {
            for clue in &suspect.unlock.clues {
                if case.clue(clue).is_none() {
                    anyhow::bail!("Suspect '{}' requires unknown clue '{}'", suspect.id, clue);
                }
            }
            for connection in &suspect.unlock.connections {
                if case.connection(connection).is_none() {
                    anyhow::bail!(
                        "Suspect '{}' requires unknown connection '{}'",
                        suspect.id,
                        connection
                    );
                }
            }
        }

        tracing::debug!(
            "Parsed case file: {} clues, {} connections, {} suspects",
            case.clues.len(),
            case.connections.len(),
            case.suspects.len()
        );
        Ok(case)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CASE: &str = r#"(
        clues: [
            (id: "1", title: "Body withheld"),
            (id: "2", title: "Morgue note"),
        ],
        connections: [
            (id: "1_2", clues: ("1", "2"), description: "Someone ordered it"),
        ],
        suspects: [
            (id: "0", name: "Morgue manager", unlock: (clues: ["1"])),
        ],
    )"#;

    #[test]
    fn parses_case_file() {
        let case = CaseLoader::parse(CASE).unwrap();
        assert_eq!(case.clues.len(), 2);
        assert_eq!(case.connections[0].clues.1.as_str(), "2");
        assert_eq!(case.suspects[0].unlock.clues.len(), 1);
        assert!(case.suspects[0].unlock.connections.is_empty());
    }

    #[test]
    fn rejects_unknown_unlock_reference() {
        let broken = CASE.replace(r#"unlock: (clues: ["1"])"#, r#"unlock: (clues: ["42"])"#);
        assert!(CaseLoader::parse(&broken).is_err());
    }

    #[test]
    fn rejects_connection_over_unknown_clue() {
        let broken = CASE.replace(r#"clues: ("1", "2")"#, r#"clues: ("1", "3")"#);
        assert!(CaseLoader::parse(&broken).is_err());
    }
}
