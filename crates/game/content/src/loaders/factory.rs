//! Content factory for loading a whole case from a data directory.

use std::path::{Path, PathBuf};

use casebook_core::{CaseFile, Condition, DialogGraph, EffectTable, GameConfig};

use crate::loaders::{
    CaseLoader, ConfigLoader, DialogLoader, EffectLoader, LoadResult, RejectedDialog, read_file,
};

const BUNDLED_CONFIG: &str = include_str!("../../data/config.toml");
const BUNDLED_CASE: &str = include_str!("../../data/case.ron");
const BUNDLED_EFFECTS: &str = include_str!("../../data/effects.ron");
const BUNDLED_DIALOGS: &str = include_str!("../../data/dialogs.json");

/// Everything a session needs, loaded and cross-checked.
#[derive(Debug, Clone)]
pub struct CaseContent {
    pub config: GameConfig,
    pub case: CaseFile,
    pub graph: DialogGraph,
    pub rejected: Vec<RejectedDialog>,
}

/// Content factory that loads all case content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── case.ron
/// ├── effects.ron
/// └── dialogs.json
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Loads the sample case compiled into this crate.
    pub fn bundled() -> LoadResult<CaseContent> {
        Self::assemble(
            ConfigLoader::parse(BUNDLED_CONFIG)?,
            CaseLoader::parse(BUNDLED_CASE)?,
            BUNDLED_EFFECTS,
            BUNDLED_DIALOGS,
        )
    }

    /// Load game configuration from `config.toml`.
    ///
    /// A missing file yields the default configuration.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            tracing::info!("No config at {}, using defaults", path.display());
            return Ok(GameConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the case file from `case.ron`.
    pub fn load_case(&self) -> LoadResult<CaseFile> {
        CaseLoader::load(&self.data_dir.join("case.ron"))
    }

    /// Load the effect table from `effects.ron`, checked against `case`.
    pub fn load_effects(&self, case: &CaseFile) -> LoadResult<EffectTable> {
        let content = read_file(&self.data_dir.join("effects.ron"))?;
        EffectLoader::parse_for_case(&content, case)
    }

    /// Loads and cross-checks every file in the directory.
    pub fn load_all(&self) -> LoadResult<CaseContent> {
        let config = self.load_config()?;
        let case = self.load_case()?;
        let effects = read_file(&self.data_dir.join("effects.ron"))?;
        let dialogs = read_file(&self.data_dir.join("dialogs.json"))?;
        Self::assemble(config, case, &effects, &dialogs)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn assemble(
        config: GameConfig,
        case: CaseFile,
        effects: &str,
        dialogs: &str,
    ) -> LoadResult<CaseContent> {
        let effects = EffectLoader::parse_for_case(effects, &case)?;
        let loaded = DialogLoader::parse(dialogs, effects)?;

        lint_references(&loaded.graph, &case);
        for news in &config.news {
            if !loaded.graph.contains(&news.dialog_id) {
                tracing::warn!(
                    "News for day {} names unknown dialog '{}'",
                    news.day,
                    news.dialog_id
                );
            }
        }

        Ok(CaseContent {
            config,
            case,
            graph: loaded.graph,
            rejected: loaded.rejected,
        })
    }
}

/// Warns about conditions and notebook entries naming ids the case does not define.
///
/// These evaluate to `false` (or grant nothing) at runtime, which is usually
/// a typo in the document.
fn lint_references(graph: &DialogGraph, case: &CaseFile) {
    for dialog in graph.dialogs() {
        for node in &dialog.nodes {
            for entry in &node.notebook_entries {
                if case.clue(&entry.clue_id).is_none() {
                    tracing::warn!(
                        "Dialog '{}' node '{}' grants unknown clue '{}'",
                        dialog.id,
                        node.id,
                        entry.clue_id
                    );
                }
            }

            let conditions = node
                .options
                .iter()
                .filter_map(|option| option.condition.as_ref())
                .chain(
                    node.highlights
                        .iter()
                        .flat_map(|highlight| &highlight.tooltips)
                        .filter_map(|tooltip| tooltip.condition.as_ref()),
                );
            for condition in conditions {
                lint_condition(condition, case, dialog.id.as_str(), node.id.as_str());
            }
        }
    }
}

fn lint_condition(condition: &Condition, case: &CaseFile, dialog: &str, node: &str) {
    if condition.is_malformed() {
        tracing::warn!(
            "Dialog '{}' node '{}' has a NOT without a child or an empty composite",
            dialog,
            node
        );
    }

    let refs = condition.references();
    let unknown = refs
        .clues
        .iter()
        .filter(|id| case.clue(id).is_none())
        .map(|id| id.as_str())
        .chain(
            refs.connections
                .iter()
                .filter(|id| case.connection(id).is_none())
                .map(|id| id.as_str()),
        )
        .chain(
            refs.suspects
                .iter()
                .filter(|id| case.suspect(id).is_none())
                .map(|id| id.as_str()),
        );
    for id in unknown {
        tracing::warn!(
            "Dialog '{}' node '{}' condition references unknown id '{}'",
            dialog,
            node,
            id
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn bundled_content_loads_cleanly() {
        let content = ContentFactory::bundled().unwrap();
        assert!(content.rejected.is_empty(), "{:?}", content.rejected);
        assert!(content.graph.contains(&"skip_day".into()));
        assert!(content.graph.contains(&content.config.follow_up_on_caught));
        for news in &content.config.news {
            assert!(content.graph.contains(&news.dialog_id));
        }
    }

    #[test]
    fn missing_directory_fails() {
        let factory = ContentFactory::new("/nonexistent/casebook");
        assert!(factory.load_all().is_err());
    }
}
