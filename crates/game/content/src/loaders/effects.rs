//! Effect token table loader.

use std::path::Path;

use casebook_core::{CaseFile, EffectTable};

use crate::loaders::{LoadResult, read_file};

const BUNDLED_EFFECTS: &str = include_str!("../../data/effects.ron");

/// Loader for the token to effect table from RON files.
pub struct EffectLoader;

impl EffectLoader {
    pub fn load(path: &Path) -> LoadResult<EffectTable> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<EffectTable> {
        let table: EffectTable = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse effect table RON: {}", e))?;
        Ok(table)
    }

    /// The effect table shipped with the sample case.
    pub fn bundled() -> LoadResult<EffectTable> {
        Self::parse(BUNDLED_EFFECTS)
    }

    /// Parses a table and checks it against a case file.
    pub fn parse_for_case(content: &str, case: &CaseFile) -> LoadResult<EffectTable> {
        let table = Self::parse(content)?;
        table
            .validate(case)
            .map_err(|e| anyhow::anyhow!("Invalid effect table: {}", e))?;
        Ok(table)
    }
}
