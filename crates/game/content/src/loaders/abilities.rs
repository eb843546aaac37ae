//! Ability catalog loader.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tactics_core::{AbilityCatalog, AbilityDefinition};

use crate::loaders::{LoadResult, read_file};

/// Ability catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilityCatalogFile {
    pub abilities: Vec<AbilityDefinition>,
}

/// Loader for the ability catalog from RON files.
pub struct AbilityLoader;

impl AbilityLoader {
    pub fn load(path: &Path) -> LoadResult<AbilityCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid ability catalog {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<AbilityCatalog> {
        let file: AbilityCatalogFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse ability catalog RON: {}", e))?;

        Ok(AbilityCatalog::from_definitions(file.abilities)?)
    }
}
