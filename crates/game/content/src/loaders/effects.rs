//! Effect catalog loader.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tactics_core::{EffectCatalog, EffectDefinition};

use crate::loaders::{LoadResult, read_file};

/// Effect catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectCatalogFile {
    pub effects: Vec<EffectDefinition>,
}

/// Loader for the effect catalog from RON files.
pub struct EffectLoader;

impl EffectLoader {
    /// Load the effect catalog from a RON file, rejecting duplicate ids.
    pub fn load(path: &Path) -> LoadResult<EffectCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid effect catalog {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<EffectCatalog> {
        let file: EffectCatalogFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse effect catalog RON: {}", e))?;

        Ok(EffectCatalog::from_definitions(file.effects)?)
    }
}
