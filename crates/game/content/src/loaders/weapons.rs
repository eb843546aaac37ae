//! Weapon catalog loader.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tactics_core::{WeaponCatalog, WeaponDefinition};

use crate::loaders::{LoadResult, read_file};

/// Weapon catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponCatalogFile {
    pub weapons: Vec<WeaponDefinition>,
}

/// Loader for the weapon catalog from RON files.
pub struct WeaponLoader;

impl WeaponLoader {
    /// Load the weapon catalog from a RON file.
    ///
    /// Malformed weapons are rejected here so they never reach a match.
    pub fn load(path: &Path) -> LoadResult<WeaponCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid weapon catalog {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<WeaponCatalog> {
        let file: WeaponCatalogFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse weapon catalog RON: {}", e))?;

        if let Some((id, reason)) = file
            .weapons
            .iter()
            .find_map(|weapon| weapon.malformation().map(|reason| (&weapon.id, reason)))
        {
            anyhow::bail!("weapon '{}': {}", id, reason);
        }

        Ok(WeaponCatalog::from_definitions(file.weapons)?)
    }
}
