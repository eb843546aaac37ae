//! Unit roster loader.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tactics_core::{Unit, UnitRecord, normalize_unit};

use crate::loaders::{LoadResult, read_file};

/// Roster structure for RON files. Records are lenient; see [`UnitRecord`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnitRosterFile {
    #[serde(default)]
    pub units: Vec<UnitRecord>,
}

/// Loader for unit rosters from RON files.
pub struct UnitLoader;

impl UnitLoader {
    /// Load and normalize a roster. Only syntax errors fail; bad values are coerced.
    pub fn load(path: &Path) -> LoadResult<Vec<Unit>> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid unit roster {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<Vec<Unit>> {
        let file: UnitRosterFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse unit roster RON: {}", e))?;

        let units: Vec<Unit> = file.units.iter().map(normalize_unit).collect();
        for (index, unit) in units.iter().enumerate() {
            if units[..index].iter().any(|other| other.id == unit.id) {
                anyhow::bail!("duplicate unit id {}", unit.id);
            }
        }
        Ok(units)
    }
}
