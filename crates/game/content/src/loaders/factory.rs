//! Content factory for building catalogs from data files.

use std::path::{Path, PathBuf};

use tactics_core::{AbilityCatalog, EffectCatalog, EngineConfig, Env, Unit, WeaponCatalog};

use crate::loaders::{
    AbilityLoader, ConfigLoader, EffectLoader, LoadResult, UnitLoader, WeaponLoader,
};

/// Every catalog a match needs, owned.
#[derive(Clone, Debug, Default)]
pub struct Content {
    pub effects: EffectCatalog,
    pub weapons: WeaponCatalog,
    pub abilities: AbilityCatalog,
    pub config: EngineConfig,
}

impl Content {
    /// Borrows the catalogs as a core [`Env`].
    pub fn env(&self) -> Env<'_> {
        Env::new(&self.effects, &self.weapons, &self.abilities, &self.config)
    }
}

/// Content factory that loads all match content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── effects.ron
/// ├── weapons.ron
/// ├── abilities.ron
/// └── units.ron
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

    /// Load engine configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<EngineConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load the effect catalog from `effects.ron`.
    pub fn load_effects(&self) -> LoadResult<EffectCatalog> {
        EffectLoader::load(&self.data_dir.join("effects.ron"))
    }

    /// Load the weapon catalog from `weapons.ron`.
    pub fn load_weapons(&self) -> LoadResult<WeaponCatalog> {
        WeaponLoader::load(&self.data_dir.join("weapons.ron"))
    }

    /// Load the ability catalog from `abilities.ron`.
    pub fn load_abilities(&self) -> LoadResult<AbilityCatalog> {
        AbilityLoader::load(&self.data_dir.join("abilities.ron"))
    }

    /// Load the starting roster from `units.ron`.
    pub fn load_units(&self) -> LoadResult<Vec<Unit>> {
        UnitLoader::load(&self.data_dir.join("units.ron"))
    }

    /// Load every catalog plus the configuration.
    pub fn load_all(&self) -> LoadResult<Content> {
        Ok(Content {
            effects: self.load_effects()?,
            weapons: self.load_weapons()?,
            abilities: self.load_abilities()?,
            config: self.load_config()?,
        })
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
