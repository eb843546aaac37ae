//! Content loaders for reading match data from files.
//!
//! Each loader turns one RON/TOML file into a core catalog or value.
//! [`ContentFactory`] ties them to a data directory.

pub mod abilities;
pub mod config;
pub mod effects;
pub mod factory;
pub mod units;
pub mod weapons;

pub use abilities::AbilityLoader;
pub use config::ConfigLoader;
pub use effects::EffectLoader;
pub use factory::{Content, ContentFactory};
pub use units::UnitLoader;
pub use weapons::WeaponLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
