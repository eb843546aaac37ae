//! Engine configuration loader.

use std::path::Path;

use tactics_core::EngineConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for engine configuration from TOML files.
///
/// Missing keys fall back to [`EngineConfig::default`].
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    pub fn load(path: &Path) -> LoadResult<EngineConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config {}: {}", path.display(), e))
    }

    /// Parse config data from a TOML string.
    pub fn parse(content: &str) -> LoadResult<EngineConfig> {
        let config: EngineConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.status_slot_cap > EngineConfig::MAX_STATUS_SLOTS {
            anyhow::bail!(
                "status_slot_cap {} exceeds the maximum of {}",
                config.status_slot_cap,
                EngineConfig::MAX_STATUS_SLOTS
            );
        }
        if !config.armor_point_step.is_finite() || !config.resist_step.is_finite() {
            anyhow::bail!("armor_point_step and resist_step must be finite");
        }

        Ok(config)
    }
}
