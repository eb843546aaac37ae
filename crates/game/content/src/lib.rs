//! Data-driven content definitions and loaders.
//!
//! This crate reads the static match data from RON/TOML files:
//! - Effect catalog (data-driven via RON)
//! - Weapon catalog (data-driven via RON)
//! - Ability catalog (data-driven via RON)
//! - Engine configuration (data-driven via TOML)
//! - Unit rosters (lenient records via RON)
//!
//! Content is consumed through the core oracles and never appears in match state.
//!
//! All loaders use tactics-core types directly with serde for RON/TOML deserialization.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    AbilityLoader, ConfigLoader, Content, ContentFactory, EffectLoader, LoadResult, UnitLoader,
    WeaponLoader,
};
