//! Ability catalog.
//!
//! The engine only needs abilities to discover which infinite effect a passive
//! ability grants; activation rules for active abilities live elsewhere.

use std::collections::BTreeMap;

use super::CatalogError;

/// Oracle providing ability definitions.
pub trait AbilityOracle: Send + Sync {
    fn ability(&self, id: &str) -> Option<&AbilityDefinition>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbilityKind {
    #[default]
    Active,
    Passive,
}

/// Effect granted permanently by a passive ability.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PassiveGrant {
    pub effect_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityDefinition {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub kind: AbilityKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub passive: Option<PassiveGrant>,
}

impl AbilityDefinition {
    pub fn active(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: AbilityKind::Active,
            passive: None,
        }
    }

    pub fn passive(id: impl Into<String>, effect_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: AbilityKind::Passive,
            passive: Some(PassiveGrant {
                effect_id: effect_id.into(),
            }),
        }
    }

    /// Effect id granted while the ability is known, if any.
    pub fn granted_effect(&self) -> Option<&str> {
        self.passive.as_ref().map(|grant| grant.effect_id.as_str())
    }
}

/// In-memory ability catalog ordered by id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AbilityCatalog {
    abilities: BTreeMap<String, AbilityDefinition>,
}

impl AbilityCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_definitions(
        abilities: impl IntoIterator<Item = AbilityDefinition>,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for ability in abilities {
            catalog.insert(ability)?;
        }
        Ok(catalog)
    }

    pub fn insert(&mut self, ability: AbilityDefinition) -> Result<(), CatalogError> {
        if ability.id.is_empty() {
            return Err(CatalogError::EmptyId { catalog: "ability" });
        }
        if self.abilities.contains_key(&ability.id) {
            return Err(CatalogError::DuplicateId {
                catalog: "ability",
                id: ability.id,
            });
        }
        self.abilities.insert(ability.id.clone(), ability);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.abilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.abilities.is_empty()
    }
}

impl AbilityOracle for AbilityCatalog {
    fn ability(&self, id: &str) -> Option<&AbilityDefinition> {
        self.abilities.get(id)
    }
}
