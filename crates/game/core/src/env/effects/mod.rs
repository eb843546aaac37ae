//! Effect catalog: immutable id → definition lookup.
//!
//! Match data may reference ids that were renamed or removed between content
//! versions. Lookups therefore return `Option` and every consumer treats `None`
//! as a silent no-op.

mod definition;
mod modifier;
mod params;
mod tick;

use std::collections::BTreeMap;

pub use definition::{EffectDefinition, StackingPolicy, TargetKind};
pub use modifier::{Modifier, ModifierCondition, ModifierOp, Stat};
pub use params::{DeathSpread, EffectParams, HookAction, NextHitBonus, SpreadEntry};
pub use tick::{TickKind, TickPhase, TickSpec};

use super::CatalogError;

/// Oracle providing effect definitions.
pub trait EffectOracle: Send + Sync {
    /// Returns the definition for `id`, or `None` for unknown ids.
    fn definition(&self, id: &str) -> Option<&EffectDefinition>;
}

/// In-memory effect catalog ordered by id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EffectCatalog {
    definitions: BTreeMap<String, EffectDefinition>,
}

impl EffectCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog, rejecting duplicate or empty ids.
    pub fn from_definitions(
        definitions: impl IntoIterator<Item = EffectDefinition>,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for definition in definitions {
            catalog.insert(definition)?;
        }
        Ok(catalog)
    }

    pub fn insert(&mut self, definition: EffectDefinition) -> Result<(), CatalogError> {
        if definition.id.is_empty() {
            return Err(CatalogError::EmptyId { catalog: "effect" });
        }
        if self.definitions.contains_key(&definition.id) {
            return Err(CatalogError::DuplicateId {
                catalog: "effect",
                id: definition.id,
            });
        }
        self.definitions.insert(definition.id.clone(), definition);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EffectDefinition> {
        self.definitions.values()
    }
}

impl EffectOracle for EffectCatalog {
    fn definition(&self, id: &str) -> Option<&EffectDefinition> {
        self.definitions.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_id_is_none() {
        let catalog = EffectCatalog::from_definitions([EffectDefinition::new("burn", 2)]).unwrap();
        assert!(catalog.definition("burn").is_some());
        assert!(catalog.definition("renamed_burn").is_none());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = EffectCatalog::from_definitions([
            EffectDefinition::new("burn", 2),
            EffectDefinition::new("burn", 3),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            CatalogError::DuplicateId {
                catalog: "effect",
                id: "burn".into()
            }
        );
    }

    #[test]
    fn empty_id_is_rejected() {
        let mut catalog = EffectCatalog::new();
        assert_eq!(
            catalog.insert(EffectDefinition::new("", 1)),
            Err(CatalogError::EmptyId { catalog: "effect" })
        );
    }
}
