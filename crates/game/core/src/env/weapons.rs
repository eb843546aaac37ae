//! Weapon catalog.

use std::collections::BTreeMap;

use crate::combat::{ArmorClass, DamageType};

use super::CatalogError;

/// Oracle providing weapon definitions.
pub trait WeaponOracle: Send + Sync {
    fn weapon(&self, id: &str) -> Option<&WeaponDefinition>;
}

/// Weapon definition as authored in content.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeaponDefinition {
    pub id: String,
    pub base_damage: f64,
    #[cfg_attr(feature = "serde", serde(default = "default_range_min"))]
    pub range_min: u32,
    #[cfg_attr(feature = "serde", serde(default = "default_range_min"))]
    pub range_max: u32,
    /// Multiplier per defender armor class; missing classes use 1.0.
    #[cfg_attr(feature = "serde", serde(default))]
    pub armor_class_multipliers: BTreeMap<ArmorClass, f64>,
    /// Distance-dependent multiplier; only distances 1 and 2 are consulted.
    #[cfg_attr(feature = "serde", serde(default))]
    pub distance_curve: BTreeMap<u32, f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub damage_type: DamageType,
}

#[cfg(feature = "serde")]
fn default_range_min() -> u32 {
    1
}

impl WeaponDefinition {
    pub fn new(id: impl Into<String>, base_damage: f64, range_min: u32, range_max: u32) -> Self {
        Self {
            id: id.into(),
            base_damage,
            range_min,
            range_max,
            armor_class_multipliers: BTreeMap::new(),
            distance_curve: BTreeMap::new(),
            damage_type: DamageType::Physical,
        }
    }

    pub fn with_armor_multiplier(mut self, class: ArmorClass, multiplier: f64) -> Self {
        self.armor_class_multipliers.insert(class, multiplier);
        self
    }

    pub fn with_distance_multiplier(mut self, distance: u32, multiplier: f64) -> Self {
        self.distance_curve.insert(distance, multiplier);
        self
    }

    pub fn with_damage_type(mut self, damage_type: DamageType) -> Self {
        self.damage_type = damage_type;
        self
    }

    /// Melee weapons cannot reach past adjacent hexes.
    pub fn is_melee(&self) -> bool {
        self.range_max <= 1
    }

    /// Returns a description of the first malformed field, if any.
    pub fn malformation(&self) -> Option<&'static str> {
        if !self.base_damage.is_finite() || self.base_damage < 0.0 {
            return Some("base damage is not a finite non-negative number");
        }
        if self.range_min > self.range_max {
            return Some("range minimum exceeds range maximum");
        }
        if self.armor_class_multipliers.values().any(|m| !m.is_finite()) {
            return Some("armor class multiplier is not finite");
        }
        if self.distance_curve.values().any(|m| !m.is_finite()) {
            return Some("distance multiplier is not finite");
        }
        None
    }
}

/// In-memory weapon catalog ordered by id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WeaponCatalog {
    weapons: BTreeMap<String, WeaponDefinition>,
}

impl WeaponCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_definitions(
        weapons: impl IntoIterator<Item = WeaponDefinition>,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for weapon in weapons {
            catalog.insert(weapon)?;
        }
        Ok(catalog)
    }

    pub fn insert(&mut self, weapon: WeaponDefinition) -> Result<(), CatalogError> {
        if weapon.id.is_empty() {
            return Err(CatalogError::EmptyId { catalog: "weapon" });
        }
        if self.weapons.contains_key(&weapon.id) {
            return Err(CatalogError::DuplicateId {
                catalog: "weapon",
                id: weapon.id,
            });
        }
        self.weapons.insert(weapon.id.clone(), weapon);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.weapons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weapons.is_empty()
    }
}

impl WeaponOracle for WeaponCatalog {
    fn weapon(&self, id: &str) -> Option<&WeaponDefinition> {
        self.weapons.get(id)
    }
}
