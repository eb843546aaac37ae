//! Lenient conversion of externally supplied unit records.
//!
//! Records come from presentation layers and saved matches that may be
//! missing fields or carry garbage. Normalization never fails: missing or
//! non-finite numbers fall back to defaults, negative values clamp to zero,
//! unknown armor classes become `NONE` and unknown resist types are dropped.
//! Every replica applies the same fallbacks, so partial data degrades the
//! same way everywhere.

use std::collections::BTreeMap;

use crate::combat::{ArmorClass, DamageType};
use crate::state::{Hex, Owner, ResourceMeter, Squad, Unit, UnitId};

/// Loosely typed unit as received from outside the core.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct UnitRecord {
    pub id: Option<f64>,
    pub owner: Option<f64>,
    pub q: Option<f64>,
    pub r: Option<f64>,
    pub hp: Option<f64>,
    pub hp_max: Option<f64>,
    pub mp: Option<f64>,
    pub mp_max: Option<f64>,
    pub ap: Option<f64>,
    pub ap_max: Option<f64>,
    pub armor_points: Option<f64>,
    pub armor_class: Option<String>,
    pub resists: BTreeMap<String, f64>,
    pub squad_alive: Option<f64>,
    pub squad_size: Option<f64>,
    pub abilities: Vec<String>,
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Rounds to the nearest integer, saturating at the `i32` bounds.
fn integer(value: Option<f64>) -> Option<i32> {
    finite(value).map(|v| v.round().clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32)
}

/// Like [`integer`] but clamped at zero from below.
fn count(value: Option<f64>) -> Option<i32> {
    integer(value).map(|v| v.max(0))
}

fn unsigned(value: Option<f64>) -> u32 {
    count(value).map_or(0, |v| v.unsigned_abs())
}

/// Builds a meter from a current/max pair.
///
/// A missing maximum falls back to the current value; a missing current
/// value means "full".
fn meter(current: Option<f64>, maximum: Option<f64>) -> ResourceMeter {
    let current = count(current);
    let maximum = count(maximum).or(current).unwrap_or(0);
    ResourceMeter::new(current.unwrap_or(maximum), maximum)
}

/// Converts a record into a [`Unit`] with safe defaults.
pub fn normalize_unit(record: &UnitRecord) -> Unit {
    let position = Hex::new(integer(record.q).unwrap_or(0), integer(record.r).unwrap_or(0));
    let mut unit = Unit::new(UnitId(unsigned(record.id)), Owner(unsigned(record.owner)), position);

    unit.hp = meter(record.hp, record.hp_max);
    unit.mp = meter(record.mp, record.mp_max);
    unit.ap = meter(record.ap, record.ap_max);
    unit.armor_points = count(record.armor_points).unwrap_or(0);
    unit.armor_class = record
        .armor_class
        .as_deref()
        .and_then(|class| class.trim().parse::<ArmorClass>().ok())
        .unwrap_or_default();

    for (name, value) in &record.resists {
        let Ok(damage_type) = name.trim().parse::<DamageType>() else {
            continue;
        };
        if let Some(points) = integer(Some(*value)) {
            unit.resists.insert(damage_type, points);
        }
    }

    if record.squad_size.is_some() || record.squad_alive.is_some() {
        let size = unsigned(record.squad_size);
        let alive = finite(record.squad_alive).map_or(size, |_| unsigned(record.squad_alive));
        unit.squad = Some(Squad { alive, size });
    }

    unit.abilities = record
        .abilities
        .iter()
        .map(|ability| ability.trim())
        .filter(|ability| !ability.is_empty())
        .map(str::to_string)
        .collect();

    unit
}
