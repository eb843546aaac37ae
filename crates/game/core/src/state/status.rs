//! Bounded, UI-facing mirror of a unit's temporary effects.

use arrayvec::ArrayVec;

use crate::config::EngineConfig;
use crate::effects::{EffectInstance, InstanceId};
use crate::env::{EffectOracle, TargetKind};

/// One visible status slot.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEntry {
    pub instance: InstanceId,
    pub def_id: String,
    pub remaining: i32,
    pub stacks: u32,
}

impl StatusEntry {
    fn from_instance(instance: &EffectInstance) -> Self {
        Self {
            instance: instance.id,
            def_id: instance.def_id.clone(),
            remaining: instance.remaining,
            stacks: instance.stacks,
        }
    }
}

/// Status slots shown to players.
///
/// Holds only temporary (finite-definition) unit effects, at most
/// [`EngineConfig::MAX_STATUS_SLOTS`] of them. Resyncing keeps the relative
/// order of entries that survive and appends newcomers at the end.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusMirror {
    entries: ArrayVec<StatusEntry, { EngineConfig::MAX_STATUS_SLOTS }>,
}

impl StatusMirror {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEntry> {
        self.entries.iter()
    }

    pub fn contains(&self, def_id: &str) -> bool {
        self.entries.iter().any(|entry| entry.def_id == def_id)
    }

    pub fn def_ids(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.def_id.as_str()).collect()
    }

    /// Rebuilds the mirror from the authoritative effect list.
    pub fn resync(&mut self, effects: &[EffectInstance], catalog: &dyn EffectOracle, cap: usize) {
        let cap = cap.min(EngineConfig::MAX_STATUS_SLOTS);
        let temporary: Vec<&EffectInstance> = effects
            .iter()
            .filter(|instance| {
                catalog.definition(&instance.def_id).is_some_and(|def| {
                    def.target == TargetKind::Unit && !def.is_infinite()
                })
            })
            .collect();

        let mut next: ArrayVec<StatusEntry, { EngineConfig::MAX_STATUS_SLOTS }> = ArrayVec::new();

        // Survivors first, in their existing order, with refreshed values.
        for entry in &self.entries {
            if next.len() >= cap {
                break;
            }
            if let Some(instance) = temporary.iter().find(|i| i.def_id == entry.def_id) {
                next.push(StatusEntry::from_instance(instance));
            }
        }

        // Newcomers in effect-list order.
        for instance in temporary {
            if next.len() >= cap {
                break;
            }
            if !next.iter().any(|entry| entry.def_id == instance.def_id) {
                next.push(StatusEntry::from_instance(instance));
            }
        }

        self.entries = next;
    }
}

/// Number of temporary unit effects currently held (the status slot usage).
pub fn temporary_count(effects: &[EffectInstance], catalog: &dyn EffectOracle) -> usize {
    effects
        .iter()
        .filter(|instance| {
            catalog
                .definition(&instance.def_id)
                .is_some_and(|def| def.target == TargetKind::Unit && !def.is_infinite())
        })
        .count()
}
