//! World-level hex effect container.

use std::collections::BTreeMap;

use crate::effects::EffectInstance;

use super::common::Hex;

/// Hex effect buckets keyed by the textual `"q,r"` coordinate.
///
/// Each bucket is exclusively owned by the world at that coordinate. A
/// `BTreeMap` keeps iteration order identical on every replica.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct WorldEffects {
    buckets: BTreeMap<String, Vec<EffectInstance>>,
}

impl WorldEffects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bucket(&self, at: Hex) -> &[EffectInstance] {
        self.buckets.get(&at.key()).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn bucket_mut(&mut self, at: Hex) -> &mut Vec<EffectInstance> {
        self.buckets.entry(at.key()).or_default()
    }

    /// Iterates non-empty buckets whose key parses as a coordinate.
    pub fn iter(&self) -> impl Iterator<Item = (Hex, &[EffectInstance])> {
        self.buckets
            .iter()
            .filter_map(|(key, bucket)| Some((Hex::from_key(key)?, bucket.as_slice())))
    }

    /// Drops buckets left empty by cleanup.
    pub fn prune(&mut self) {
        self.buckets.retain(|_, bucket| !bucket.is_empty());
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}
