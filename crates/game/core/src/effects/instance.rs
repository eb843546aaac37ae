//! Effect instances owned by a unit or a hex bucket.

use std::fmt;

use crate::env::{EffectDefinition, EffectParams};
use crate::state::{Owner, UnitId};

/// Identifier of an effect instance, unique within a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InstanceId(pub u64);

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fx-{}", self.0)
    }
}

/// Explicit instance id allocator.
///
/// The counter is part of match state and is threaded through every apply
/// call, so two replicas that start from the same counter value allocate the
/// same ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InstanceIds {
    next: u64,
}

impl InstanceIds {
    pub const fn new() -> Self {
        Self { next: 1 }
    }

    /// Resumes allocation after a restored match state.
    pub const fn starting_at(next: u64) -> Self {
        Self { next }
    }

    pub fn allocate(&mut self) -> InstanceId {
        let id = InstanceId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }

    pub fn peek(&self) -> u64 {
        self.next
    }
}

/// Who caused an effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectSource {
    pub unit: Option<UnitId>,
    pub faction: Option<Owner>,
}

impl EffectSource {
    pub fn unit(unit: UnitId, faction: Owner) -> Self {
        Self {
            unit: Some(unit),
            faction: Some(faction),
        }
    }

    pub fn faction(faction: Owner) -> Self {
        Self {
            unit: None,
            faction: Some(faction),
        }
    }
}

/// Live effect attached to exactly one unit or one hex bucket.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectInstance {
    pub id: InstanceId,
    pub def_id: String,
    /// Remaining turns. Values `<= 0` only mean "infinite" when the
    /// definition is infinite; otherwise the instance is expired.
    pub remaining: i32,
    pub stacks: u32,
    /// Definition params merged with the overrides of the last apply call.
    pub params: EffectParams,
    pub source: Option<EffectSource>,
    /// Disabled instances are kept but contribute nothing.
    #[cfg_attr(feature = "serde", serde(default))]
    pub disabled: bool,
}

impl EffectInstance {
    pub(crate) fn create(
        id: InstanceId,
        definition: &EffectDefinition,
        remaining: i32,
        stacks: u32,
        overrides: Option<&EffectParams>,
        source: Option<EffectSource>,
    ) -> Self {
        let params = match overrides {
            Some(overrides) => definition.params.merged(overrides),
            None => definition.params.clone(),
        };
        Self {
            id,
            def_id: definition.id.clone(),
            remaining,
            stacks: definition.clamp_stacks(stacks),
            params,
            source,
            disabled: false,
        }
    }

    pub fn is_active(&self) -> bool {
        !self.disabled
    }

    /// True once a finite instance has run out of turns.
    pub fn is_expired(&self, definition: &EffectDefinition) -> bool {
        !definition.is_infinite() && self.remaining <= 0
    }

    /// Stack count used as an integer multiplier.
    pub fn stack_factor(&self) -> i32 {
        i32::try_from(self.stacks).unwrap_or(i32::MAX)
    }
}
