//! Application of effects with refresh / stack / ignore semantics.

use crate::env::{EffectDefinition, EffectParams, StackingPolicy};

use super::instance::{EffectInstance, EffectSource, InstanceId, InstanceIds};

/// Optional overrides for an apply call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ApplyOptions {
    /// Explicit duration; `None` uses the definition default.
    pub duration: Option<i32>,
    /// Initial stacks for new instances, replacement stacks on refresh,
    /// or the increment for the stack policy.
    pub stacks: Option<u32>,
    pub params: Option<EffectParams>,
    pub source: Option<EffectSource>,
}

impl ApplyOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn duration(mut self, duration: i32) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn stacks(mut self, stacks: u32) -> Self {
        self.stacks = Some(stacks);
        self
    }

    pub fn params(mut self, params: EffectParams) -> Self {
        self.params = Some(params);
        self
    }

    pub fn source(mut self, source: EffectSource) -> Self {
        self.source = Some(source);
        self
    }
}

/// How an apply call changed the container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ApplyChange {
    Created,
    Refreshed,
    Stacked,
    Ignored,
}

/// Successful apply result.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ApplyOutcome {
    pub instance: InstanceId,
    pub def_id: String,
    pub change: ApplyChange,
    pub remaining: i32,
    pub stacks: u32,
}

impl ApplyOutcome {
    fn of(instance: &EffectInstance, change: ApplyChange) -> Self {
        Self {
            instance: instance.id,
            def_id: instance.def_id.clone(),
            change,
            remaining: instance.remaining,
            stacks: instance.stacks,
        }
    }
}

/// Collapses a reapplication into `existing` according to the stacking policy.
pub(crate) fn reapply(
    definition: &EffectDefinition,
    existing: &mut EffectInstance,
    options: &ApplyOptions,
) -> ApplyOutcome {
    let change = match definition.stacking {
        StackingPolicy::Ignore => return ApplyOutcome::of(existing, ApplyChange::Ignored),
        StackingPolicy::Refresh => {
            if let Some(stacks) = options.stacks {
                existing.stacks = definition.clamp_stacks(stacks);
            }
            ApplyChange::Refreshed
        }
        StackingPolicy::Stack => {
            let delta = options.stacks.unwrap_or(1);
            existing.stacks = definition.clamp_stacks(existing.stacks.saturating_add(delta));
            ApplyChange::Stacked
        }
    };

    existing.remaining = match options.duration {
        Some(duration) => duration,
        None => existing.remaining.max(definition.base_duration),
    };
    if let Some(overrides) = &options.params {
        existing.params = existing.params.merged(overrides);
    }
    if options.source.is_some() {
        existing.source = options.source;
    }

    ApplyOutcome::of(existing, change)
}

/// Creates a brand-new instance and appends it to `container`.
pub(crate) fn create(
    ids: &mut InstanceIds,
    definition: &EffectDefinition,
    container: &mut Vec<EffectInstance>,
    options: &ApplyOptions,
) -> ApplyOutcome {
    let instance = EffectInstance::create(
        ids.allocate(),
        definition,
        options.duration.unwrap_or(definition.base_duration),
        options.stacks.unwrap_or(1),
        options.params.as_ref(),
        options.source,
    );
    let outcome = ApplyOutcome::of(&instance, ApplyChange::Created);
    container.push(instance);
    outcome
}
