//! Immutable effect definitions.

use super::modifier::Modifier;
use super::params::EffectParams;
use super::tick::TickSpec;

/// What an effect attaches to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetKind {
    #[default]
    Unit,
    Hex,
}

/// Rule governing reapplication of an already-active effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StackingPolicy {
    /// Reset the duration, keep a single stack unless told otherwise.
    #[default]
    Refresh,
    /// Add stacks up to the maximum and reset the duration.
    Stack,
    /// Leave the existing instance untouched.
    Ignore,
}

/// Effect definition as authored in content.
///
/// `base_duration <= 0` marks a permanently infinite effect. That property
/// belongs to the definition: instances never decide it on their own.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectDefinition {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub target: TargetKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub base_duration: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stacking: StackingPolicy,
    #[cfg_attr(feature = "serde", serde(default = "default_max_stacks"))]
    pub max_stacks: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub modifiers: Vec<Modifier>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ticks: Vec<TickSpec>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub params: EffectParams,
}

#[cfg(feature = "serde")]
fn default_max_stacks() -> u32 {
    1
}

impl EffectDefinition {
    /// Creates a unit-targeted, refresh-policy definition with a single stack.
    pub fn new(id: impl Into<String>, base_duration: i32) -> Self {
        Self {
            id: id.into(),
            target: TargetKind::Unit,
            base_duration,
            stacking: StackingPolicy::Refresh,
            max_stacks: 1,
            modifiers: Vec::new(),
            ticks: Vec::new(),
            params: EffectParams::default(),
        }
    }

    pub fn with_target(mut self, target: TargetKind) -> Self {
        self.target = target;
        self
    }

    pub fn with_stacking(mut self, stacking: StackingPolicy, max_stacks: u32) -> Self {
        self.stacking = stacking;
        self.max_stacks = max_stacks;
        self
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.push(modifier);
        self
    }

    pub fn with_tick(mut self, tick: TickSpec) -> Self {
        self.ticks.push(tick);
        self
    }

    pub fn with_params(mut self, params: EffectParams) -> Self {
        self.params = params;
        self
    }

    /// True when the definition never expires on its own.
    pub fn is_infinite(&self) -> bool {
        self.base_duration <= 0
    }

    /// Upper stack bound; a malformed `0` is treated as 1.
    pub fn stack_cap(&self) -> u32 {
        self.max_stacks.max(1)
    }

    /// Clamps a stack count into `[1, max_stacks]`.
    pub fn clamp_stacks(&self, stacks: u32) -> u32 {
        stacks.clamp(1, self.stack_cap())
    }
}
