//! Turn-boundary orchestration.
//!
//! The [`TurnController`] sequences effect maintenance at the start and end of
//! an owner's turn. It is the only place that knows the order in which
//! resets, passive grants, ticks, decrements and cleanup happen.

mod turns;

pub use turns::{EffectHolder, ExpiredEffect, TurnController, TurnReport};
