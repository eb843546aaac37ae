//! Topic-based event bus for match events.
//!
//! Events are published to specific topics, and consumers subscribe only to
//! the topics they need (e.g. a network broadcaster to everything, a combat
//! log to [`Topic::Combat`]).

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{CombatEvent, EffectApplied, EffectTarget, TurnEvent};
