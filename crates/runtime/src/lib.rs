//! Match orchestration for the deterministic tactics rules.
//!
//! This crate wires the pure rules of `tactics-core` to owned match state.
//! Consumers embed a [`MatchSession`] to drive turns and actions, subscribe to
//! its [`EventBus`], and compare [`EventJournal`] fingerprints across replicas.
//!
//! Modules are organized by responsibility:
//! - [`session`] owns match state and sequences the core calls
//! - [`events`] provides the topic-based event bus
//! - [`journal`] keeps the ordered event stream and its fingerprint
pub mod error;
pub mod events;
pub mod journal;
pub mod session;

pub use error::{Result, RuntimeError};
pub use events::{CombatEvent, EffectApplied, EffectTarget, Event, EventBus, Topic, TurnEvent};
pub use journal::EventJournal;
pub use session::{AttackReport, MatchSession};
