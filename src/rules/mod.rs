//! Rules: the engine trait and the turn controller.
//!
//! Variants implement `RulesEngine` to define:
//! - Available actions and targets for a match state
//! - How commands modify state
//! - Win conditions
//!
//! `TurnController` owns slot accounting and turn rotation so every variant
//! rotates turns the same way.

pub mod engine;
pub mod turn;

pub use engine::{MatchResult, Outcome, RulesEngine, Targets};
pub use turn::TurnController;
