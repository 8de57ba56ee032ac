//! Game implementations built on the engine.
//!
//! - `skirmish`: the turn-based tactical skirmish over a data table

pub mod skirmish;
