//! Core engine types: character ids, teams, state, commands, RNG, configuration.
//!
//! This module contains the building blocks shared by every rule module.
//! Rule variations are expressed through `MatchConfig` rather than by
//! modifying the core.

pub mod entity;
pub mod team;
pub mod rng;
pub mod config;
pub mod action;
pub mod state;

pub use entity::CharacterId;
pub use team::TeamId;
pub use rng::{GameRng, GameRngState};
pub use config::{MatchConfig, SlotPolicy};
pub use action::{ActionRecord, Command};
pub use state::{ActionClass, MatchState, PendingAction, PendingKind, Phase};
