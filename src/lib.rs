//! # skirmish
//!
//! A turn-based tactical skirmish engine, plus two small real-time and
//! economic simulations that share its RNG and error stack.
//!
//! ## Design Principles
//!
//! 1. **UI-Agnostic**: A renderer submits [`Command`]s and reads views back.
//!    Nothing here draws, maps keys or persists.
//!
//! 2. **Deterministic**: Every roll goes through a seeded [`GameRng`], so a
//!    seed plus a command list replays a match exactly.
//!
//! 3. **Data-Driven**: Characters, actions and maps are data in a
//!    [`DataTable`]. Actions are lists of tagged [`Effect`]s.
//!
//! 4. **Rejections Are Values**: Invalid commands return an error and leave
//!    the state untouched. Callers are free to ignore them.
//!
//! ## Modules
//!
//! - `core`: character ids, teams, state, commands, RNG, configuration
//! - `dice`: dice notation and effect magnitudes
//! - `board`: the grid, distance and reachability
//! - `characters`: definitions, runtime characters and the data table
//! - `effects`: effects, targeting and the action resolver
//! - `rules`: the `RulesEngine` trait and the turn controller
//! - `games`: the skirmish ruleset and match builder
//! - `market`: stock ticker price walk with buy/sell rules
//! - `arena`: top-down arena shooter physics
//! - `error`: error types
//!
//! ## Example
//!
//! ```
//! use skirmish::{Command, Outcome, RulesEngine, SkirmishBuilder};
//!
//! let (mut game, mut state) = SkirmishBuilder::new().build(42).unwrap();
//!
//! // The slime opens with a move.
//! assert_eq!(
//!     game.apply(&mut state, &Command::use_action("movement")),
//!     Ok(Outcome::AwaitingTarget)
//! );
//! let first = game.legal_commands(&state)[0].clone();
//! game.apply(&mut state, &first).unwrap();
//! assert_eq!(state.slots_spent(), 1);
//! ```

pub mod core;
pub mod dice;
pub mod board;
pub mod characters;
pub mod effects;
pub mod rules;
pub mod games;
pub mod market;
pub mod arena;
pub mod error;

// Re-export commonly used types
pub use crate::core::{
    CharacterId, TeamId,
    GameRng, GameRngState,
    MatchConfig, SlotPolicy,
    Command, ActionRecord,
    ActionClass, MatchState, PendingAction, PendingKind, Phase,
};

pub use crate::dice::{roll_dice, DiceExpr, Magnitude};

pub use crate::board::{reachable_cells, Board, Pos, Reachability};

pub use crate::characters::{
    ActionDefinition, CharacterDefinition, MapDefinition,
    Character, StatusEffect, DataTable,
};

pub use crate::effects::{ActionResolver, Effect, Hit, Resolution, TargetSelector, TargetSpec};

pub use crate::rules::{MatchResult, Outcome, RulesEngine, Targets, TurnController};

pub use crate::games::skirmish::{
    Skirmish, SkirmishBuilder,
    ActionView, CharacterView, RosterView, TurnView,
};

pub use crate::market::{Market, MarketConfig, Stock, Trader};

pub use crate::arena::{ArenaConfig, ArenaEvent, ArenaWorld, PlayerInput};

pub use crate::error::{ActionError, DataError, Error, Result, TradeError};
