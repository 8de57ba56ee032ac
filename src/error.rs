//! Error types.
//!
//! Each concern has its own error enum so callers can match on exactly the
//! failures a call can produce:
//!
//! - [`DiceError`]: malformed dice notation
//! - [`BoardError`]: malformed map rows
//! - [`DataError`]: invalid or duplicate character/map data
//! - [`ActionError`]: a command the rules rejected
//! - [`TradeError`]: a rejected buy or sell order on the market
//!
//! [`Error`] wraps all of them for callers that just want `?`.

use crate::board::Pos;
use crate::core::CharacterId;

/// Malformed `NdM[±K]` dice notation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DiceError {
    #[error("empty dice expression")]
    Empty,

    #[error("missing 'd' separator in {0:?}")]
    MissingSeparator(String),

    #[error("invalid dice count {0:?}")]
    InvalidCount(String),

    #[error("invalid die size {0:?}")]
    InvalidSides(String),

    #[error("dice must have at least one side")]
    ZeroSides,

    #[error("invalid modifier {0:?}")]
    InvalidModifier(String),

    #[error("too many dice: {count} (max {max})")]
    TooManyDice { count: u32, max: u32 },
}

/// Malformed map rows.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("map has no cells")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown cell code {code} at ({x}, {y})")]
    InvalidCell { x: usize, y: usize, code: u8 },
}

/// Invalid data table content.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("character {0:?} is already registered")]
    DuplicateCharacter(String),

    #[error("map {0:?} is already registered")]
    DuplicateMap(String),

    #[error("unknown character {0:?}")]
    UnknownCharacter(String),

    #[error("unknown map {0:?}")]
    UnknownMap(String),

    #[error("character {character:?} must have positive hp, got {hp}")]
    InvalidHp { character: String, hp: i32 },

    #[error("action {action:?} of {character:?} has more than one targeted effect")]
    MultipleTargetedEffects { character: String, action: String },

    #[error("action {action:?} of {character:?} has an effect that can never pick a target")]
    ZeroTargets { character: String, action: String },

    #[error("map {map:?}: {source}")]
    Board {
        map: String,
        #[source]
        source: BoardError,
    },

    #[error("starting cell {pos} for {character:?} is not walkable")]
    BlockedSpawn { character: String, pos: Pos },

    #[error("two characters start on {0}")]
    SharedSpawn(Pos),

    #[error("invalid data json: {0}")]
    Json(#[from] serde_json::Error),
}

/// A command the rules rejected. The match state is unchanged.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("the match is over")]
    MatchOver,

    #[error("{0} is defeated")]
    Defeated(CharacterId),

    #[error("no action {0:?} in the active character's table")]
    UnknownAction(String),

    #[error("action {key:?} is on cooldown for {remaining} more turns")]
    OnCooldown { key: String, remaining: u32 },

    #[error("no action slot of this kind is left this turn")]
    NoSlot,

    #[error("a targeted action is waiting for confirmation")]
    AwaitingTarget,

    #[error("no targeted action is waiting for confirmation")]
    NothingPending,

    #[error("{0} is not a valid destination")]
    InvalidCell(Pos),

    #[error("invalid target selection")]
    InvalidTargets,

    #[error("this selection does not match the pending action")]
    WrongSelection,
}

/// A rejected market order.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum TradeError {
    #[error("unknown stock {0:?}")]
    UnknownStock(String),

    #[error("unknown trader {0:?}")]
    UnknownTrader(String),

    #[error("trader {0:?} already exists")]
    DuplicateTrader(String),

    #[error("stock {0:?} already exists")]
    DuplicateStock(String),

    #[error("order quantity must be positive")]
    ZeroQuantity,

    #[error("insufficient cash: need {needed:.2}, have {available:.2}")]
    InsufficientCash { needed: f64, available: f64 },

    #[error("holding limit reached: {held} + {requested} exceeds {limit}")]
    HoldingLimit { held: u32, requested: u32, limit: u32 },

    #[error("insufficient shares: have {held}, tried to sell {requested}")]
    InsufficientShares { held: u32, requested: u32 },
}

/// Any error this crate produces.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Dice(#[from] DiceError),

    #[error(transparent)]
    Board(#[from] BoardError),

    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Action(#[from] ActionError),

    #[error(transparent)]
    Trade(#[from] TradeError),
}

/// Result alias using the crate [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
