//! Player commands and the match log.
//!
//! Everything a controller can do to a match is a `Command`:
//! - `UseAction` picks one of the active character's actions by key
//! - `SelectCell` / `SelectTargets` answer a pending targeted action
//! - `Cancel` abandons a pending targeted action
//! - `SkipTurn` ends the turn immediately
//!
//! Accepted commands are appended to the match log as `ActionRecord`s, which
//! together with the seed is enough to replay a match.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::entity::CharacterId;
use crate::board::Pos;

/// A command issued on behalf of the active character.
///
/// ## Example
///
/// ```
/// use skirmish::core::{Command, CharacterId};
/// use skirmish::board::Pos;
///
/// let attack = Command::use_action("action1");
/// let shoot = Command::select_targets(&[CharacterId(1), CharacterId(2)]);
/// let step = Command::SelectCell(Pos::new(2, 3));
///
/// assert!(attack.is_selection());
/// assert!(!shoot.is_selection());
/// assert!(!step.is_selection());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Start the action stored under this key.
    UseAction(String),
    /// Confirm a movement destination.
    SelectCell(Pos),
    /// Confirm attack or heal targets.
    /// SmallVec keeps the common 1-3 target case off the heap.
    SelectTargets(SmallVec<[CharacterId; 3]>),
    /// Abandon the pending targeted action.
    Cancel,
    /// End the active character's turn.
    SkipTurn,
}

impl Command {
    /// Shorthand for `Command::UseAction`.
    #[must_use]
    pub fn use_action(key: impl Into<String>) -> Self {
        Self::UseAction(key.into())
    }

    /// Shorthand for `Command::SelectTargets`.
    #[must_use]
    pub fn select_targets(targets: &[CharacterId]) -> Self {
        Self::SelectTargets(SmallVec::from_slice(targets))
    }

    /// Is this a command issued while awaiting selection?
    #[must_use]
    pub fn is_selection(&self) -> bool {
        matches!(self, Self::UseAction(_))
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UseAction(key) => write!(f, "use {key}"),
            Self::SelectCell(pos) => write!(f, "move to {pos}"),
            Self::SelectTargets(targets) => {
                write!(f, "target")?;
                for t in targets {
                    write!(f, " {t}")?;
                }
                Ok(())
            }
            Self::Cancel => write!(f, "cancel"),
            Self::SkipTurn => write!(f, "skip turn"),
        }
    }
}

/// An accepted command with metadata for the match log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The character the command was issued for.
    pub actor: CharacterId,

    /// The command.
    pub command: Command,

    /// Turn number when the command was accepted.
    pub turn: u32,

    /// Sequence number within the turn.
    pub sequence: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(actor: CharacterId, command: Command, turn: u32, sequence: u32) -> Self {
        Self {
            actor,
            command,
            turn,
            sequence,
        }
    }
}
