//! Rules engine trait for skirmish variants.
//!
//! A rules engine decides:
//! - Which actions and targets are available right now
//! - How a command changes the match
//! - When the match is over

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::Pos;
use crate::core::{CharacterId, Command, MatchConfig, MatchState, TeamId};
use crate::error::ActionError;

/// Result of a finished match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchResult {
    /// Exactly one team has living characters.
    Victory(TeamId),
    /// Nobody is left standing.
    Draw,
}

impl MatchResult {
    /// Check if a team won.
    #[must_use]
    pub fn is_winner(&self, team: TeamId) -> bool {
        matches!(self, MatchResult::Victory(t) if *t == team)
    }
}

/// What an accepted command led to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// A targeted action waits for a cell or target choice.
    AwaitingTarget,
    /// The action resolved and the same character acts again.
    Resolved { remaining_slots: u8 },
    /// The pending targeted action was abandoned.
    Cancelled,
    /// The turn passed to `next`.
    TurnEnded { next: CharacterId },
    /// The command finished the match.
    MatchOver(MatchResult),
}

/// The choices open to the controller of a pending targeted action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Targets {
    /// Nothing is pending.
    None,
    /// Destination cells for a movement.
    Cells(Vec<Pos>),
    /// Characters for an attack or heal, up to `max_targets` at once.
    Characters {
        candidates: SmallVec<[CharacterId; 4]>,
        max_targets: u32,
    },
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `apply` must reject without changing state, and must be deterministic
///   given the state's RNG
/// - `is_terminal` returns `None` while the match continues
pub trait RulesEngine {
    /// Get the rule configuration.
    fn config(&self) -> &MatchConfig;

    /// Keys of the active character's actions that are off cooldown and fit
    /// the slot policy. Empty while a targeted action is pending.
    fn available_actions(&self, state: &MatchState) -> Vec<String>;

    /// The pending targeted action's choices.
    fn selectable_targets(&self, state: &MatchState) -> Targets;

    /// Apply a command for the active character.
    fn apply(&mut self, state: &mut MatchState, command: &Command) -> Result<Outcome, ActionError>;

    /// Check if the match is over.
    fn is_terminal(&self, state: &MatchState) -> Option<MatchResult>;

    // === Convenience Methods ===

    /// Enumerate every command `apply` would currently accept.
    ///
    /// Target selections are enumerated one target at a time.
    fn legal_commands(&self, state: &MatchState) -> Vec<Command> {
        if self.is_terminal(state).is_some() {
            return Vec::new();
        }

        let mut commands: Vec<Command> = match self.selectable_targets(state) {
            Targets::None => self
                .available_actions(state)
                .into_iter()
                .map(Command::UseAction)
                .collect(),
            Targets::Cells(cells) => cells.into_iter().map(Command::SelectCell).collect(),
            Targets::Characters { candidates, .. } => candidates
                .into_iter()
                .map(|id| Command::select_targets(&[id]))
                .collect(),
        };

        if state.pending().is_some() {
            commands.push(Command::Cancel);
        }
        commands.push(Command::SkipTurn);
        commands
    }
}
