//! Match state.
//!
//! ## MatchState
//!
//! Everything that changes while a skirmish is played:
//! - The roster in turn order, with each character's runtime stats
//! - Whose turn it is and how many action slots they have used
//! - The selection phase, including any pending targeted action
//! - The board, the dice RNG and the command log
//!
//! Rules live elsewhere (`rules`, `effects`). This module only offers the
//! queries and bookkeeping those rules need.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::action::{ActionRecord, Command};
use super::config::{MatchConfig, SlotPolicy};
use super::entity::CharacterId;
use super::rng::GameRng;
use super::team::TeamId;
use crate::board::{Board, Pos};
use crate::characters::Character;

/// Which slot budget an action draws from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionClass {
    /// The action contains a movement effect.
    Movement,
    /// Any other action.
    Action,
}

/// What a pending targeted action is waiting for.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PendingKind {
    /// A destination cell out of `cells`.
    Move { cells: Vec<Pos> },
    /// Up to `max_targets` enemies out of `candidates`. `magnitude` was
    /// rolled at selection and already includes any attack bonus.
    Attack {
        magnitude: i32,
        candidates: SmallVec<[CharacterId; 4]>,
        max_targets: u32,
    },
    /// Up to `max_targets` allies out of `candidates`.
    Heal {
        amount: i32,
        candidates: SmallVec<[CharacterId; 4]>,
        max_targets: u32,
    },
}

/// A targeted action whose immediate effects have resolved and which now
/// waits for a cell or target confirmation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingAction {
    /// Key of the action in the actor's table.
    pub key: String,
    /// Slot budget the action draws from once confirmed.
    pub class: ActionClass,
    /// The selection it is waiting for.
    pub kind: PendingKind,
}

/// Selection phase of the active character.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the controller to pick an action.
    #[default]
    AwaitingSelection,
    /// Waiting for a cell or target choice.
    AwaitingTarget(PendingAction),
}

/// Complete state of a skirmish.
#[derive(Clone, Debug)]
pub struct MatchState {
    roster: Vec<Character>,
    active: usize,
    slots_spent: u8,
    movement_spent: u8,

    /// Turn number (starts at 1, increments on every turn boundary).
    pub turn_number: u32,

    /// Current selection phase.
    pub phase: Phase,

    /// The arena grid.
    pub board: Board,

    /// Dice and initiative RNG.
    pub rng: GameRng,

    log: Vector<ActionRecord>,
    sequence: u32,
}

impl MatchState {
    /// Create a new match state. The first roster entry acts first.
    #[must_use]
    pub fn new(board: Board, roster: Vec<Character>, seed: u64) -> Self {
        assert!(!roster.is_empty(), "A match needs at least 1 character");
        Self {
            roster,
            active: 0,
            slots_spent: 0,
            movement_spent: 0,
            turn_number: 1,
            phase: Phase::AwaitingSelection,
            board,
            rng: GameRng::new(seed),
            log: Vector::new(),
            sequence: 0,
        }
    }

    // === Roster ===

    /// All characters in turn order, defeated ones included.
    #[must_use]
    pub fn roster(&self) -> &[Character] {
        &self.roster
    }

    /// Look up a character.
    #[must_use]
    pub fn character(&self, id: CharacterId) -> Option<&Character> {
        self.roster.get(id.index())
    }

    /// Look up a character mutably.
    pub fn character_mut(&mut self, id: CharacterId) -> Option<&mut Character> {
        self.roster.get_mut(id.index())
    }

    /// Characters that have not been defeated, in roster order.
    pub fn living(&self) -> impl Iterator<Item = &Character> {
        self.roster.iter().filter(|c| c.is_alive())
    }

    /// Teams that still have a living character, sorted.
    #[must_use]
    pub fn living_teams(&self) -> Vec<TeamId> {
        let mut teams: Vec<TeamId> = self.living().map(|c| c.team).collect();
        teams.sort_unstable();
        teams.dedup();
        teams
    }

    /// Living characters on a different team than `id`, in roster order.
    #[must_use]
    pub fn enemies_of(&self, id: CharacterId) -> SmallVec<[CharacterId; 4]> {
        let Some(me) = self.character(id) else {
            return SmallVec::new();
        };
        self.living()
            .filter(|c| c.team != me.team)
            .map(|c| c.id)
            .collect()
    }

    /// Living characters on the same team as `id`, excluding `id` itself.
    #[must_use]
    pub fn allies_of(&self, id: CharacterId) -> SmallVec<[CharacterId; 4]> {
        let Some(me) = self.character(id) else {
            return SmallVec::new();
        };
        self.living()
            .filter(|c| c.team == me.team && c.id != id)
            .map(|c| c.id)
            .collect()
    }

    /// The living character standing on `pos`, if any.
    #[must_use]
    pub fn occupant(&self, pos: Pos) -> Option<CharacterId> {
        self.living().find(|c| c.pos == pos).map(|c| c.id)
    }

    /// Can `id` end a move on `pos` without sharing it with someone else?
    #[must_use]
    pub fn is_free_for(&self, id: CharacterId, pos: Pos) -> bool {
        self.occupant(pos).map_or(true, |other| other == id)
    }

    // === Turn ===

    /// The character whose turn it is.
    #[must_use]
    pub fn active_id(&self) -> CharacterId {
        CharacterId::from_index(self.active)
    }

    /// The active character.
    #[must_use]
    pub fn active(&self) -> &Character {
        &self.roster[self.active]
    }

    /// The active character, mutably.
    pub fn active_mut(&mut self) -> &mut Character {
        &mut self.roster[self.active]
    }

    /// Action slots used this turn.
    #[must_use]
    pub fn slots_spent(&self) -> u8 {
        self.slots_spent
    }

    /// Action slots left this turn.
    #[must_use]
    pub fn remaining_slots(&self, config: &MatchConfig) -> u8 {
        config.actions_per_turn.saturating_sub(self.slots_spent)
    }

    /// Would the slot policy accept another action of `class` this turn?
    #[must_use]
    pub fn slot_available(&self, config: &MatchConfig, class: ActionClass) -> bool {
        if self.slots_spent >= config.actions_per_turn {
            return false;
        }
        match config.slot_policy {
            SlotPolicy::AnyTwo => true,
            SlotPolicy::MovementPlusAction => {
                let other_spent = self.slots_spent - self.movement_spent;
                match class {
                    ActionClass::Movement => self.movement_spent == 0,
                    ActionClass::Action => other_spent == 0,
                }
            }
        }
    }

    /// The pending targeted action, if the phase is waiting on one.
    #[must_use]
    pub fn pending(&self) -> Option<&PendingAction> {
        match &self.phase {
            Phase::AwaitingTarget(pending) => Some(pending),
            Phase::AwaitingSelection => None,
        }
    }

    pub(crate) fn spend_slot(&mut self, class: ActionClass) {
        self.slots_spent = self.slots_spent.saturating_add(1);
        if class == ActionClass::Movement {
            self.movement_spent = self.movement_spent.saturating_add(1);
        }
    }

    /// Hand the turn to the character at `index` with a fresh slot budget.
    pub(crate) fn begin_turn(&mut self, index: usize) {
        self.active = index % self.roster.len();
        self.slots_spent = 0;
        self.movement_spent = 0;
        self.phase = Phase::AwaitingSelection;
        self.turn_number += 1;
        self.sequence = 0;
    }

    pub(crate) fn characters_mut(&mut self) -> &mut [Character] {
        &mut self.roster
    }

    // === Log ===

    /// Append an accepted command to the log.
    pub fn record(&mut self, command: Command) {
        let record = ActionRecord::new(self.active_id(), command, self.turn_number, self.sequence);
        self.sequence += 1;
        self.log.push_back(record);
    }

    /// The command log.
    #[must_use]
    pub fn log(&self) -> &Vector<ActionRecord> {
        &self.log
    }

    // === Cloning ===

    /// Clone the state for a what-if preview.
    ///
    /// The preview rolls from a forked RNG, so exploring it never changes
    /// what the live match will roll. Takes `&mut self` because forking
    /// advances the fork counter.
    #[must_use]
    pub fn preview(&mut self) -> Self {
        let mut copy = self.clone();
        copy.rng = self.rng.fork();
        copy
    }
}
