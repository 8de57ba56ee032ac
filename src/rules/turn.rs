//! Turn controller: slot accounting and turn rotation.
//!
//! ## Turn boundary
//!
//! Every time the turn passes, in this order:
//! 1. every character's cooldowns count down by one (floored at zero)
//! 2. timed statuses count down and expire, if enabled
//! 3. the next roster index becomes active, wrapping after the last
//! 4. the slot budget and selection phase reset, the turn number grows

use tracing::{debug, info};

use crate::core::{ActionClass, CharacterId, MatchConfig, MatchState};

/// Drives turn order for a match.
pub struct TurnController;

impl TurnController {
    /// Fill one action slot for the active character.
    ///
    /// Returns true when no slot of any class is left, meaning the turn is
    /// over.
    pub fn spend_slot(state: &mut MatchState, config: &MatchConfig, class: ActionClass) -> bool {
        state.spend_slot(class);
        let over = Self::is_turn_exhausted(state, config);
        debug!(
            actor = %state.active_id(),
            spent = state.slots_spent(),
            over,
            "slot spent"
        );
        over
    }

    /// Has the active character run out of usable slots?
    #[must_use]
    pub fn is_turn_exhausted(state: &MatchState, config: &MatchConfig) -> bool {
        !state.slot_available(config, ActionClass::Movement)
            && !state.slot_available(config, ActionClass::Action)
    }

    /// Pass the turn to the next roster index, defeated or not.
    pub fn advance_turn(state: &mut MatchState, config: &MatchConfig) -> CharacterId {
        for character in state.characters_mut() {
            character.tick_cooldowns();
            if config.expire_statuses {
                for status in character.expire_statuses() {
                    debug!(character = %character.id, %status, "status expired");
                }
            }
        }

        let next = state.active_id().index() + 1;
        state.begin_turn(next);
        let active = state.active_id();
        info!(turn = state.turn_number, %active, "turn started");
        active
    }

    /// Pass the turn to the next living character.
    ///
    /// Defeated characters still get a (skipped) turn boundary each. When
    /// nobody is alive this stops after one full lap.
    pub fn advance_to_living(state: &mut MatchState, config: &MatchConfig) -> CharacterId {
        let mut active = Self::advance_turn(state, config);
        for _ in 1..state.roster().len() {
            if state.active().is_alive() {
                break;
            }
            debug!(skipped = %active, "defeated character skipped");
            active = Self::advance_turn(state, config);
        }
        active
    }
}
