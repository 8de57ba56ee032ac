//! Read-only views for a render collaborator.

use serde::Serialize;

use super::game::Skirmish;
use crate::board::Pos;
use crate::core::{CharacterId, MatchState, TeamId};
use crate::rules::{RulesEngine, Targets};

/// One character as a renderer sees it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CharacterView {
    pub id: CharacterId,
    pub name: String,
    pub team: TeamId,
    pub color: String,
    pub hp: i32,
    pub max_hp: i32,
    pub shield: i32,
    pub pos: Pos,
    pub defeated: bool,
}

/// Every character in turn order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RosterView {
    pub characters: Vec<CharacterView>,
}

impl RosterView {
    #[must_use]
    pub fn from_state(state: &MatchState) -> Self {
        let characters = state
            .roster()
            .iter()
            .map(|c| CharacterView {
                id: c.id,
                name: c.name.clone(),
                team: c.team,
                color: c.color.clone(),
                hp: c.hp,
                max_hp: c.max_hp,
                shield: c.shield,
                pos: c.pos,
                defeated: c.defeated,
            })
            .collect();
        Self { characters }
    }

    /// The character standing on `pos`, defeated ones excluded.
    #[must_use]
    pub fn at(&self, pos: Pos) -> Option<&CharacterView> {
        self.characters.iter().find(|c| c.pos == pos && !c.defeated)
    }
}

/// One entry of the active character's action bar.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ActionView {
    pub key: String,
    pub name: String,
    /// Turns until usable. Zero means ready.
    pub cooldown: u32,
    /// Would `UseAction` with this key be accepted right now?
    pub available: bool,
}

/// The active character's turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnView {
    pub turn_number: u32,
    pub active: CharacterId,
    pub remaining_slots: u8,
    /// Is a targeted action waiting for a choice?
    pub awaiting_target: bool,
    pub actions: Vec<ActionView>,
    pub targets: Targets,
}

impl TurnView {
    #[must_use]
    pub fn from_state(game: &Skirmish, state: &MatchState) -> Self {
        let available = game.available_actions(state);
        let actor = state.active();
        let actions = actor
            .actions
            .iter()
            .map(|(key, action)| ActionView {
                key: key.clone(),
                name: action.name.clone(),
                cooldown: actor.cooldown(key),
                available: available.contains(key),
            })
            .collect();

        Self {
            turn_number: state.turn_number,
            active: actor.id,
            remaining_slots: state.remaining_slots(game.config()),
            awaiting_target: state.pending().is_some(),
            actions,
            targets: game.selectable_targets(state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Command;
    use crate::games::skirmish::SkirmishBuilder;

    #[test]
    fn test_roster_view() {
        let (game, state) = SkirmishBuilder::new().build(1).unwrap();
        let view = game.roster_view(&state);
        assert_eq!(view.characters.len(), 3);
        assert_eq!(view.characters[0].name, "Slime");
        assert_eq!(view.characters[0].color, "#77dd77");
        assert_eq!(view.at(Pos::new(6, 4)).map(|c| c.id), Some(CharacterId(1)));
        assert!(view.at(Pos::new(5, 4)).is_none());
    }

    #[test]
    fn test_turn_view_tracks_cooldowns() {
        let (mut game, mut state) = SkirmishBuilder::new().build(1).unwrap();
        let view = game.turn_view(&state);
        assert_eq!(view.active, CharacterId(0));
        assert_eq!(view.remaining_slots, 2);
        assert!(view.actions.iter().all(|a| a.available));

        game.apply(&mut state, &Command::use_action("special")).unwrap();
        game.apply(&mut state, &Command::Cancel).unwrap();
        let view = game.turn_view(&state);
        let special = view.actions.iter().find(|a| a.key == "special").unwrap();
        assert_eq!(special.cooldown, 4);
        assert!(!special.available);
        assert_eq!(view.remaining_slots, 2);
    }

    #[test]
    fn test_turn_view_pending_targets() {
        let (mut game, mut state) = SkirmishBuilder::new().build(1).unwrap();
        game.apply(&mut state, &Command::use_action("movement")).unwrap();
        let view = game.turn_view(&state);
        assert!(view.awaiting_target);
        assert!(view.actions.iter().all(|a| !a.available));
        match view.targets {
            Targets::Cells(cells) => assert!(!cells.is_empty()),
            other => panic!("unexpected targets {other:?}"),
        }
    }
}
