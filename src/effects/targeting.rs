//! Effect targeting.
//!
//! - `TargetSpec`: who an attack or heal may hit and how many
//! - `TargetSelector`: finds candidates in a match and validates a choice
//!
//! Candidates are always listed in roster order.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::Effect;
use crate::core::{CharacterId, MatchState};

/// Which side a targeted effect reaches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Disposition {
    /// Living characters on other teams.
    Enemy,
    /// Living characters on the actor's team, excluding the actor.
    Ally,
}

/// Targeting rules for an attack or heal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSpec {
    pub disposition: Disposition,
    /// Maximum Manhattan distance from the actor.
    pub range: u32,
    /// Maximum number of targets in one confirmation.
    pub max_targets: u32,
}

impl TargetSpec {
    /// Enemies within `range`.
    #[must_use]
    pub fn enemies(range: u32) -> Self {
        Self {
            disposition: Disposition::Enemy,
            range,
            max_targets: 1,
        }
    }

    /// Allies within `range`.
    #[must_use]
    pub fn allies(range: u32) -> Self {
        Self {
            disposition: Disposition::Ally,
            range,
            max_targets: 1,
        }
    }

    /// Allow up to `count` targets.
    #[must_use]
    pub fn with_max_targets(mut self, count: u32) -> Self {
        self.max_targets = count;
        self
    }

    /// Targeting rules of an attack or heal effect, if it has any.
    #[must_use]
    pub fn for_effect(effect: &Effect) -> Option<Self> {
        match effect {
            Effect::Attack { range, max_targets, .. } => {
                Some(Self::enemies(*range).with_max_targets(*max_targets))
            }
            Effect::Heal { range, max_targets, .. } => {
                Some(Self::allies(*range).with_max_targets(*max_targets))
            }
            _ => None,
        }
    }
}

/// Selector for finding and checking targets of one actor.
#[derive(Clone, Debug)]
pub struct TargetSelector {
    spec: TargetSpec,
    actor: CharacterId,
}

impl TargetSelector {
    /// Create a new target selector.
    #[must_use]
    pub fn new(spec: TargetSpec, actor: CharacterId) -> Self {
        Self { spec, actor }
    }

    /// The rules this selector applies.
    #[must_use]
    pub fn spec(&self) -> &TargetSpec {
        &self.spec
    }

    /// All characters the actor may currently target, in roster order.
    #[must_use]
    pub fn valid_targets(&self, state: &MatchState) -> SmallVec<[CharacterId; 4]> {
        let Some(actor) = state.character(self.actor) else {
            return SmallVec::new();
        };
        let origin = actor.pos;
        let pool = match self.spec.disposition {
            Disposition::Enemy => state.enemies_of(self.actor),
            Disposition::Ally => state.allies_of(self.actor),
        };
        pool.into_iter()
            .filter(|&id| {
                state
                    .character(id)
                    .is_some_and(|c| origin.distance(c.pos) <= self.spec.range)
            })
            .collect()
    }

    /// Check a selection against a candidate list.
    ///
    /// Valid selections are non-empty, contain no duplicates, stay within
    /// `max_targets` and only name candidates.
    #[must_use]
    pub fn validate_selection(&self, candidates: &[CharacterId], selected: &[CharacterId]) -> bool {
        validate_choice(candidates, selected, self.spec.max_targets)
    }
}

/// Check a target choice: non-empty, distinct, at most `max_targets`, all
/// drawn from `candidates`.
#[must_use]
pub fn validate_choice(candidates: &[CharacterId], selected: &[CharacterId], max_targets: u32) -> bool {
    if selected.is_empty() || selected.len() > max_targets as usize {
        return false;
    }
    let distinct = selected
        .iter()
        .enumerate()
        .all(|(i, id)| !selected[..i].contains(id));
    distinct && selected.iter().all(|id| candidates.contains(id))
}

/// The first living enemy of `actor` in roster order.
///
/// Push and pull effects displace this character.
#[must_use]
pub fn first_enemy(state: &MatchState, actor: CharacterId) -> Option<CharacterId> {
    state.enemies_of(actor).first().copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, Pos};
    use crate::characters::{Character, CharacterDefinition};
    use crate::core::TeamId;

    fn state() -> MatchState {
        let def = CharacterDefinition::new("dummy", "Dummy", 10);
        let place = |i: u32, team: u8, x: i32, y: i32| {
            Character::from_definition(CharacterId(i), TeamId(team), &def, Pos::new(x, y))
        };
        MatchState::new(
            Board::new(7, 5),
            vec![
                place(0, 0, 0, 0),
                place(1, 1, 1, 0),
                place(2, 1, 3, 0),
                place(3, 0, 0, 2),
                place(4, 1, 6, 4),
            ],
            1,
        )
    }

    #[test]
    fn test_enemies_in_range() {
        let s = state();
        let selector = TargetSelector::new(TargetSpec::enemies(3), CharacterId(0));
        assert_eq!(
            selector.valid_targets(&s).as_slice(),
            &[CharacterId(1), CharacterId(2)]
        );
    }

    #[test]
    fn test_allies_exclude_self() {
        let s = state();
        let selector = TargetSelector::new(TargetSpec::allies(5), CharacterId(0));
        assert_eq!(selector.valid_targets(&s).as_slice(), &[CharacterId(3)]);

        let near = TargetSelector::new(TargetSpec::allies(1), CharacterId(0));
        assert!(near.valid_targets(&s).is_empty());
    }

    #[test]
    fn test_defeated_not_targetable() {
        let mut s = state();
        s.character_mut(CharacterId(1)).unwrap().defeated = true;
        let selector = TargetSelector::new(TargetSpec::enemies(3), CharacterId(0));
        assert_eq!(selector.valid_targets(&s).as_slice(), &[CharacterId(2)]);
        assert_eq!(first_enemy(&s, CharacterId(0)), Some(CharacterId(2)));
    }

    #[test]
    fn test_validate_selection() {
        let selector = TargetSelector::new(TargetSpec::enemies(3).with_max_targets(2), CharacterId(0));
        let candidates = [CharacterId(1), CharacterId(2), CharacterId(4)];

        assert!(selector.validate_selection(&candidates, &[CharacterId(2)]));
        assert!(selector.validate_selection(&candidates, &[CharacterId(4), CharacterId(1)]));
        assert!(!selector.validate_selection(&candidates, &[]));
        assert!(!selector.validate_selection(&candidates, &[CharacterId(1), CharacterId(1)]));
        assert!(!selector.validate_selection(&candidates, &[CharacterId(3)]));
        assert!(!selector.validate_selection(
            &candidates,
            &[CharacterId(1), CharacterId(2), CharacterId(4)]
        ));
    }

    #[test]
    fn test_spec_for_effect() {
        let spec = TargetSpec::for_effect(&Effect::attack(2).with_range(4).with_max_targets(3)).unwrap();
        assert_eq!(spec.disposition, Disposition::Enemy);
        assert_eq!((spec.range, spec.max_targets), (4, 3));
        assert_eq!(
            TargetSpec::for_effect(&Effect::heal(1)).unwrap().disposition,
            Disposition::Ally
        );
        assert!(TargetSpec::for_effect(&Effect::movement(2)).is_none());
    }

    #[test]
    fn test_first_enemy_roster_order() {
        let s = state();
        assert_eq!(first_enemy(&s, CharacterId(0)), Some(CharacterId(1)));
        assert_eq!(first_enemy(&s, CharacterId(1)), Some(CharacterId(0)));
    }
}
