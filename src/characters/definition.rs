//! Character, action and map definitions: the static data a match is
//! built from.
//!
//! Definitions never change during play. Runtime state lives in
//! [`Character`](super::Character).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::Board;
use crate::core::ActionClass;
use crate::dice::Magnitude;
use crate::effects::Effect;
use crate::error::DataError;

/// One action on a character sheet.
///
/// ## Example
///
/// ```
/// use skirmish::characters::ActionDefinition;
/// use skirmish::effects::Effect;
///
/// let shield = ActionDefinition::new("Slimey shield")
///     .with_effect(Effect::heal(2))
///     .with_effect(Effect::Shield { amount: 3 })
///     .with_cooldown(4);
///
/// assert!(shield.targeted_effect().is_some());
/// assert_eq!(shield.cooldown, 4);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionDefinition {
    /// Display name.
    pub name: String,

    /// Effects in resolution order.
    /// SmallVec: most actions carry one or two effects.
    pub effects: SmallVec<[Effect; 2]>,

    /// Turns the action is unavailable after use.
    #[serde(default)]
    pub cooldown: u32,
}

impl ActionDefinition {
    /// Create an action with no effects.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            effects: SmallVec::new(),
            cooldown: 0,
        }
    }

    /// Append an effect.
    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Set the cooldown.
    #[must_use]
    pub fn with_cooldown(mut self, turns: u32) -> Self {
        self.cooldown = turns;
        self
    }

    /// The single effect that waits for a choice, if any.
    #[must_use]
    pub fn targeted_effect(&self) -> Option<&Effect> {
        self.effects.iter().find(|e| e.is_targeted())
    }

    /// Which slot budget the action draws from.
    #[must_use]
    pub fn class(&self) -> ActionClass {
        if self.effects.iter().any(Effect::is_movement) {
            ActionClass::Movement
        } else {
            ActionClass::Action
        }
    }

    /// Check structural rules for an action owned by `character`.
    pub fn validate(&self, character: &str, key: &str) -> Result<(), DataError> {
        if self.effects.iter().filter(|e| e.is_targeted()).count() > 1 {
            return Err(DataError::MultipleTargetedEffects {
                character: character.to_string(),
                action: key.to_string(),
            });
        }
        let zero_targets = self.effects.iter().any(|e| {
            matches!(
                e,
                Effect::Attack { max_targets: 0, .. } | Effect::Heal { max_targets: 0, .. }
            )
        });
        if zero_targets {
            return Err(DataError::ZeroTargets {
                character: character.to_string(),
                action: key.to_string(),
            });
        }
        Ok(())
    }
}

/// A character sheet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterDefinition {
    /// Lookup key in the data table.
    pub key: String,

    /// Display name.
    pub name: String,

    /// Flavour class, e.g. "Slime".
    #[serde(default)]
    pub class: String,

    /// Flavour rarity.
    #[serde(default)]
    pub rarity: String,

    /// Token color. Cosmetic only; teams decide allegiance.
    #[serde(default)]
    pub color: String,

    /// Starting and maximum hit points.
    pub hp: i32,

    /// Initiative roll, kept for ordering rosters by initiative.
    #[serde(default)]
    pub initiative: Magnitude,

    /// Actions by key, in key order.
    #[serde(default)]
    pub actions: BTreeMap<String, ActionDefinition>,
}

impl CharacterDefinition {
    /// Create a character sheet with no actions.
    pub fn new(key: impl Into<String>, name: impl Into<String>, hp: i32) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            class: String::new(),
            rarity: String::new(),
            color: String::new(),
            hp,
            initiative: Magnitude::Flat(0),
            actions: BTreeMap::new(),
        }
    }

    /// Set the class.
    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    /// Set the rarity.
    #[must_use]
    pub fn with_rarity(mut self, rarity: impl Into<String>) -> Self {
        self.rarity = rarity.into();
        self
    }

    /// Set the token color.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Set the initiative roll.
    #[must_use]
    pub fn with_initiative(mut self, initiative: impl Into<Magnitude>) -> Self {
        self.initiative = initiative.into();
        self
    }

    /// Add an action under `key`, replacing any previous one.
    #[must_use]
    pub fn with_action(mut self, key: impl Into<String>, action: ActionDefinition) -> Self {
        self.actions.insert(key.into(), action);
        self
    }

    /// Check hp and every action.
    pub fn validate(&self) -> Result<(), DataError> {
        if self.hp <= 0 {
            return Err(DataError::InvalidHp {
                character: self.key.clone(),
                hp: self.hp,
            });
        }
        for (key, action) in &self.actions {
            action.validate(&self.key, key)?;
        }
        Ok(())
    }
}

/// A named map layout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapDefinition {
    /// Lookup key in the data table.
    pub key: String,

    /// Display name.
    pub name: String,

    /// Cell codes row by row: 0 open, 1 obstacle.
    pub rows: Vec<Vec<u8>>,
}

impl MapDefinition {
    /// Create a map definition.
    pub fn new(key: impl Into<String>, name: impl Into<String>, rows: Vec<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            rows,
        }
    }

    /// Build the board.
    pub fn to_board(&self) -> Result<Board, DataError> {
        Board::from_rows(&self.rows).map_err(|source| DataError::Board {
            map: self.key.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_class() {
        let step = ActionDefinition::new("Move").with_effect(Effect::movement(3));
        let hit = ActionDefinition::new("Sword").with_effect(Effect::attack(2));
        let dash = ActionDefinition::new("Dash")
            .with_effect(Effect::MoveBonus { amount: 2 })
            .with_effect(Effect::movement(1));
        assert_eq!(step.class(), ActionClass::Movement);
        assert_eq!(hit.class(), ActionClass::Action);
        assert_eq!(dash.class(), ActionClass::Movement);
    }

    #[test]
    fn test_two_targeted_effects_rejected() {
        let bad = ActionDefinition::new("Lunge")
            .with_effect(Effect::movement(2))
            .with_effect(Effect::attack(3));
        assert!(matches!(
            bad.validate("ridder", "special"),
            Err(DataError::MultipleTargetedEffects { .. })
        ));
    }

    #[test]
    fn test_zero_targets_rejected() {
        let bad = ActionDefinition::new("Nothing").with_effect(Effect::attack(1).with_max_targets(0));
        assert!(matches!(bad.validate("x", "a"), Err(DataError::ZeroTargets { .. })));
    }

    #[test]
    fn test_character_validation() {
        let ok = CharacterDefinition::new("slime", "Slime", 10)
            .with_action("action1", ActionDefinition::new("Slime").with_effect(Effect::attack(1)));
        assert!(ok.validate().is_ok());

        let dead = CharacterDefinition::new("ghost", "Ghost", 0);
        assert!(matches!(dead.validate(), Err(DataError::InvalidHp { hp: 0, .. })));
    }

    #[test]
    fn test_character_json_defaults() {
        let def: CharacterDefinition = serde_json::from_str(
            r#"{
                "key": "slime",
                "name": "Slime",
                "hp": 10,
                "initiative": "1d20",
                "actions": {
                    "movement": {"name": "Move", "effects": [{"kind": "movement", "distance": "1d4"}]}
                }
            }"#,
        )
        .unwrap();
        assert_eq!(def.class, "");
        assert_eq!(def.initiative, Magnitude::dice("1d20").unwrap());
        assert_eq!(def.actions["movement"].cooldown, 0);
    }

    #[test]
    fn test_map_to_board() {
        let map = MapDefinition::new("tiny", "Tiny", vec![vec![0, 1], vec![0, 0]]);
        assert_eq!(map.to_board().unwrap().width(), 2);

        let ragged = MapDefinition::new("bad", "Bad", vec![vec![0, 1], vec![0]]);
        assert!(matches!(ragged.to_board(), Err(DataError::Board { .. })));
    }
}
