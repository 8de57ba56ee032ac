//! Characters in play: runtime combat state.
//!
//! A `Character` is created from a [`CharacterDefinition`] when a match is
//! built and then tracks everything that changes: hit points, position,
//! buffs, cooldowns and statuses.
//!
//! ## Buff lifetimes
//!
//! - `shield` is permanent until the character is hit
//! - `advantage` / `disadvantage` last until the next attack lands
//! - `attack_bonus` / `move_bonus` are consumed by the next attack / move
//! - statuses count down at turn boundaries

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::definition::{ActionDefinition, CharacterDefinition};
use crate::board::Pos;
use crate::core::{CharacterId, TeamId};

/// A named timed status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEffect {
    /// Status payload. Its meaning is up to whoever reads it.
    pub value: i32,
    /// Turn boundaries left before it expires.
    pub remaining_turns: u32,
}

/// A character in a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    /// Roster ID.
    pub id: CharacterId,

    /// Team. Characters on the same team are allies.
    pub team: TeamId,

    /// Data table key of the definition.
    pub key: String,

    /// Display name.
    pub name: String,

    /// Flavour class.
    pub class: String,

    /// Token color.
    pub color: String,

    pub hp: i32,
    pub max_hp: i32,
    pub pos: Pos,

    /// Actions by key.
    pub actions: BTreeMap<String, ActionDefinition>,

    pub shield: i32,
    pub advantage: bool,
    pub disadvantage: bool,
    pub attack_bonus: i32,
    pub move_bonus: i32,

    /// Active statuses by name.
    pub statuses: BTreeMap<String, StatusEffect>,

    /// Remaining cooldown turns by action key. Absent means ready.
    #[serde(default)]
    cooldowns: FxHashMap<String, u32>,

    /// Set when hp drops to 0 or below. Defeated characters are skipped in
    /// turn order and cannot be targeted.
    pub defeated: bool,
}

impl Character {
    /// Create a character from its sheet.
    #[must_use]
    pub fn from_definition(id: CharacterId, team: TeamId, def: &CharacterDefinition, pos: Pos) -> Self {
        Self {
            id,
            team,
            key: def.key.clone(),
            name: def.name.clone(),
            class: def.class.clone(),
            color: def.color.clone(),
            hp: def.hp,
            max_hp: def.hp,
            pos,
            actions: def.actions.clone(),
            shield: 0,
            advantage: false,
            disadvantage: false,
            attack_bonus: 0,
            move_bonus: 0,
            statuses: BTreeMap::new(),
            cooldowns: FxHashMap::default(),
            defeated: false,
        }
    }

    /// Has this character not been defeated?
    #[must_use]
    pub fn is_alive(&self) -> bool {
        !self.defeated
    }

    /// Look up an action by key.
    #[must_use]
    pub fn action(&self, key: &str) -> Option<&ActionDefinition> {
        self.actions.get(key)
    }

    // === Cooldowns ===

    /// Turns until `key` can be used again. Zero means ready.
    #[must_use]
    pub fn cooldown(&self, key: &str) -> u32 {
        self.cooldowns.get(key).copied().unwrap_or(0)
    }

    /// Is `key` a known action that is off cooldown?
    #[must_use]
    pub fn is_ready(&self, key: &str) -> bool {
        self.actions.contains_key(key) && self.cooldown(key) == 0
    }

    /// Keys of ready actions, in key order.
    pub fn ready_actions(&self) -> impl Iterator<Item = &str> {
        self.actions
            .keys()
            .map(String::as_str)
            .filter(move |key| self.cooldown(key) == 0)
    }

    /// Put `key` on its cooldown.
    pub fn start_cooldown(&mut self, key: &str) {
        let turns = self.actions.get(key).map_or(0, |a| a.cooldown);
        if turns > 0 {
            self.cooldowns.insert(key.to_string(), turns);
        }
    }

    /// Count every cooldown down by one, floored at zero.
    pub fn tick_cooldowns(&mut self) {
        self.cooldowns.retain(|_, turns| {
            *turns = turns.saturating_sub(1);
            *turns > 0
        });
    }

    // === Statuses ===

    /// Attach a status, replacing one with the same name.
    pub fn apply_status(&mut self, name: impl Into<String>, value: i32, duration: u32) {
        self.statuses.insert(
            name.into(),
            StatusEffect {
                value,
                remaining_turns: duration,
            },
        );
    }

    /// Count statuses down by one and drop the ones that reach zero.
    ///
    /// Returns the names of expired statuses.
    pub fn expire_statuses(&mut self) -> Vec<String> {
        let mut expired = Vec::new();
        self.statuses.retain(|name, status| {
            status.remaining_turns = status.remaining_turns.saturating_sub(1);
            if status.remaining_turns == 0 {
                expired.push(name.clone());
                false
            } else {
                true
            }
        });
        expired
    }

    /// Does the character carry a status with this name?
    #[must_use]
    pub fn has_status(&self, name: &str) -> bool {
        self.statuses.contains_key(name)
    }

    // === Combat ===

    /// Consume the pending attack bonus.
    pub fn take_attack_bonus(&mut self) -> i32 {
        std::mem::take(&mut self.attack_bonus)
    }

    /// Consume the pending move bonus.
    pub fn take_move_bonus(&mut self) -> i32 {
        std::mem::take(&mut self.move_bonus)
    }

    /// Apply an incoming hit. The shield absorbs damage without being used
    /// up. Returns the damage actually dealt.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let dealt = (amount - self.shield).max(0);
        self.hp -= dealt;
        if self.hp <= 0 {
            self.defeated = true;
        }
        dealt
    }

    /// Restore hit points, optionally capped at max HP. Returns the amount
    /// actually restored.
    ///
    /// A negative roll restores nothing; healing never lowers hp.
    pub fn heal(&mut self, amount: i32, clamp: bool) -> i32 {
        let before = self.hp;
        self.hp += amount.max(0);
        if clamp {
            self.hp = self.hp.min(self.max_hp).max(before);
        }
        self.hp - before
    }
}
