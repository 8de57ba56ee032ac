//! Match configuration.
//!
//! A `MatchConfig` carries every rule knob a skirmish exposes:
//! - how many action slots a turn has and how they may be spent
//! - how movement reach is computed
//! - whether timed statuses expire and whether healing caps at max HP
//!
//! Configs are plain data and load from JSON so tables of house rules can
//! live next to the character data.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::board::Reachability;

/// Restriction on which actions may fill a turn's slots.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotPolicy {
    /// Any combination of actions, up to the slot cap.
    #[default]
    AnyTwo,
    /// At most one movement action and at most one non-movement action.
    MovementPlusAction,
}

/// Rule configuration for a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Completed actions a character may take before its turn ends.
    #[serde(deserialize_with = "nonzero_slots")]
    pub actions_per_turn: u8,

    /// Which action classes may share a turn.
    pub slot_policy: SlotPolicy,

    /// How movement destinations are found.
    pub reachability: Reachability,

    /// Count down timed statuses at each turn boundary.
    pub expire_statuses: bool,

    /// Cap healing at the target's max HP.
    pub clamp_heal: bool,
}

fn nonzero_slots<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let slots = u8::deserialize(deserializer)?;
    if slots == 0 {
        return Err(D::Error::custom("actions_per_turn must be at least 1"));
    }
    Ok(slots)
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            actions_per_turn: 2,
            slot_policy: SlotPolicy::AnyTwo,
            reachability: Reachability::Radius,
            expire_statuses: true,
            clamp_heal: false,
        }
    }
}

impl MatchConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Set the number of action slots per turn.
    #[must_use]
    pub fn with_actions_per_turn(mut self, slots: u8) -> Self {
        assert!(slots > 0, "A turn needs at least 1 action slot");
        self.actions_per_turn = slots;
        self
    }

    /// Set the slot policy.
    #[must_use]
    pub fn with_slot_policy(mut self, policy: SlotPolicy) -> Self {
        self.slot_policy = policy;
        self
    }

    /// Set the reachability mode.
    #[must_use]
    pub fn with_reachability(mut self, mode: Reachability) -> Self {
        self.reachability = mode;
        self
    }

    /// Keep timed statuses forever.
    #[must_use]
    pub fn without_status_expiry(mut self) -> Self {
        self.expire_statuses = false;
        self
    }

    /// Cap healing at max HP.
    #[must_use]
    pub fn with_heal_clamp(mut self) -> Self {
        self.clamp_heal = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MatchConfig::default();
        assert_eq!(config.actions_per_turn, 2);
        assert_eq!(config.slot_policy, SlotPolicy::AnyTwo);
        assert_eq!(config.reachability, Reachability::Radius);
        assert!(config.expire_statuses);
        assert!(!config.clamp_heal);
    }

    #[test]
    fn test_builder() {
        let config = MatchConfig::new()
            .with_actions_per_turn(3)
            .with_slot_policy(SlotPolicy::MovementPlusAction)
            .with_reachability(Reachability::Pathfinding)
            .without_status_expiry()
            .with_heal_clamp();

        assert_eq!(config.actions_per_turn, 3);
        assert_eq!(config.slot_policy, SlotPolicy::MovementPlusAction);
        assert_eq!(config.reachability, Reachability::Pathfinding);
        assert!(!config.expire_statuses);
        assert!(config.clamp_heal);
    }

    #[test]
    #[should_panic(expected = "at least 1 action slot")]
    fn test_zero_slots_rejected() {
        let _ = MatchConfig::new().with_actions_per_turn(0);
    }

    #[test]
    fn test_from_json_partial() {
        let config =
            MatchConfig::from_json(r#"{"slot_policy": "movement_plus_action", "clamp_heal": true}"#)
                .unwrap();
        assert_eq!(config.slot_policy, SlotPolicy::MovementPlusAction);
        assert!(config.clamp_heal);
        assert_eq!(config.actions_per_turn, 2);
    }

    #[test]
    fn test_from_json_rejects_zero_slots() {
        let err = MatchConfig::from_json(r#"{"actions_per_turn": 0}"#).unwrap_err();
        assert!(err.to_string().contains("at least 1"));
        assert_eq!(
            MatchConfig::from_json(r#"{"actions_per_turn": 3}"#).unwrap().actions_per_turn,
            3
        );
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(MatchConfig::from_json("not json").is_err());
    }
}
