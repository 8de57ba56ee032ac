//! Effect definitions.
//!
//! An action is an ordered list of effects. Effects come in two flavours:
//!
//! ## Targeted effects
//!
//! Need a choice from the controller before they resolve. An action holds at
//! most one of these:
//! - `Movement`: pick a destination cell
//! - `Attack`: pick enemies in range
//! - `Heal`: pick allies in range
//!
//! ## Immediate effects
//!
//! Resolve as soon as the action is selected, in definition order:
//! - `Shield`, `Advantage`, `Disadvantage`, `AttackBonus`, `MoveBonus`:
//!   buff the acting character
//! - `Status`: attach a named timed status to the acting character
//! - `Push` / `Pull`: displace the first living enemy
//! - `Pierce`: damage whoever stands on the cell to the actor's right
//! - `Destroy`: clear the obstacle under the actor

use serde::{Deserialize, Serialize};

use crate::dice::Magnitude;

fn one() -> u32 {
    1
}

/// An atomic effect of an action.
///
/// Serialized with a `kind` tag, e.g.
/// `{"kind": "attack", "damage": "1d6 +1", "range": 2}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Effect {
    // === Targeted ===

    /// Move up to `distance` cells. `jump` widens the reach and lets
    /// pathfinding cross obstacles.
    Movement {
        distance: Magnitude,
        #[serde(default)]
        jump: u32,
    },

    /// Damage up to `max_targets` enemies within `range`.
    Attack {
        damage: Magnitude,
        #[serde(default = "one")]
        range: u32,
        #[serde(default = "one")]
        max_targets: u32,
    },

    /// Heal up to `max_targets` allies within `range`.
    Heal {
        amount: Magnitude,
        #[serde(default = "one")]
        range: u32,
        #[serde(default = "one")]
        max_targets: u32,
    },

    // === Immediate ===

    /// Add to the actor's damage-absorbing shield.
    Shield { amount: i32 },

    /// Push the first enemy `tiles` cells away from the actor.
    Push { tiles: i32 },

    /// Pull the first enemy `tiles` cells towards the actor.
    Pull { tiles: i32 },

    /// Clear the obstacle on the actor's cell.
    Destroy,

    /// Attach a named status to the actor for `duration` turn boundaries.
    Status {
        name: String,
        #[serde(default)]
        value: i32,
        #[serde(default = "one")]
        duration: u32,
    },

    /// Damage whoever stands on the cell right of the actor.
    Pierce { damage: Magnitude },

    /// The actor's next attack deals +1.
    Advantage,

    /// The actor's next attack deals -1.
    Disadvantage,

    /// Add to the actor's next attack roll.
    AttackBonus { amount: i32 },

    /// Add to the actor's next movement distance.
    MoveBonus { amount: i32 },
}

impl Effect {
    /// Move a flat number of cells.
    #[must_use]
    pub fn movement(distance: impl Into<Magnitude>) -> Self {
        Self::Movement {
            distance: distance.into(),
            jump: 0,
        }
    }

    /// Single-target melee attack.
    #[must_use]
    pub fn attack(damage: impl Into<Magnitude>) -> Self {
        Self::Attack {
            damage: damage.into(),
            range: 1,
            max_targets: 1,
        }
    }

    /// Single-target adjacent heal.
    #[must_use]
    pub fn heal(amount: impl Into<Magnitude>) -> Self {
        Self::Heal {
            amount: amount.into(),
            range: 1,
            max_targets: 1,
        }
    }

    /// Timed status on the actor.
    #[must_use]
    pub fn status(name: impl Into<String>, value: i32, duration: u32) -> Self {
        Self::Status {
            name: name.into(),
            value,
            duration,
        }
    }

    /// Set the range of a targeted effect. No-op on other effects.
    #[must_use]
    pub fn with_range(mut self, new_range: u32) -> Self {
        match &mut self {
            Self::Attack { range, .. } | Self::Heal { range, .. } => *range = new_range,
            _ => {}
        }
        self
    }

    /// Set the target cap of a targeted effect. No-op on other effects.
    #[must_use]
    pub fn with_max_targets(mut self, count: u32) -> Self {
        match &mut self {
            Self::Attack { max_targets, .. } | Self::Heal { max_targets, .. } => *max_targets = count,
            _ => {}
        }
        self
    }

    /// Set the jump allowance of a movement. No-op on other effects.
    #[must_use]
    pub fn with_jump(mut self, value: u32) -> Self {
        if let Self::Movement { jump, .. } = &mut self {
            *jump = value;
        }
        self
    }

    /// Does this effect wait for a cell or target choice?
    #[must_use]
    pub fn is_targeted(&self) -> bool {
        matches!(self, Self::Movement { .. } | Self::Attack { .. } | Self::Heal { .. })
    }

    /// Is this a movement effect?
    #[must_use]
    pub fn is_movement(&self) -> bool {
        matches!(self, Self::Movement { .. })
    }

    /// Short name used in logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Movement { .. } => "movement",
            Self::Attack { .. } => "attack",
            Self::Heal { .. } => "heal",
            Self::Shield { .. } => "shield",
            Self::Push { .. } => "push",
            Self::Pull { .. } => "pull",
            Self::Destroy => "destroy",
            Self::Status { .. } => "status",
            Self::Pierce { .. } => "pierce",
            Self::Advantage => "advantage",
            Self::Disadvantage => "disadvantage",
            Self::AttackBonus { .. } => "attack_bonus",
            Self::MoveBonus { .. } => "move_bonus",
        }
    }
}
