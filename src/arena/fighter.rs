//! Arena fighters and their per-frame input.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::ArenaConfig;

/// Index of a fighter in the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FighterId(pub u8);

impl FighterId {
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for FighterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fighter({})", self.0)
    }
}

/// One frame of controller input. Axes are clamped to `[-1, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerInput {
    pub move_x: f32,
    pub move_y: f32,
    pub attack: bool,
    pub dash: bool,
}

impl PlayerInput {
    #[must_use]
    pub fn moving(move_x: f32, move_y: f32) -> Self {
        Self {
            move_x,
            move_y,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_attack(mut self) -> Self {
        self.attack = true;
        self
    }

    #[must_use]
    pub fn with_dash(mut self) -> Self {
        self.dash = true;
        self
    }

    /// The clamped movement axes.
    #[must_use]
    pub fn axis(&self) -> Vec2 {
        Vec2::new(self.move_x.clamp(-1.0, 1.0), self.move_y.clamp(-1.0, 1.0))
    }
}

/// A player-controlled fighter.
///
/// Timers are in milliseconds and count down to zero.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Fighter {
    pub id: FighterId,
    pub name: String,
    pub color: String,
    /// Top-left corner.
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    /// Last non-zero movement direction, not normalized.
    pub facing: Vec2,
    pub speed: f32,
    pub hp: f32,
    pub max_hp: f32,
    pub attack_cooldown: f32,
    pub dash_cooldown: f32,
    pub dash_time: f32,
    pub invulnerable_time: f32,
    /// Movement multiplier from a speed pickup.
    pub speed_boost: f32,
    pub boost_time: f32,
    pub score: u32,
}

impl Fighter {
    #[must_use]
    pub fn new(id: FighterId, name: impl Into<String>, pos: Vec2, config: &ArenaConfig) -> Self {
        Self {
            id,
            name: name.into(),
            color: String::new(),
            pos,
            vel: Vec2::ZERO,
            size: Vec2::splat(config.fighter_size),
            facing: Vec2::X,
            speed: config.fighter_speed,
            hp: config.max_hp,
            max_hp: config.max_hp,
            attack_cooldown: 0.0,
            dash_cooldown: 0.0,
            dash_time: 0.0,
            invulnerable_time: 0.0,
            speed_boost: 1.0,
            boost_time: 0.0,
            score: 0,
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect {
            min: self.pos,
            size: self.size,
        }
    }

    #[must_use]
    pub fn center(&self) -> Vec2 {
        self.rect().center()
    }

    #[must_use]
    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_time > 0.0
    }

    /// Unit vector of the facing direction.
    #[must_use]
    pub fn aim(&self) -> Vec2 {
        self.facing.try_normalize().unwrap_or(Vec2::X)
    }

    /// Count every timer down by `dt`. The dash cooldown only runs once the
    /// dash itself is over.
    pub fn tick_timers(&mut self, dt: f32) {
        self.dash_time = (self.dash_time - dt).max(0.0);
        self.invulnerable_time = (self.invulnerable_time - dt).max(0.0);
        self.attack_cooldown = (self.attack_cooldown - dt).max(0.0);
        if self.dash_time <= 0.0 {
            self.dash_cooldown = (self.dash_cooldown - dt).max(0.0);
        }
        if self.boost_time > 0.0 {
            self.boost_time = (self.boost_time - dt).max(0.0);
            if self.boost_time <= 0.0 {
                self.speed_boost = 1.0;
            }
        }
    }
}
