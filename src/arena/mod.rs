//! Real-time top-down arena physics.
//!
//! Up to a handful of fighters run around a walled world, shoot
//! projectiles and dash. The simulation advances in variable frames:
//! - Frame time is capped so a stall cannot tunnel fighters through walls
//! - Movement accelerates per 16 ms of frame time and decays by friction
//! - Collisions are axis-aligned rectangles only
//!
//! Rendering and key mapping live outside; [`ArenaWorld::step`] takes one
//! [`PlayerInput`] per fighter and reports what happened as [`ArenaEvent`]s.

mod fighter;
mod geometry;
mod world;

use glam::Vec2;
use serde::{Deserialize, Serialize};

pub use fighter::{Fighter, FighterId, PlayerInput};
pub use geometry::{loose_clamp, Rect, Separation};
pub use world::{ArenaEvent, ArenaWorld, Bullet, Pickup, PickupKind};

/// Arena tuning. Times are milliseconds, distances world units.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub world_size: Vec2,
    pub fighter_size: f32,
    pub fighter_speed: f32,
    pub max_hp: f32,
    /// Velocity multiplier for frames without movement input.
    pub friction: f32,
    /// Velocity is clamped to this per axis.
    pub max_velocity: f32,
    /// Longest frame the simulation accepts.
    pub max_frame: f32,
    /// Frame length that acceleration and projectile speed are tuned for.
    pub base_frame: f32,

    pub attack_cooldown: f32,
    pub bullet_speed: f32,
    pub bullet_ttl: f32,
    pub bullet_damage: f32,
    pub bullet_size: f32,

    pub dash_cooldown: f32,
    /// Dash and invulnerability length.
    pub dash_time: f32,
    pub dash_impulse: f32,

    /// Distance overlapping fighters are pushed apart, each.
    pub fighter_push: f32,
    /// Respawns stay this far from the world edge.
    pub respawn_margin: f32,

    pub pickup_interval: f32,
    pub max_pickups: usize,
    pub pickup_attempts: u32,
    pub pickup_margin: f32,
    pub pickup_size: f32,
    pub pickup_ttl: f32,
    /// Chance a spawned pickup heals rather than boosts.
    pub health_chance: f64,
    pub health_amount: f32,
    pub speed_boost: f32,
    pub boost_time: f32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            world_size: Vec2::new(2400.0, 1600.0),
            fighter_size: 40.0,
            fighter_speed: 3.6,
            max_hp: 100.0,
            friction: 0.85,
            max_velocity: 18.0,
            max_frame: 40.0,
            base_frame: 16.0,
            attack_cooldown: 650.0,
            bullet_speed: 8.0,
            bullet_ttl: 2500.0,
            bullet_damage: 18.0,
            bullet_size: 10.0,
            dash_cooldown: 2000.0,
            dash_time: 220.0,
            dash_impulse: 12.0,
            fighter_push: 6.0,
            respawn_margin: 60.0,
            pickup_interval: 2500.0,
            max_pickups: 7,
            pickup_attempts: 30,
            pickup_margin: 80.0,
            pickup_size: 24.0,
            pickup_ttl: 20000.0,
            health_chance: 0.6,
            health_amount: 35.0,
            speed_boost: 1.9,
            boost_time: 6000.0,
        }
    }
}

impl ArenaConfig {
    /// The world as a rectangle anchored at the origin.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect {
            min: Vec2::ZERO,
            size: self.world_size,
        }
    }
}
