//! The arena world and its frame step.
//!
//! ## Frame order
//!
//! 1. the frame time is capped and the clock advances
//! 2. expired pickups vanish, a new one may spawn
//! 3. projectiles move and hit
//! 4. each fighter in id order: input, movement, dash, attack, timers,
//!    pickups, then collisions

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use super::fighter::{Fighter, FighterId, PlayerInput};
use super::geometry::{loose_clamp, Rect, Separation};
use super::ArenaConfig;
use crate::core::GameRng;

/// What a pickup does when collected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PickupKind {
    /// Restores hit points, up to the maximum.
    Health,
    /// Multiplies movement speed for a while.
    Speed,
}

/// A pickup lying in the world.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pickup {
    pub kind: PickupKind,
    pub center: Vec2,
    /// Time left before it vanishes.
    pub ttl: f32,
}

/// A projectile in flight.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub owner: FighterId,
    pub center: Vec2,
    /// Distance per base frame.
    pub vel: Vec2,
    pub ttl: f32,
    pub damage: f32,
    pub size: f32,
}

impl Bullet {
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::centered(self.center, Vec2::splat(self.size))
    }
}

/// Something that happened during a frame.
#[derive(Clone, Debug, PartialEq)]
pub enum ArenaEvent {
    Fired { fighter: FighterId },
    Dashed { fighter: FighterId },
    Hit { attacker: FighterId, victim: FighterId, damage: f32 },
    /// A projectile struck an invulnerable fighter and was spent.
    Blocked { attacker: FighterId, victim: FighterId },
    /// The victim dropped to zero hp and respawned at `respawn`.
    Knockout { attacker: FighterId, victim: FighterId, respawn: Vec2 },
    PickupSpawned { kind: PickupKind, center: Vec2 },
    PickupCollected { fighter: FighterId, kind: PickupKind },
}

/// The arena simulation.
#[derive(Clone, Debug)]
pub struct ArenaWorld {
    config: ArenaConfig,
    obstacles: Vec<Rect>,
    fighters: Vec<Fighter>,
    bullets: Vec<Bullet>,
    pickups: Vec<Pickup>,
    rng: GameRng,
    clock: f32,
    last_pickup: f32,
}

impl ArenaWorld {
    /// An empty world.
    #[must_use]
    pub fn new(config: ArenaConfig, seed: u64) -> Self {
        Self {
            config,
            obstacles: Vec::new(),
            fighters: Vec::new(),
            bullets: Vec::new(),
            pickups: Vec::new(),
            rng: GameRng::new(seed),
            clock: 0.0,
            last_pickup: 0.0,
        }
    }

    /// The stock map: six walls and four fighters.
    #[must_use]
    pub fn standard(seed: u64) -> Self {
        let mut world = Self::new(ArenaConfig::default(), seed);
        for wall in [
            Rect::new(600.0, 300.0, 300.0, 60.0),
            Rect::new(1200.0, 200.0, 60.0, 500.0),
            Rect::new(300.0, 900.0, 700.0, 60.0),
            Rect::new(1400.0, 900.0, 800.0, 60.0),
            Rect::new(1800.0, 400.0, 60.0, 600.0),
            Rect::new(900.0, 1200.0, 400.0, 60.0),
        ] {
            world.add_obstacle(wall);
        }
        for (name, color, x, y) in [
            ("P1", "#00FFFF", 200.0, 200.0),
            ("P2", "#FFFF00", 400.0, 200.0),
            ("P3", "#FF88FF", 200.0, 400.0),
            ("P4", "#88FF88", 400.0, 400.0),
        ] {
            let id = world.add_fighter(name, Vec2::new(x, y));
            world.fighters[id.index()].color = color.to_string();
        }
        world
    }

    pub fn add_obstacle(&mut self, rect: Rect) {
        self.obstacles.push(rect);
    }

    /// Add a fighter with its top-left corner at `pos`.
    pub fn add_fighter(&mut self, name: impl Into<String>, pos: Vec2) -> FighterId {
        let id = FighterId(self.fighters.len() as u8);
        self.fighters.push(Fighter::new(id, name, pos, &self.config));
        id
    }

    /// Drop a pickup at `center`, ignoring walls and the pickup cap.
    pub fn place_pickup(&mut self, kind: PickupKind, center: Vec2) {
        self.pickups.push(Pickup {
            kind,
            center,
            ttl: self.config.pickup_ttl,
        });
    }

    // === Queries ===

    #[must_use]
    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    #[must_use]
    pub fn obstacles(&self) -> &[Rect] {
        &self.obstacles
    }

    #[must_use]
    pub fn fighters(&self) -> &[Fighter] {
        &self.fighters
    }

    #[must_use]
    pub fn fighter(&self, id: FighterId) -> Option<&Fighter> {
        self.fighters.get(id.index())
    }

    pub fn fighter_mut(&mut self, id: FighterId) -> Option<&mut Fighter> {
        self.fighters.get_mut(id.index())
    }

    #[must_use]
    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    #[must_use]
    pub fn pickups(&self) -> &[Pickup] {
        &self.pickups
    }

    /// Simulated time in milliseconds.
    #[must_use]
    pub fn clock(&self) -> f32 {
        self.clock
    }

    /// Mean top-left position of all fighters.
    #[must_use]
    pub fn group_center(&self) -> Vec2 {
        if self.fighters.is_empty() {
            return Vec2::ZERO;
        }
        let sum: Vec2 = self.fighters.iter().map(|f| f.pos).sum();
        sum / self.fighters.len() as f32
    }

    /// Top-left corner of a `view`-sized camera following the group, kept
    /// inside the world where the view fits.
    #[must_use]
    pub fn camera_origin(&self, view: Vec2) -> Vec2 {
        let want = self.group_center() - view / 2.0;
        let room = self.config.world_size - view;
        Vec2::new(loose_clamp(want.x, 0.0, room.x), loose_clamp(want.y, 0.0, room.y))
    }

    // === Simulation ===

    /// Advance by `dt` milliseconds. `inputs[i]` drives fighter `i`;
    /// missing inputs mean idle.
    pub fn step(&mut self, dt: f32, inputs: &[PlayerInput]) -> Vec<ArenaEvent> {
        let dt = dt.max(0.0).min(self.config.max_frame);
        self.clock += dt;
        let mut events = Vec::new();

        self.expire_pickups(dt);
        self.maybe_spawn_pickup(&mut events);
        self.update_bullets(dt, &mut events);

        for i in 0..self.fighters.len() {
            let input = inputs.get(i).copied().unwrap_or_default();
            self.update_fighter(i, input, dt, &mut events);
            self.collect_pickups(i, &mut events);
            self.resolve_collisions(i);
        }
        events
    }

    fn expire_pickups(&mut self, dt: f32) {
        for pickup in &mut self.pickups {
            pickup.ttl -= dt;
        }
        self.pickups.retain(|p| p.ttl > 0.0);
    }

    fn maybe_spawn_pickup(&mut self, events: &mut Vec<ArenaEvent>) {
        if self.clock - self.last_pickup < self.config.pickup_interval {
            return;
        }
        self.last_pickup = self.clock;
        if self.pickups.len() >= self.config.max_pickups {
            return;
        }

        let margin = self.config.pickup_margin;
        let world = self.config.world_size;
        let size = Vec2::splat(self.config.pickup_size);
        for _ in 0..self.config.pickup_attempts {
            let center = Vec2::new(
                self.rng.gen_range_f32(margin, world.x - margin),
                self.rng.gen_range_f32(margin, world.y - margin),
            );
            let spot = Rect::centered(center, size);
            if self.obstacles.iter().any(|o| o.overlaps(&spot)) {
                continue;
            }
            let kind = if self.rng.gen_bool(self.config.health_chance) {
                PickupKind::Health
            } else {
                PickupKind::Speed
            };
            self.place_pickup(kind, center);
            debug!(?kind, x = center.x, y = center.y, "pickup spawned");
            events.push(ArenaEvent::PickupSpawned { kind, center });
            return;
        }
        debug!("no free spot for a pickup");
    }

    fn update_bullets(&mut self, dt: f32, events: &mut Vec<ArenaEvent>) {
        let scale = dt / self.config.base_frame;
        let world = self.config.bounds().max();
        let in_flight = std::mem::take(&mut self.bullets);

        for mut bullet in in_flight {
            bullet.center += bullet.vel * scale;
            bullet.ttl -= dt;
            let rect = bullet.rect();
            let c = bullet.center;
            let outside = c.x < 0.0 || c.y < 0.0 || c.x > world.x || c.y > world.y;
            if outside || bullet.ttl <= 0.0 || self.obstacles.iter().any(|o| o.overlaps(&rect)) {
                trace!(owner = %bullet.owner, "bullet gone");
                continue;
            }

            let victim = self
                .fighters
                .iter()
                .position(|f| f.id != bullet.owner && f.rect().overlaps(&rect));
            match victim {
                Some(index) => self.hurt(index, bullet.damage, bullet.owner, events),
                None => self.bullets.push(bullet),
            }
        }
    }

    fn hurt(&mut self, index: usize, damage: f32, attacker: FighterId, events: &mut Vec<ArenaEvent>) {
        let margin = self.config.respawn_margin;
        let world = self.config.world_size;
        let victim = &mut self.fighters[index];
        let victim_id = victim.id;
        if victim.is_invulnerable() {
            events.push(ArenaEvent::Blocked {
                attacker,
                victim: victim_id,
            });
            return;
        }

        victim.hp -= damage;
        events.push(ArenaEvent::Hit {
            attacker,
            victim: victim_id,
            damage,
        });
        if victim.hp > 0.0 {
            return;
        }

        let respawn = Vec2::new(
            self.rng.gen_range_f32(margin, world.x - margin),
            self.rng.gen_range_f32(margin, world.y - margin),
        );
        victim.hp = victim.max_hp;
        victim.pos = respawn;
        if let Some(scorer) = self.fighters.get_mut(attacker.index()) {
            scorer.score += 1;
        }
        info!(%attacker, victim = %victim_id, "knockout");
        events.push(ArenaEvent::Knockout {
            attacker,
            victim: victim_id,
            respawn,
        });
    }

    fn update_fighter(&mut self, index: usize, input: PlayerInput, dt: f32, events: &mut Vec<ArenaEvent>) {
        let config = &self.config;
        let fighter = &mut self.fighters[index];
        let scale = dt / config.base_frame;

        let axis = input.axis();
        if axis != Vec2::ZERO {
            fighter.facing = axis;
        }
        match axis.try_normalize() {
            Some(dir) => fighter.vel += dir * fighter.speed * fighter.speed_boost * scale,
            None => fighter.vel *= config.friction,
        }

        if input.dash && fighter.dash_cooldown <= 0.0 && fighter.dash_time <= 0.0 {
            fighter.dash_cooldown = config.dash_cooldown;
            fighter.dash_time = config.dash_time;
            fighter.invulnerable_time = config.dash_time;
            fighter.vel += fighter.aim() * config.dash_impulse;
            events.push(ArenaEvent::Dashed { fighter: fighter.id });
        }

        if input.attack && fighter.attack_cooldown <= 0.0 {
            fighter.attack_cooldown = config.attack_cooldown;
            self.bullets.push(Bullet {
                owner: fighter.id,
                center: fighter.center(),
                vel: fighter.aim() * config.bullet_speed,
                ttl: config.bullet_ttl,
                damage: config.bullet_damage,
                size: config.bullet_size,
            });
            events.push(ArenaEvent::Fired { fighter: fighter.id });
        }

        fighter.pos += fighter.vel;
        let cap = Vec2::splat(config.max_velocity);
        fighter.vel = fighter.vel.clamp(-cap, cap);
        fighter.tick_timers(dt);
    }

    fn collect_pickups(&mut self, index: usize, events: &mut Vec<ArenaEvent>) {
        let config = &self.config;
        let fighter = &mut self.fighters[index];
        let body = fighter.rect();
        let size = Vec2::splat(config.pickup_size);

        let mut collected = Vec::new();
        self.pickups.retain(|p| {
            let hit = Rect::centered(p.center, size).overlaps(&body);
            if hit {
                collected.push(p.kind);
            }
            !hit
        });

        for kind in collected {
            match kind {
                PickupKind::Health => {
                    fighter.hp = (fighter.hp + config.health_amount).min(fighter.max_hp);
                }
                PickupKind::Speed => {
                    fighter.speed_boost = config.speed_boost;
                    fighter.boost_time = config.boost_time;
                }
            }
            debug!(fighter = %fighter.id, ?kind, "pickup collected");
            events.push(ArenaEvent::PickupCollected {
                fighter: fighter.id,
                kind,
            });
        }
    }

    fn resolve_collisions(&mut self, index: usize) {
        {
            let fighter = &mut self.fighters[index];
            let room = (self.config.world_size - fighter.size).max(Vec2::ZERO);
            fighter.pos = fighter.pos.clamp(Vec2::ZERO, room);
            for wall in &self.obstacles {
                match fighter.rect().separation(wall) {
                    Some(Separation::X(dx)) => {
                        fighter.pos.x += dx;
                        fighter.vel.x = 0.0;
                    }
                    Some(Separation::Y(dy)) => {
                        fighter.pos.y += dy;
                        fighter.vel.y = 0.0;
                    }
                    None => {}
                }
            }
        }

        let push = self.config.fighter_push;
        for other in 0..self.fighters.len() {
            if other == index {
                continue;
            }
            let (a, b) = (self.fighters[index].rect(), self.fighters[other].rect());
            if !a.overlaps(&b) {
                continue;
            }
            let offset = a.center() - b.center();
            let dist = (offset.x.abs() + offset.y.abs()).max(1.0);
            let shove = offset / dist * push;
            self.fighters[index].pos += shove;
            self.fighters[other].pos -= shove;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn duel(gap: f32) -> ArenaWorld {
        let mut world = ArenaWorld::new(ArenaConfig::default(), 8);
        world.add_fighter("A", Vec2::new(100.0, 100.0));
        world.add_fighter("B", Vec2::new(100.0 + gap, 100.0));
        world
    }

    fn idle() -> [PlayerInput; 2] {
        [PlayerInput::default(); 2]
    }

    #[test]
    fn test_frame_time_is_capped() {
        let mut world = duel(200.0);
        world.step(1000.0, &idle());
        assert_eq!(world.clock(), 40.0);
        world.step(-5.0, &idle());
        assert_eq!(world.clock(), 40.0);
    }

    #[test]
    fn test_acceleration_scales_with_frame() {
        let mut world = duel(200.0);
        world.step(16.0, &[PlayerInput::moving(1.0, 0.0)]);
        let a = world.fighter(FighterId(0)).unwrap();
        assert!((a.vel.x - 3.6).abs() < 1e-4);
        assert!((a.pos.x - 103.6).abs() < 1e-4);
        assert_eq!(a.facing, Vec2::X);
    }

    #[test]
    fn test_friction_and_velocity_cap() {
        let mut world = duel(200.0);
        world.fighter_mut(FighterId(0)).unwrap().vel = Vec2::new(10.0, 0.0);
        world.fighter_mut(FighterId(1)).unwrap().vel = Vec2::new(0.0, 30.0);
        world.step(16.0, &idle());
        assert!((world.fighter(FighterId(0)).unwrap().vel.x - 8.5).abs() < 1e-4);
        assert_eq!(world.fighter(FighterId(1)).unwrap().vel.y, 18.0);
    }

    #[test]
    fn test_world_clamp() {
        let mut world = duel(200.0);
        world.fighter_mut(FighterId(0)).unwrap().pos = Vec2::new(2.0, 2.0);
        world.fighter_mut(FighterId(0)).unwrap().vel = Vec2::new(-10.0, -10.0);
        world.step(16.0, &idle());
        assert_eq!(world.fighter(FighterId(0)).unwrap().pos, Vec2::ZERO);
    }

    #[test]
    fn test_wall_separation_zeroes_velocity() {
        let mut world = duel(400.0);
        world.add_obstacle(Rect::new(140.0, 0.0, 60.0, 500.0));
        world.fighter_mut(FighterId(0)).unwrap().vel = Vec2::new(2.0, 0.0);
        world.step(16.0, &idle());
        let a = world.fighter(FighterId(0)).unwrap();
        assert!((a.pos.x - 100.0).abs() < 1e-3);
        assert_eq!(a.vel.x, 0.0);
    }

    #[test]
    fn test_overlapping_fighters_pushed_apart() {
        let mut world = duel(20.0);
        world.step(16.0, &idle());
        assert!(world.fighter(FighterId(0)).unwrap().pos.x < 100.0);
        assert!(world.fighter(FighterId(1)).unwrap().pos.x > 120.0);
    }

    #[test]
    fn test_attack_has_cooldown() {
        let mut world = duel(400.0);
        let shoot = [PlayerInput::default().with_attack()];
        let events = world.step(16.0, &shoot);
        assert_eq!(events, vec![ArenaEvent::Fired { fighter: FighterId(0) }]);
        assert_eq!(world.bullets().len(), 1);
        assert_eq!(world.bullets()[0].vel, Vec2::new(8.0, 0.0));
        world.step(16.0, &shoot);
        assert_eq!(world.bullets().len(), 1);
    }

    #[test]
    fn test_bullet_hits_first_non_owner() {
        let mut world = duel(60.0);
        world.step(16.0, &[PlayerInput::default().with_attack()]);
        let mut events = Vec::new();
        for _ in 0..10 {
            events.extend(world.step(16.0, &idle()));
        }
        assert!(events.contains(&ArenaEvent::Hit {
            attacker: FighterId(0),
            victim: FighterId(1),
            damage: 18.0
        }));
        assert_eq!(world.fighter(FighterId(1)).unwrap().hp, 82.0);
        assert_eq!(world.fighter(FighterId(0)).unwrap().hp, 100.0);
        assert!(world.bullets().is_empty());
    }

    #[test]
    fn test_invulnerable_victim_blocks() {
        let mut world = duel(60.0);
        world.fighter_mut(FighterId(1)).unwrap().invulnerable_time = 10_000.0;
        world.step(16.0, &[PlayerInput::default().with_attack()]);
        let mut events = Vec::new();
        for _ in 0..10 {
            events.extend(world.step(16.0, &idle()));
        }
        assert!(events.contains(&ArenaEvent::Blocked {
            attacker: FighterId(0),
            victim: FighterId(1)
        }));
        assert_eq!(world.fighter(FighterId(1)).unwrap().hp, 100.0);
        assert!(world.bullets().is_empty());
    }

    #[test]
    fn test_knockout_respawns_and_scores() {
        let mut world = duel(60.0);
        world.fighter_mut(FighterId(1)).unwrap().hp = 10.0;
        world.step(16.0, &[PlayerInput::default().with_attack()]);
        for _ in 0..10 {
            world.step(16.0, &idle());
        }
        let b = world.fighter(FighterId(1)).unwrap();
        assert_eq!(b.hp, 100.0);
        assert!(b.pos.x >= 60.0 && b.pos.x <= 2340.0);
        assert_eq!(world.fighter(FighterId(0)).unwrap().score, 1);
    }

    #[test]
    fn test_dash() {
        let mut world = duel(400.0);
        let events = world.step(16.0, &[PlayerInput::default().with_dash()]);
        assert_eq!(events, vec![ArenaEvent::Dashed { fighter: FighterId(0) }]);
        let a = world.fighter(FighterId(0)).unwrap();
        assert!(a.is_invulnerable());
        assert_eq!(a.dash_cooldown, 2000.0);
        assert_eq!(a.vel.x, 12.0);
    }

    #[test]
    fn test_pickups_spawn_on_interval() {
        let mut world = ArenaWorld::standard(5);
        for _ in 0..62 {
            world.step(40.0, &[]);
        }
        assert!(world.pickups().is_empty());
        world.step(40.0, &[]);
        assert_eq!(world.pickups().len(), 1);
        let spot = Rect::centered(world.pickups()[0].center, Vec2::splat(24.0));
        assert!(world.obstacles().iter().all(|o| !o.overlaps(&spot)));
    }

    #[test]
    fn test_pickup_cap() {
        let mut world = duel(400.0);
        for i in 0..7 {
            world.place_pickup(PickupKind::Speed, Vec2::new(1000.0 + 50.0 * i as f32, 1000.0));
        }
        for _ in 0..70 {
            world.step(40.0, &[]);
        }
        assert_eq!(world.pickups().len(), 7);
    }

    #[test]
    fn test_health_pickup_clamps() {
        let mut world = duel(400.0);
        world.fighter_mut(FighterId(0)).unwrap().hp = 90.0;
        world.place_pickup(PickupKind::Health, Vec2::new(120.0, 120.0));
        let events = world.step(16.0, &idle());
        assert!(events.contains(&ArenaEvent::PickupCollected {
            fighter: FighterId(0),
            kind: PickupKind::Health
        }));
        assert_eq!(world.fighter(FighterId(0)).unwrap().hp, 100.0);
        assert!(world.pickups().is_empty());
    }

    #[test]
    fn test_speed_pickup() {
        let mut world = duel(400.0);
        world.place_pickup(PickupKind::Speed, Vec2::new(120.0, 120.0));
        world.step(16.0, &idle());
        let a = world.fighter(FighterId(0)).unwrap();
        assert_eq!(a.speed_boost, 1.9);
        assert!(a.boost_time > 5900.0);
    }

    #[test]
    fn test_pickups_expire() {
        let mut world = duel(400.0);
        world.place_pickup(PickupKind::Health, Vec2::new(1000.0, 1000.0));
        for _ in 0..499 {
            world.step(40.0, &[]);
        }
        assert!(world.pickups().iter().any(|p| p.center == Vec2::new(1000.0, 1000.0)));
        world.step(40.0, &[]);
        assert!(world.pickups().iter().all(|p| p.center != Vec2::new(1000.0, 1000.0)));
    }

    #[test]
    fn test_camera() {
        let world = duel(200.0);
        assert_eq!(world.group_center(), Vec2::new(200.0, 100.0));
        assert_eq!(world.camera_origin(Vec2::new(800.0, 600.0)), Vec2::ZERO);
        assert_eq!(world.camera_origin(Vec2::new(5000.0, 5000.0)), Vec2::ZERO);
        assert_eq!(ArenaWorld::new(ArenaConfig::default(), 1).group_center(), Vec2::ZERO);
    }
}
