//! Simulation entities
//!
//! Plain structs with no per-entity update hooks: the tick owns all movement.
//! Balancing numbers for each closed kind enum live in one `match` table.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Bounds, Rect};
use super::random::RandomSource;
use crate::consts::*;

// ── Kind tables ─────────────────────────────────────────────────────────────

/// Asteroid variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AsteroidKind {
    #[default]
    Normal,
    /// Moves faster, worth more points
    Fast,
    /// Slow but takes three hits
    Tank,
    /// Breaks into smaller asteroids when destroyed
    Splitter,
}

impl AsteroidKind {
    pub fn speed_multiplier(self) -> f32 {
        match self {
            AsteroidKind::Normal => 1.0,
            AsteroidKind::Fast => 1.3,
            AsteroidKind::Tank => 0.6,
            AsteroidKind::Splitter => 0.8,
        }
    }

    /// Base score before the level factor
    pub fn score_value(self) -> u32 {
        match self {
            AsteroidKind::Normal => 5,
            AsteroidKind::Fast => 7,
            AsteroidKind::Tank => 10,
            AsteroidKind::Splitter => 6,
        }
    }

    pub fn hit_points(self) -> i32 {
        match self {
            AsteroidKind::Tank => 3,
            AsteroidKind::Normal | AsteroidKind::Fast | AsteroidKind::Splitter => 1,
        }
    }
}

/// Power-up variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    Shield,
    Health,
    ScoreMultiplier,
    SlowMotion,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::Shield,
        PowerUpKind::Health,
        PowerUpKind::ScoreMultiplier,
        PowerUpKind::SlowMotion,
    ];

    /// Effect duration in seconds; zero means instantaneous
    pub fn duration(self) -> f32 {
        match self {
            PowerUpKind::Shield => 10.0,
            PowerUpKind::Health => 0.0,
            PowerUpKind::ScoreMultiplier => 15.0,
            PowerUpKind::SlowMotion => 8.0,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            PowerUpKind::Shield => "Shield",
            PowerUpKind::Health => "Health",
            PowerUpKind::ScoreMultiplier => "2x Score",
            PowerUpKind::SlowMotion => "Slow-Mo",
        }
    }
}

/// Player weapons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WeaponKind {
    #[default]
    Single,
    Double,
    Triple,
    Rapid,
    Spread,
}

impl WeaponKind {
    /// Weapons that can drop as pickups
    pub const DROPS: [WeaponKind; 4] = [
        WeaponKind::Double,
        WeaponKind::Triple,
        WeaponKind::Rapid,
        WeaponKind::Spread,
    ];

    pub fn bullet_count(self) -> usize {
        match self {
            WeaponKind::Single | WeaponKind::Rapid => 1,
            WeaponKind::Double => 2,
            WeaponKind::Triple => 3,
            WeaponKind::Spread => 5,
        }
    }

    /// Seconds between shots
    pub fn cooldown(self) -> f32 {
        match self {
            WeaponKind::Single => 0.1,
            WeaponKind::Double => 0.12,
            WeaponKind::Triple => 0.15,
            WeaponKind::Rapid => 0.05,
            WeaponKind::Spread => 0.2,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            WeaponKind::Single => "Single Shot",
            WeaponKind::Double => "Double Shot",
            WeaponKind::Triple => "Triple Shot",
            WeaponKind::Rapid => "Rapid Fire",
            WeaponKind::Spread => "Spread Shot",
        }
    }

    /// Bullet pattern as (x offset from the ship centre, angle in degrees)
    fn pattern(self) -> &'static [(f32, f32)] {
        match self {
            WeaponKind::Single | WeaponKind::Rapid => &[(-2.0, 0.0)],
            WeaponKind::Double => &[(-10.0, 0.0), (6.0, 0.0)],
            WeaponKind::Triple => &[(-14.0, 0.0), (-2.0, 0.0), (10.0, 0.0)],
            WeaponKind::Spread => &[
                (-2.0, -60.0),
                (-2.0, -30.0),
                (-2.0, 0.0),
                (-2.0, 30.0),
                (-2.0, 60.0),
            ],
        }
    }
}

// ── Player ──────────────────────────────────────────────────────────────────

/// A timed effect with an active flag and a countdown clamped at zero
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TimedEffect {
    pub active: bool,
    pub remaining: f32,
}

impl TimedEffect {
    pub fn activate(&mut self, duration: f32) {
        self.active = true;
        self.remaining = duration;
    }

    /// Count down; returns true on the tick the effect expires
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.active {
            return false;
        }
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.active = false;
            self.remaining = 0.0;
            return true;
        }
        false
    }
}

/// The player's ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub health: u8,
    pub score: u64,
    pub invulnerable: bool,
    pub invulnerability_timer: f32,
    pub shoot_cooldown: f32,
    pub weapon: WeaponKind,
    /// Remaining time on a picked-up weapon (0 while on the default weapon)
    pub weapon_timer: f32,
    pub shield: TimedEffect,
    pub score_multiplier: TimedEffect,
    pub slow_motion: TimedEffect,
    pub combo: u32,
    pub combo_timer: f32,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            health: PLAYER_START_HEALTH,
            score: 0,
            invulnerable: false,
            invulnerability_timer: 0.0,
            shoot_cooldown: 0.0,
            weapon: WeaponKind::Single,
            weapon_timer: 0.0,
            shield: TimedEffect::default(),
            score_multiplier: TimedEffect::default(),
            slow_motion: TimedEffect::default(),
            combo: 0,
            combo_timer: 0.0,
        }
    }

    /// Spawn point for an arena of the given size
    pub fn spawn_point(arena: Vec2) -> Vec2 {
        Vec2::new(
            arena.x / 2.0 - PLAYER_SIZE / 2.0,
            arena.y - PLAYER_SPAWN_OFFSET,
        )
    }

    pub fn reset(&mut self, pos: Vec2) {
        *self = Self::new(pos);
    }

    pub fn size(&self) -> Vec2 {
        Vec2::splat(PLAYER_SIZE)
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Move along `dir` (components in -1..=1), clamped inside the arena.
    /// Diagonal input is normalized so it is not faster than straight input.
    pub fn steer(&mut self, dir: Vec2, dt: f32, arena: Vec2) {
        let mut dir = dir;
        if dir.x != 0.0 && dir.y != 0.0 {
            dir *= std::f32::consts::FRAC_1_SQRT_2;
        }
        self.pos += dir * PLAYER_SPEED * dt;

        let max = (arena - self.size()).max(Vec2::ZERO);
        self.pos = self.pos.clamp(Vec2::ZERO, max);
    }

    pub fn can_shoot(&self) -> bool {
        self.shoot_cooldown <= 0.0
    }

    /// Fire the current weapon if the cooldown allows it
    pub fn try_fire(&mut self) -> Option<Vec<Bullet>> {
        if !self.can_shoot() {
            return None;
        }
        self.shoot_cooldown = self.weapon.cooldown();

        let center_x = self.pos.x + PLAYER_SIZE / 2.0;
        let bullets = self
            .weapon
            .pattern()
            .iter()
            .map(|&(offset, degrees)| {
                let pos = Vec2::new(center_x + offset, self.pos.y);
                if degrees == 0.0 {
                    Bullet::new(pos)
                } else {
                    Bullet::angled(pos, degrees.to_radians())
                }
            })
            .collect();
        Some(bullets)
    }

    /// Apply damage. Returns false when the hit was absorbed.
    pub fn take_damage(&mut self, amount: u8) -> bool {
        if self.invulnerable || self.shield.active {
            return false;
        }
        self.health = self.health.saturating_sub(amount);
        self.invulnerable = true;
        self.invulnerability_timer = INVULNERABILITY_TIME;
        self.reset_combo();
        true
    }

    pub fn add_health(&mut self, amount: u8) {
        self.health = self.health.saturating_add(amount).min(PLAYER_MAX_HEALTH);
    }

    /// Add points scaled by the score multiplier and combo; returns the amount awarded
    pub fn add_score(&mut self, points: u32) -> u32 {
        let mut awarded = points;
        if self.score_multiplier.active {
            awarded = awarded.saturating_mul(2);
        }
        if self.combo > 1 {
            let factor = 1.0 + (self.combo - 1) as f32 * 0.25;
            awarded = (awarded as f32 * factor) as u32;
        }
        self.score += u64::from(awarded);
        awarded
    }

    pub fn increment_combo(&mut self) {
        self.combo += 1;
        self.combo_timer = COMBO_WINDOW;
    }

    pub fn reset_combo(&mut self) {
        self.combo = 0;
        self.combo_timer = 0.0;
    }

    pub fn activate_power_up(&mut self, kind: PowerUpKind) {
        match kind {
            PowerUpKind::Shield => self.shield.activate(kind.duration()),
            PowerUpKind::Health => self.add_health(1),
            PowerUpKind::ScoreMultiplier => self.score_multiplier.activate(kind.duration()),
            PowerUpKind::SlowMotion => self.slow_motion.activate(kind.duration()),
        }
    }

    pub fn upgrade_weapon(&mut self, kind: WeaponKind) {
        self.weapon = kind;
        self.weapon_timer = WEAPON_UPGRADE_DURATION;
    }

    /// Advance every player countdown by `dt`
    pub fn update_timers(&mut self, dt: f32) {
        if self.invulnerable {
            self.invulnerability_timer -= dt;
            if self.invulnerability_timer <= 0.0 {
                self.invulnerable = false;
                self.invulnerability_timer = 0.0;
            }
        }

        if self.shoot_cooldown > 0.0 {
            self.shoot_cooldown = (self.shoot_cooldown - dt).max(0.0);
        }

        if self.weapon_timer > 0.0 {
            self.weapon_timer -= dt;
            if self.weapon_timer <= 0.0 {
                self.weapon_timer = 0.0;
                self.weapon = WeaponKind::Single;
            }
        }

        self.shield.tick(dt);
        self.score_multiplier.tick(dt);
        self.slow_motion.tick(dt);

        if self.combo > 0 {
            self.combo_timer -= dt;
            if self.combo_timer <= 0.0 {
                self.reset_combo();
            }
        }
    }
}

impl Bounds for Player {
    fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size())
    }
}

// ── Asteroid ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asteroid {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Edge length of the square bounding box
    pub size: f32,
    pub kind: AsteroidKind,
    pub hit_points: i32,
    pub max_hit_points: i32,
}

impl Asteroid {
    /// Create an asteroid with random size and velocity.
    /// Splitters are drawn from the smaller size range.
    pub fn spawn(pos: Vec2, kind: AsteroidKind, rng: &mut impl RandomSource) -> Self {
        let size = if kind == AsteroidKind::Splitter {
            Self::small_size(rng)
        } else {
            20.0 + rng.next_below(31) as f32
        };
        Self::with_size(pos, kind, size, rng)
    }

    /// A NORMAL fragment left behind by a destroyed splitter
    pub fn fragment(pos: Vec2, rng: &mut impl RandomSource) -> Self {
        let size = Self::small_size(rng);
        Self::with_size(pos, AsteroidKind::Normal, size, rng)
    }

    fn small_size(rng: &mut impl RandomSource) -> f32 {
        15.0 + rng.next_below(26) as f32
    }

    fn with_size(pos: Vec2, kind: AsteroidKind, size: f32, rng: &mut impl RandomSource) -> Self {
        let base_speed = rng.next_range(150.0, 400.0);
        let drift = rng.next_range(-50.0, 50.0);
        Self {
            pos,
            vel: Vec2::new(drift, base_speed * kind.speed_multiplier()),
            size,
            kind,
            hit_points: kind.hit_points(),
            max_hit_points: kind.hit_points(),
        }
    }

    pub fn advance(&mut self, dt: f32, multiplier: f32) {
        self.pos += self.vel * dt * multiplier;
    }

    /// Apply damage; returns true when the asteroid is destroyed
    pub fn take_damage(&mut self, amount: i32) -> bool {
        self.hit_points -= amount;
        self.hit_points <= 0
    }

    pub fn is_off_screen(&self, height: f32) -> bool {
        self.pos.y > height
    }
}

impl Bounds for Asteroid {
    fn bounds(&self) -> Rect {
        Rect::new(self.pos, Vec2::splat(self.size))
    }
}

// ── Bullet ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Bullet {
    /// Straight-up bullet
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::new(0.0, -BULLET_SPEED),
        }
    }

    /// Bullet rotated by `angle` radians, 0 = straight up, positive = right
    pub fn angled(pos: Vec2, angle: f32) -> Self {
        Self {
            pos,
            vel: Vec2::new(BULLET_SPEED * angle.sin(), -BULLET_SPEED * angle.cos()),
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }

    /// Fully above the top edge
    pub fn is_off_screen(&self) -> bool {
        self.pos.y + BULLET_HEIGHT < 0.0
    }
}

impl Bounds for Bullet {
    fn bounds(&self) -> Rect {
        Rect::new(self.pos, Vec2::new(BULLET_WIDTH, BULLET_HEIGHT))
    }
}

// ── Particle ────────────────────────────────────────────────────────────────

/// Cosmetic explosion debris
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub lifetime: f32,
    pub age: f32,
}

impl Particle {
    pub fn new(pos: Vec2, vel: Vec2, lifetime: f32) -> Self {
        Self {
            pos,
            vel,
            lifetime,
            age: 0.0,
        }
    }

    pub fn alpha(&self) -> f32 {
        (1.0 - self.age / self.lifetime).max(0.0)
    }

    pub fn is_expired(&self) -> bool {
        self.age >= self.lifetime
    }

    pub fn advance(&mut self, dt: f32) {
        self.pos += self.vel * dt;
        self.age += dt;
    }
}

// ── Star ────────────────────────────────────────────────────────────────────

/// Parallax layer of a background star
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StarLayer {
    Far,
    Mid,
    Close,
}

impl StarLayer {
    pub fn from_index(index: u32) -> Self {
        match index {
            0 => StarLayer::Far,
            1 => StarLayer::Mid,
            2 => StarLayer::Close,
            other => panic!("invalid star layer index {other}"),
        }
    }

    /// Fall speed range (px/s)
    fn speed_range(self) -> (f32, f32) {
        match self {
            StarLayer::Far => (20.0, 40.0),
            StarLayer::Mid => (50.0, 80.0),
            StarLayer::Close => (100.0, 150.0),
        }
    }

    /// Brightness as (minimum, number of steps)
    fn brightness_range(self) -> (u8, u32) {
        match self {
            StarLayer::Far => (80, 60),
            StarLayer::Mid => (120, 80),
            StarLayer::Close => (180, 76),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
    pub layer: StarLayer,
    pub speed: f32,
    pub brightness: u8,
}

impl Star {
    pub fn spawn(pos: Vec2, rng: &mut impl RandomSource) -> Self {
        let layer = StarLayer::from_index(rng.next_below(3));
        let (min_speed, max_speed) = layer.speed_range();
        let speed = rng.next_range(min_speed, max_speed);
        let (min_brightness, steps) = layer.brightness_range();
        let brightness = min_brightness + rng.next_below(steps) as u8;
        Self {
            pos,
            layer,
            speed,
            brightness,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.pos.y += self.speed * dt;
    }

    pub fn is_off_screen(&self, height: f32) -> bool {
        self.pos.y > height
    }
}

// ── Pickups ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub pos: Vec2,
    pub kind: PowerUpKind,
    /// Drives the renderer's pulse animation
    pub pulse_timer: f32,
}

impl PowerUp {
    pub fn new(pos: Vec2, kind: PowerUpKind) -> Self {
        Self {
            pos,
            kind,
            pulse_timer: 0.0,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.pos.y += POWER_UP_FALL_SPEED * dt;
        self.pulse_timer += dt;
    }

    pub fn is_off_screen(&self, height: f32) -> bool {
        self.pos.y > height
    }
}

impl Bounds for PowerUp {
    fn bounds(&self) -> Rect {
        Rect::new(self.pos, Vec2::splat(POWER_UP_SIZE))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponUpgrade {
    pub pos: Vec2,
    pub kind: WeaponKind,
}

impl WeaponUpgrade {
    pub fn new(pos: Vec2, kind: WeaponKind) -> Self {
        Self { pos, kind }
    }

    pub fn advance(&mut self, dt: f32) {
        self.pos.y += WEAPON_UPGRADE_FALL_SPEED * dt;
    }

    pub fn is_off_screen(&self, height: f32) -> bool {
        self.pos.y > height
    }
}

impl Bounds for WeaponUpgrade {
    fn bounds(&self) -> Rect {
        Rect::new(self.pos, Vec2::splat(WEAPON_UPGRADE_SIZE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::random::ScriptedRandom;
    use proptest::prelude::*;

    fn player() -> Player {
        Player::new(Vec2::new(10.0, 20.0))
    }

    #[test]
    fn test_player_damage_and_invulnerability() {
        let mut p = player();
        assert_eq!(p.health, 3);
        assert!(p.is_alive());

        assert!(p.take_damage(1));
        assert_eq!(p.health, 2);
        assert!(p.invulnerable);
        assert_eq!(p.invulnerability_timer, INVULNERABILITY_TIME);

        // Ignored while invulnerable
        assert!(!p.take_damage(10));
        assert_eq!(p.health, 2);

        p.update_timers(3.0);
        assert!(!p.invulnerable);
        assert_eq!(p.invulnerability_timer, 0.0);

        p.take_damage(2);
        assert_eq!(p.health, 0);
        assert!(!p.is_alive());
    }

    #[test]
    fn test_shield_absorbs_damage() {
        let mut p = player();
        p.activate_power_up(PowerUpKind::Shield);
        p.increment_combo();
        p.increment_combo();
        assert!(!p.take_damage(1));
        assert_eq!(p.health, 3);
        assert_eq!(p.combo, 2);
        assert!(!p.invulnerable);
    }

    #[test]
    fn test_damage_resets_combo() {
        let mut p = player();
        p.increment_combo();
        p.increment_combo();
        p.take_damage(1);
        assert_eq!(p.combo, 0);
        assert_eq!(p.combo_timer, 0.0);
    }

    #[test]
    fn test_combo_expires_after_window() {
        let mut p = player();
        p.increment_combo();
        p.update_timers(1.0);
        assert_eq!(p.combo, 1);
        p.update_timers(0.6);
        assert_eq!(p.combo, 0);
    }

    #[test]
    fn test_combo_score_scaling() {
        let mut p = player();
        for _ in 0..3 {
            p.increment_combo();
        }
        assert_eq!(p.add_score(100), 150);
        assert_eq!(p.score, 150);

        p.activate_power_up(PowerUpKind::ScoreMultiplier);
        assert_eq!(p.add_score(100), 300);
        assert_eq!(p.score, 450);
    }

    #[test]
    fn test_plain_score() {
        let mut p = player();
        p.add_score(42);
        assert_eq!(p.score, 42);
        // A single kill is not a combo yet
        p.increment_combo();
        p.add_score(10);
        assert_eq!(p.score, 52);
    }

    #[test]
    fn test_health_power_up_caps_at_max() {
        let mut p = player();
        for _ in 0..5 {
            p.activate_power_up(PowerUpKind::Health);
        }
        assert_eq!(p.health, PLAYER_MAX_HEALTH);
    }

    #[test]
    fn test_timed_power_ups_expire() {
        let mut p = player();
        p.activate_power_up(PowerUpKind::SlowMotion);
        assert!(p.slow_motion.active);
        p.update_timers(7.9);
        assert!(p.slow_motion.active);
        p.update_timers(0.2);
        assert!(!p.slow_motion.active);
        assert_eq!(p.slow_motion.remaining, 0.0);
    }

    #[test]
    fn test_weapon_reverts_exactly_at_zero() {
        let mut p = player();
        p.upgrade_weapon(WeaponKind::Spread);
        p.update_timers(14.5);
        assert_eq!(p.weapon, WeaponKind::Spread);
        p.update_timers(0.25);
        assert_eq!(p.weapon, WeaponKind::Spread);
        p.update_timers(0.25);
        assert_eq!(p.weapon, WeaponKind::Single);
        assert_eq!(p.weapon_timer, 0.0);
    }

    #[test]
    fn test_shoot_cooldown() {
        let mut p = player();
        assert!(p.can_shoot());
        assert_eq!(p.try_fire().map(|b| b.len()), Some(1));
        assert!(!p.can_shoot());
        assert!(p.try_fire().is_none());

        p.update_timers(0.2);
        assert!(p.can_shoot());
        assert_eq!(p.shoot_cooldown, 0.0);
    }

    #[test]
    fn test_weapon_patterns() {
        for (weapon, count) in [
            (WeaponKind::Single, 1),
            (WeaponKind::Double, 2),
            (WeaponKind::Triple, 3),
            (WeaponKind::Rapid, 1),
            (WeaponKind::Spread, 5),
        ] {
            let mut p = player();
            p.upgrade_weapon(weapon);
            let bullets = p.try_fire().unwrap_or_default();
            assert_eq!(bullets.len(), count);
            assert_eq!(bullets.len(), weapon.bullet_count());
            assert_eq!(p.shoot_cooldown, weapon.cooldown());
        }
    }

    #[test]
    fn test_spread_fans_out() {
        let mut p = player();
        p.upgrade_weapon(WeaponKind::Spread);
        let bullets = p.try_fire().unwrap_or_default();
        let center = &bullets[2];
        assert!(center.vel.x.abs() < 1e-3);
        assert!((center.vel.y + BULLET_SPEED).abs() < 1e-3);
        assert!(bullets[0].vel.x < 0.0 && bullets[4].vel.x > 0.0);
        assert!((bullets[0].vel.x + bullets[4].vel.x).abs() < 1e-3);
        for b in &bullets {
            assert!((b.vel.length() - BULLET_SPEED).abs() < 0.01);
            assert!(b.vel.y < 0.0);
        }
    }

    #[test]
    fn test_double_bullet_offsets() {
        let mut p = Player::new(Vec2::new(100.0, 300.0));
        p.upgrade_weapon(WeaponKind::Double);
        let bullets = p.try_fire().unwrap_or_default();
        assert_eq!(bullets[0].pos, Vec2::new(106.0, 300.0));
        assert_eq!(bullets[1].pos, Vec2::new(122.0, 300.0));
    }

    #[test]
    fn test_steer_normalizes_diagonal_and_clamps() {
        let arena = Vec2::new(800.0, 600.0);
        let mut p = Player::new(Vec2::new(400.0, 300.0));
        p.steer(Vec2::new(1.0, 1.0), 0.1, arena);
        let moved = p.pos - Vec2::new(400.0, 300.0);
        assert!((moved.length() - PLAYER_SPEED * 0.1).abs() < 1e-3);

        p.steer(Vec2::new(-1.0, 0.0), 10.0, arena);
        assert_eq!(p.pos.x, 0.0);
        p.steer(Vec2::new(0.0, 1.0), 10.0, arena);
        assert_eq!(p.pos.y, arena.y - PLAYER_SIZE);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut p = player();
        p.add_score(100);
        p.take_damage(2);
        p.try_fire();
        p.upgrade_weapon(WeaponKind::Rapid);

        p.reset(Vec2::new(50.0, 60.0));
        assert_eq!(p.pos, Vec2::new(50.0, 60.0));
        assert_eq!(p.health, 3);
        assert_eq!(p.score, 0);
        assert!(!p.invulnerable);
        assert!(p.can_shoot());
        assert_eq!(p.weapon, WeaponKind::Single);
    }

    #[test]
    fn test_tank_takes_three_hits() {
        let mut rng = ScriptedRandom::new();
        let mut tank = Asteroid::spawn(Vec2::ZERO, AsteroidKind::Tank, &mut rng);
        assert_eq!(tank.hit_points, 3);
        assert!(!tank.take_damage(1));
        assert!(!tank.take_damage(1));
        assert_eq!(tank.hit_points, 1);
        assert!(tank.take_damage(1));
    }

    #[test]
    fn test_asteroid_spawn_draws() {
        let mut rng = ScriptedRandom::new()
            .with_ints([30])
            .with_floats([0.0, 1.0 - f32::EPSILON]);
        let a = Asteroid::spawn(Vec2::ZERO, AsteroidKind::Fast, &mut rng);
        assert_eq!(a.size, 50.0);
        assert!((a.vel.y - 150.0 * 1.3).abs() < 1e-3);
        assert!((a.vel.x - 50.0).abs() < 1e-3);

        let mut rng = ScriptedRandom::new().with_ints([25]);
        let s = Asteroid::spawn(Vec2::ZERO, AsteroidKind::Splitter, &mut rng);
        assert_eq!(s.size, 40.0);
        let f = Asteroid::fragment(Vec2::ZERO, &mut ScriptedRandom::new());
        assert_eq!(f.size, 15.0);
        assert_eq!(f.kind, AsteroidKind::Normal);
    }

    #[test]
    fn test_particle_alpha_and_expiry() {
        let mut particle = Particle::new(Vec2::ZERO, Vec2::new(10.0, 0.0), 0.5);
        assert_eq!(particle.alpha(), 1.0);
        particle.advance(0.25);
        assert!((particle.alpha() - 0.5).abs() < 1e-6);
        assert!(!particle.is_expired());
        particle.advance(0.5);
        assert!(particle.is_expired());
        assert_eq!(particle.alpha(), 0.0);
    }

    #[test]
    fn test_star_layers() {
        let mut rng = ScriptedRandom::new().with_ints([2, 75]).with_floats([0.5]);
        let star = Star::spawn(Vec2::ZERO, &mut rng);
        assert_eq!(star.layer, StarLayer::Close);
        assert_eq!(star.speed, 125.0);
        assert_eq!(star.brightness, 255);
    }

    #[test]
    #[should_panic(expected = "invalid star layer")]
    fn test_star_layer_out_of_range_panics() {
        StarLayer::from_index(3);
    }

    #[test]
    fn test_bullet_off_screen_top() {
        let mut b = Bullet::new(Vec2::new(0.0, 5.0));
        assert!(!b.is_off_screen());
        b.advance(0.02);
        assert!(!b.is_off_screen());
        b.advance(0.01);
        assert!(b.is_off_screen());
    }

    proptest! {
        #[test]
        fn prop_asteroid_motion_is_linear(
            x in -100.0f32..900.0,
            y in -100.0f32..700.0,
            vx in -50.0f32..50.0,
            vy in 0.0f32..520.0,
            dt in 0.0f32..0.1,
            multiplier in 0.25f32..4.0,
        ) {
            let mut rng = ScriptedRandom::new();
            let mut a = Asteroid::spawn(Vec2::new(x, y), AsteroidKind::Normal, &mut rng);
            a.vel = Vec2::new(vx, vy);
            a.advance(dt, multiplier);
            let expected = Vec2::new(x, y) + Vec2::new(vx, vy) * dt * multiplier;
            prop_assert_eq!(a.pos, expected);
        }

        #[test]
        fn prop_health_stays_in_range(
            ops in proptest::collection::vec((0u8..4, 0u8..6, 0.0f32..3.0), 0..64),
        ) {
            let mut p = player();
            for (op, amount, dt) in ops {
                match op {
                    0 => { p.take_damage(amount); }
                    1 => p.add_health(amount),
                    2 => p.activate_power_up(PowerUpKind::Health),
                    _ => p.update_timers(dt),
                }
                prop_assert!(p.health <= PLAYER_MAX_HEALTH);
                prop_assert!(p.invulnerability_timer >= 0.0);
                prop_assert!(p.shoot_cooldown >= 0.0);
            }
        }
    }
}
