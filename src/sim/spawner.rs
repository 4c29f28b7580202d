//! Entity spawning
//!
//! Asteroid kinds are picked with a cascading threshold draw: one uniform
//! roll is compared against widening thresholds in a fixed order, with later
//! kinds unlocked by level. The thresholds are not independent probabilities.

use glam::Vec2;

use super::entities::{
    Asteroid, AsteroidKind, Particle, PowerUp, PowerUpKind, Star, WeaponKind, WeaponUpgrade,
};
use super::random::RandomSource;
use crate::consts::*;

/// Pick an asteroid kind for the given level from one uniform roll in `[0, 1)`
pub fn asteroid_kind_for_roll(level: u32, roll: f32) -> AsteroidKind {
    if level >= 3 {
        if roll < 0.15 {
            AsteroidKind::Fast
        } else if roll < 0.25 && level >= 5 {
            AsteroidKind::Tank
        } else if roll < 0.35 && level >= 4 {
            AsteroidKind::Splitter
        } else {
            AsteroidKind::Normal
        }
    } else if level >= 2 && roll < 0.1 {
        AsteroidKind::Fast
    } else {
        AsteroidKind::Normal
    }
}

/// Chance of an extra multi-spawn at the given level (0 below level 10, capped at 50%)
pub fn multi_spawn_chance(level: u32) -> f32 {
    if level < 10 {
        return 0.0;
    }
    ((level - 10) as f32 / 200.0).min(0.5)
}

fn random_spawn_x(width: f32, rng: &mut impl RandomSource) -> f32 {
    rng.next_f32() * (width - SPAWN_MARGIN)
}

/// Spawn one asteroid above the top edge, plus the level 10+ multi-spawn extras
pub fn spawn_asteroids(level: u32, width: f32, rng: &mut impl RandomSource) -> Vec<Asteroid> {
    let x = random_spawn_x(width, rng);
    let kind = asteroid_kind_for_roll(level, rng.next_f32());
    let mut spawned = vec![Asteroid::spawn(Vec2::new(x, SPAWN_Y), kind, rng)];

    if level < 10 {
        return spawned;
    }
    if rng.next_f32() >= multi_spawn_chance(level) {
        return spawned;
    }

    let extra = 1 + rng.next_below(2);
    for i in 0..extra {
        let x = random_spawn_x(width, rng);
        let kind = asteroid_kind_for_roll(level, rng.next_f32());
        let y = SPAWN_Y - (i + 1) as f32 * MULTI_SPAWN_STACK;
        spawned.push(Asteroid::spawn(Vec2::new(x, y), kind, rng));
    }
    log::trace!("Multi-spawn: {} asteroids at level {}", spawned.len(), level);
    spawned
}

/// Two or three NORMAL fragments on a ring around a destroyed splitter
pub fn splitter_fragments(origin: Vec2, rng: &mut impl RandomSource) -> Vec<Asteroid> {
    let count = 2 + rng.next_below(2);
    (0..count)
        .map(|i| {
            let angle = std::f32::consts::TAU * i as f32 / count as f32;
            let offset = Vec2::new(angle.cos(), angle.sin()) * SPLITTER_RING_RADIUS;
            Asteroid::fragment(origin + offset, rng)
        })
        .collect()
}

pub fn spawn_power_up(width: f32, rng: &mut impl RandomSource) -> PowerUp {
    let x = random_spawn_x(width, rng);
    let kind = PowerUpKind::ALL[rng.next_below(PowerUpKind::ALL.len() as u32) as usize];
    PowerUp::new(Vec2::new(x, SPAWN_Y), kind)
}

pub fn spawn_weapon_upgrade(width: f32, rng: &mut impl RandomSource) -> WeaponUpgrade {
    let x = random_spawn_x(width, rng);
    let kind = WeaponKind::DROPS[rng.next_below(WeaponKind::DROPS.len() as u32) as usize];
    WeaponUpgrade::new(Vec2::new(x, SPAWN_Y), kind)
}

/// A new star just above the top edge
pub fn spawn_star(width: f32, rng: &mut impl RandomSource) -> Star {
    let x = rng.next_f32() * width;
    Star::spawn(Vec2::new(x, STAR_SPAWN_Y), rng)
}

/// Fill the whole arena with stars for a fresh session
pub fn initial_star_field(arena: Vec2, rng: &mut impl RandomSource) -> Vec<Star> {
    (0..INITIAL_STARS)
        .map(|_| {
            let x = rng.next_f32() * arena.x;
            let y = rng.next_f32() * arena.y;
            Star::spawn(Vec2::new(x, y), rng)
        })
        .collect()
}

/// Append an explosion burst of `count` particles centred on `center`
pub fn explode(
    particles: &mut Vec<Particle>,
    center: Vec2,
    count: usize,
    rng: &mut impl RandomSource,
) {
    particles.reserve(count);
    for _ in 0..count {
        let angle = rng.next_f32() * std::f32::consts::TAU;
        let speed = rng.next_range(50.0, 200.0);
        let lifetime = rng.next_range(0.3, 0.8);
        let vel = Vec2::new(angle.cos(), angle.sin()) * speed;
        particles.push(Particle::new(center, vel, lifetime));
    }
}
