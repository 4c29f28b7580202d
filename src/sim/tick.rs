//! Simulation tick
//!
//! Advances the game state by one step. The order of the playing-phase
//! systems is fixed so seeded runs replay identically.

use super::collision::Bounds;
use super::difficulty::KillOutcome;
use super::entities::{Asteroid, AsteroidKind};
use super::random::RandomSource;
use super::spawner;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;
use crate::input::{Action, InputSnapshot};

/// Advance the game state by one step of `dt` seconds
pub fn tick(state: &mut GameState, input: &InputSnapshot, dt: f32, rng: &mut impl RandomSource) {
    let dt = dt.max(0.0);
    state.events.clear();

    match state.phase {
        GamePhase::Menu => {
            if input.is_just_pressed(Action::Start) {
                log::info!("Starting game");
                state.phase = GamePhase::Playing;
                // Controls are not read on the tick the game starts
                step_playing(state, dt, rng);
            } else {
                update_star_field(state, dt, rng);
            }
        }
        GamePhase::Playing => {
            if input.is_just_pressed(Action::Pause) {
                log::info!("Paused");
                state.phase = GamePhase::Paused;
                return;
            }
            apply_controls(state, input, dt);
            step_playing(state, dt, rng);
        }
        GamePhase::Paused => {
            if input.is_just_pressed(Action::Pause) {
                log::info!("Resumed");
                state.phase = GamePhase::Playing;
                apply_controls(state, input, dt);
                step_playing(state, dt, rng);
            }
        }
        GamePhase::GameOver => {
            if input.is_just_pressed(Action::Restart) {
                state.reset(rng);
            }
        }
    }
}

/// Player movement and shooting
fn apply_controls(state: &mut GameState, input: &InputSnapshot, dt: f32) {
    state.player.steer(input.move_direction(), dt, state.arena);

    if input.is_held(Action::Shoot) {
        if let Some(bullets) = state.player.try_fire() {
            state.bullets.extend(bullets);
        }
    }
}

/// One playing-phase step
fn step_playing(state: &mut GameState, dt: f32, rng: &mut impl RandomSource) {
    state.time_ticks += 1;

    state.player.update_timers(dt);
    state.screen_shake.decay(dt);
    state.difficulty.advance_timer(dt);

    spawn_entities(state, dt, rng);

    let dilation = state.time_dilation();

    update_stars(state, dt);
    update_weapon_upgrades(state, dt, rng);
    update_power_ups(state, dt, rng);
    update_bullets(state, dt, rng);
    update_asteroids(state, dt, dilation, rng);
    update_particles(state, dt);

    // Passive survival score, truncated per tick
    let passive = (dt * state.difficulty.level as f32) as u32;
    state.player.add_score(passive);
}

fn spawn_entities(state: &mut GameState, dt: f32, rng: &mut impl RandomSource) {
    let width = state.arena.x;

    let timers = &mut state.spawn_timers;
    timers.asteroid += dt;
    if timers.asteroid >= state.difficulty.spawn_interval {
        timers.asteroid = 0.0;
        let spawned = spawner::spawn_asteroids(state.difficulty.level, width, rng);
        log::trace!("Spawned {} asteroid(s)", spawned.len());
        state.asteroids.extend(spawned);
    }

    let timers = &mut state.spawn_timers;
    timers.weapon_upgrade -= dt;
    if timers.weapon_upgrade <= 0.0 {
        timers.weapon_upgrade = WEAPON_SPAWN_INTERVAL;
        let upgrade = spawner::spawn_weapon_upgrade(width, rng);
        log::debug!("Weapon upgrade dropped: {:?}", upgrade.kind);
        state.weapon_upgrades.push(upgrade);
    }

    let timers = &mut state.spawn_timers;
    timers.power_up -= dt;
    if timers.power_up <= 0.0 {
        timers.power_up = POWER_UP_SPAWN_INTERVAL;
        let power_up = spawner::spawn_power_up(width, rng);
        log::debug!("Power-up dropped: {:?}", power_up.kind);
        state.power_ups.push(power_up);
    }

    spawn_star(state, dt, rng);
}

fn spawn_star(state: &mut GameState, dt: f32, rng: &mut impl RandomSource) {
    state.spawn_timers.star += dt;
    if state.spawn_timers.star >= STAR_SPAWN_INTERVAL && state.stars.len() < MAX_STARS {
        state.spawn_timers.star = 0.0;
        state.stars.push(spawner::spawn_star(state.arena.x, rng));
    }
}

/// Menu background: spawn, advance and cull stars only
fn update_star_field(state: &mut GameState, dt: f32, rng: &mut impl RandomSource) {
    spawn_star(state, dt, rng);
    update_stars(state, dt);
}

fn update_stars(state: &mut GameState, dt: f32) {
    let height = state.arena.y;
    for star in &mut state.stars {
        star.advance(dt);
    }
    state.stars.retain(|s| !s.is_off_screen(height));
}

fn update_weapon_upgrades(state: &mut GameState, dt: f32, rng: &mut impl RandomSource) {
    let height = state.arena.y;
    let mut i = 0;
    while i < state.weapon_upgrades.len() {
        let upgrade = &mut state.weapon_upgrades[i];
        upgrade.advance(dt);

        if upgrade.overlaps(&state.player) {
            let upgrade = state.weapon_upgrades.remove(i);
            state.player.upgrade_weapon(upgrade.kind);
            let center = upgrade.bounds().center();
            spawner::explode(&mut state.particles, center, WEAPON_PICKUP_PARTICLES, rng);
            log::debug!("Picked up {}", upgrade.kind.display_name());
            state.emit(GameEvent::WeaponCollected(upgrade.kind));
            continue;
        }
        if upgrade.is_off_screen(height) {
            state.weapon_upgrades.remove(i);
            continue;
        }
        i += 1;
    }
}

fn update_power_ups(state: &mut GameState, dt: f32, rng: &mut impl RandomSource) {
    let height = state.arena.y;
    let mut i = 0;
    while i < state.power_ups.len() {
        let power_up = &mut state.power_ups[i];
        power_up.advance(dt);

        if power_up.overlaps(&state.player) {
            let power_up = state.power_ups.remove(i);
            state.player.activate_power_up(power_up.kind);
            let center = power_up.bounds().center();
            spawner::explode(&mut state.particles, center, POWER_UP_PICKUP_PARTICLES, rng);
            log::debug!("Picked up {}", power_up.kind.display_name());
            state.emit(GameEvent::PowerUpCollected(power_up.kind));
            continue;
        }
        if power_up.is_off_screen(height) {
            state.power_ups.remove(i);
            continue;
        }
        i += 1;
    }
}

/// Move bullets and resolve bullet/asteroid hits.
/// Splitter fragments are staged and only join the field after the pass.
fn update_bullets(state: &mut GameState, dt: f32, rng: &mut impl RandomSource) {
    let mut fragments: Vec<Asteroid> = Vec::new();

    let mut i = 0;
    while i < state.bullets.len() {
        let bullet = &mut state.bullets[i];
        bullet.advance(dt);
        if bullet.is_off_screen() {
            state.bullets.remove(i);
            continue;
        }

        let bullet_pos = bullet.pos;
        let bullet_bounds = bullet.bounds();
        let Some(hit) = state
            .asteroids
            .iter()
            .position(|a| a.bounds().overlaps(&bullet_bounds))
        else {
            i += 1;
            continue;
        };

        state.bullets.remove(i);
        let asteroid = &mut state.asteroids[hit];
        if asteroid.take_damage(1) {
            let asteroid = state.asteroids.remove(hit);
            destroy_asteroid(state, &asteroid, &mut fragments, rng);
        } else {
            let kind = asteroid.kind;
            spawner::explode(&mut state.particles, bullet_pos, ASTEROID_HIT_PARTICLES, rng);
            state.emit(GameEvent::AsteroidHit {
                kind,
                pos: bullet_pos,
            });
        }
    }

    state.asteroids.extend(fragments);
}

fn destroy_asteroid(
    state: &mut GameState,
    asteroid: &Asteroid,
    fragments: &mut Vec<Asteroid>,
    rng: &mut impl RandomSource,
) {
    let center = asteroid.bounds().center();
    spawner::explode(&mut state.particles, center, ASTEROID_DESTROYED_PARTICLES, rng);

    if asteroid.kind == AsteroidKind::Splitter && asteroid.size > SPLITTER_MIN_SIZE {
        fragments.extend(spawner::splitter_fragments(asteroid.pos, rng));
    }

    state.stats.asteroids_destroyed += 1;
    state.player.increment_combo();
    let points = state
        .player
        .add_score(asteroid.kind.score_value() * state.difficulty.level);
    state.emit(GameEvent::AsteroidDestroyed {
        kind: asteroid.kind,
        pos: center,
        points,
    });

    if let KillOutcome::LevelUp {
        level,
        health_bonus,
    } = state.difficulty.record_kill()
    {
        log::info!(
            "Level {} reached (spawn interval {:.3}s, speed x{:.3})",
            level,
            state.difficulty.spawn_interval,
            state.difficulty.speed_multiplier
        );
        if health_bonus {
            state.player.add_health(1);
        }
        state.emit(GameEvent::LevelUp { level });
    }
}

fn update_asteroids(state: &mut GameState, dt: f32, dilation: f32, rng: &mut impl RandomSource) {
    let height = state.arena.y;
    let multiplier = state.difficulty.speed_multiplier * dilation;

    let mut i = 0;
    while i < state.asteroids.len() {
        let asteroid = &mut state.asteroids[i];
        asteroid.advance(dt, multiplier);

        if asteroid.overlaps(&state.player) {
            let asteroid = state.asteroids.remove(i);
            if state.player.take_damage(1) {
                state.emit(GameEvent::PlayerHit {
                    health: state.player.health,
                });
            } else {
                state.emit(GameEvent::PlayerHitBlocked);
            }
            let center = asteroid.bounds().center();
            spawner::explode(&mut state.particles, center, PLAYER_HIT_PARTICLES, rng);
            state
                .screen_shake
                .trigger(SCREEN_SHAKE_INTENSITY, SCREEN_SHAKE_DURATION);

            if !state.player.is_alive() && state.phase != GamePhase::GameOver {
                state.phase = GamePhase::GameOver;
                log::info!(
                    "Game over: score {}, level {}, destroyed {}, dodged {}",
                    state.player.score,
                    state.difficulty.level,
                    state.stats.asteroids_destroyed,
                    state.stats.asteroids_dodged
                );
                state.emit(GameEvent::GameOver {
                    score: state.player.score,
                    level: state.difficulty.level,
                });
            }
            continue;
        }

        if asteroid.is_off_screen(height) {
            state.asteroids.remove(i);
            state.stats.asteroids_dodged += 1;
            let points = state.player.add_score(2 * state.difficulty.level);
            state.emit(GameEvent::AsteroidDodged { points });
            continue;
        }
        i += 1;
    }
}

fn update_particles(state: &mut GameState, dt: f32) {
    for particle in &mut state.particles {
        particle.advance(dt);
    }
    state.particles.retain(|p| !p.is_expired());
}
