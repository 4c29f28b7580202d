//! Attract-mode autopilot
//!
//! A simple controller that plays the game from the current state. It keeps
//! shooting, sidesteps the most threatening asteroid and otherwise drifts
//! toward the nearest pickup. Used by the headless host and for demo runs.

use glam::Vec2;

use crate::input::{Action, ActionSet};
use crate::sim::collision::Bounds;
use crate::sim::{GamePhase, GameState};

/// How far above the ship an asteroid counts as a threat (pixels)
const THREAT_RANGE: f32 = 260.0;
/// Horizontal slack around the ship when judging a threat
const THREAT_MARGIN: f32 = 24.0;
/// Dead zone for horizontal tracking
const TRACK_DEAD_ZONE: f32 = 6.0;

/// Held actions the autopilot wants for this tick
pub fn decide(state: &GameState) -> ActionSet {
    match state.phase {
        // Neither is held while playing, so both arrive as fresh presses
        GamePhase::Menu => ActionSet::of(&[Action::Start]),
        GamePhase::GameOver => ActionSet::of(&[Action::Restart]),
        GamePhase::Paused => ActionSet::EMPTY,
        GamePhase::Playing => steer(state),
    }
}

fn steer(state: &GameState) -> ActionSet {
    let mut held = ActionSet::of(&[Action::Shoot]);
    let ship = state.player.bounds();
    let ship_center = ship.center();

    // Most dangerous asteroid: the lowest one falling into the ship's column
    let threat = state
        .asteroids
        .iter()
        .filter(|a| {
            let r = a.bounds();
            let above = r.bottom() <= ship.bottom() && ship.pos.y - r.bottom() < THREAT_RANGE;
            let in_column = r.pos.x < ship.right() + THREAT_MARGIN
                && r.right() > ship.pos.x - THREAT_MARGIN;
            above && in_column
        })
        .max_by(|a, b| {
            a.pos
                .y
                .partial_cmp(&b.pos.y)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    let target_x = if let Some(asteroid) = threat {
        // Step away from the side the asteroid leans to
        let center = asteroid.bounds().center();
        let go_left = if center.x > ship_center.x {
            true
        } else if center.x < ship_center.x {
            false
        } else {
            ship_center.x > state.arena.x * 0.5
        };
        let clearance = asteroid.size * 0.5 + ship.size.x;
        if go_left {
            center.x - clearance
        } else {
            center.x + clearance
        }
    } else if let Some(pickup) = nearest_pickup(state, ship_center) {
        pickup.x
    } else {
        // Idle around the middle, sweeping slowly so shots cover the field
        let sweep = (state.time_ticks as f32 * 0.01).sin() * state.arena.x * 0.3;
        state.arena.x * 0.5 + sweep
    };

    let dx = target_x - ship_center.x;
    if dx < -TRACK_DEAD_ZONE {
        held.insert(Action::Left);
    } else if dx > TRACK_DEAD_ZONE {
        held.insert(Action::Right);
    }
    held
}

/// Centre of the closest falling pickup of either kind
fn nearest_pickup(state: &GameState, from: Vec2) -> Option<Vec2> {
    let weapons = state.weapon_upgrades.iter().map(|w| w.bounds().center());
    let power_ups = state.power_ups.iter().map(|p| p.bounds().center());
    weapons
        .chain(power_ups)
        .filter(|c| c.y < from.y)
        .min_by(|a, b| {
            a.distance_squared(from)
                .partial_cmp(&b.distance_squared(from))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entities::{Asteroid, AsteroidKind, PowerUp, PowerUpKind};
    use crate::sim::random::{GameRng, ScriptedRandom};

    fn playing() -> GameState {
        let mut state = GameState::new(Vec2::new(800.0, 600.0), &mut GameRng::seeded(1));
        state.phase = GamePhase::Playing;
        state
    }

    fn asteroid_at(x: f32, y: f32) -> Asteroid {
        Asteroid::spawn(Vec2::new(x, y), AsteroidKind::Normal, &mut ScriptedRandom::new())
    }

    #[test]
    fn test_menu_and_game_over() {
        let mut state = playing();
        state.phase = GamePhase::Menu;
        assert!(decide(&state).contains(Action::Start));
        state.phase = GamePhase::GameOver;
        assert!(decide(&state).contains(Action::Restart));
        state.phase = GamePhase::Paused;
        assert!(decide(&state).is_empty());
    }

    #[test]
    fn test_always_shoots_while_playing() {
        let state = playing();
        assert!(decide(&state).contains(Action::Shoot));
    }

    #[test]
    fn test_dodges_asteroid_overhead() {
        let mut state = playing();
        // Ship centre is x = 400; put an asteroid slightly to its right
        let mut asteroid = asteroid_at(400.0, 400.0);
        asteroid.size = 30.0;
        state.asteroids.push(asteroid);

        let held = decide(&state);
        assert!(held.contains(Action::Left));
        assert!(!held.contains(Action::Right));
    }

    #[test]
    fn test_ignores_asteroids_outside_column() {
        let mut state = playing();
        state.asteroids.push(asteroid_at(20.0, 400.0));
        state
            .power_ups
            .push(PowerUp::new(Vec2::new(700.0, 100.0), PowerUpKind::Shield));

        let held = decide(&state);
        assert!(held.contains(Action::Right));
    }
}
