//! Game state and core simulation types
//!
//! Everything a renderer needs to draw a frame lives here as plain data.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::difficulty::Difficulty;
use super::entities::{
    Asteroid, AsteroidKind, Bullet, Particle, Player, PowerUp, PowerUpKind, Star, WeaponKind,
    WeaponUpgrade,
};
use super::random::RandomSource;
use super::spawner;
use crate::consts::*;

/// Top-level game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, stars animate but nothing else runs
    Menu,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Run ended, waiting for restart
    GameOver,
}

/// Gameplay events raised during a tick (for audio, HUD pops, logging)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    AsteroidHit { kind: AsteroidKind, pos: Vec2 },
    AsteroidDestroyed { kind: AsteroidKind, pos: Vec2, points: u32 },
    AsteroidDodged { points: u32 },
    PlayerHit { health: u8 },
    /// A hit absorbed by the shield or invulnerability window
    PlayerHitBlocked,
    PowerUpCollected(PowerUpKind),
    WeaponCollected(WeaponKind),
    LevelUp { level: u32 },
    GameOver { score: u64, level: u32 },
}

/// Screen shake applied by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenShake {
    pub intensity: f32,
    pub timer: f32,
}

impl ScreenShake {
    pub fn trigger(&mut self, intensity: f32, duration: f32) {
        self.intensity = intensity;
        self.timer = duration;
    }

    /// Decay multiplicatively while the timer runs, zero out when it ends
    pub fn decay(&mut self, dt: f32) {
        if self.timer <= 0.0 {
            return;
        }
        self.timer = (self.timer - dt).max(0.0);
        self.intensity *= SCREEN_SHAKE_DECAY;
        if self.timer == 0.0 {
            self.intensity = 0.0;
        }
    }

    pub fn is_active(&self) -> bool {
        self.timer > 0.0
    }
}

/// Spawn timers. Asteroid and star timers count up; pickup timers count down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnTimers {
    pub asteroid: f32,
    pub weapon_upgrade: f32,
    pub power_up: f32,
    pub star: f32,
}

impl Default for SpawnTimers {
    fn default() -> Self {
        Self {
            asteroid: 0.0,
            weapon_upgrade: WEAPON_SPAWN_INTERVAL,
            power_up: POWER_UP_SPAWN_INTERVAL,
            star: 0.0,
        }
    }
}

/// Session-wide counters shown on the game over screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionStats {
    pub asteroids_destroyed: u32,
    pub asteroids_dodged: u32,
}

/// Read-only HUD view of the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hud {
    pub phase: GamePhase,
    pub level: u32,
    pub score: u64,
    pub health: u8,
    pub combo: u32,
    pub weapon: WeaponKind,
    /// Remaining weapon time, `None` while on the default weapon
    pub weapon_time: Option<f32>,
    pub shield_time: Option<f32>,
    pub score_multiplier_time: Option<f32>,
    pub slow_motion_time: Option<f32>,
    pub invulnerable: bool,
}

/// Complete game state for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Arena size in pixels
    pub arena: Vec2,
    pub phase: GamePhase,
    pub player: Player,
    pub asteroids: Vec<Asteroid>,
    pub bullets: Vec<Bullet>,
    pub particles: Vec<Particle>,
    pub stars: Vec<Star>,
    pub power_ups: Vec<PowerUp>,
    pub weapon_upgrades: Vec<WeaponUpgrade>,
    pub difficulty: Difficulty,
    pub spawn_timers: SpawnTimers,
    pub stats: SessionStats,
    pub screen_shake: ScreenShake,
    /// Ticks simulated while playing
    pub time_ticks: u64,
    /// Events raised by the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new session in the menu with a pre-filled star field
    pub fn new(arena: Vec2, rng: &mut impl RandomSource) -> Self {
        Self {
            arena,
            phase: GamePhase::Menu,
            player: Player::new(Player::spawn_point(arena)),
            asteroids: Vec::new(),
            bullets: Vec::new(),
            particles: Vec::new(),
            stars: spawner::initial_star_field(arena, rng),
            power_ups: Vec::new(),
            weapon_upgrades: Vec::new(),
            difficulty: Difficulty::default(),
            spawn_timers: SpawnTimers::default(),
            stats: SessionStats::default(),
            screen_shake: ScreenShake::default(),
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    /// Start a fresh session in the same arena, back in the menu
    pub fn reset(&mut self, rng: &mut impl RandomSource) {
        log::info!(
            "Resetting session (previous score {}, level {})",
            self.player.score,
            self.difficulty.level
        );
        *self = Self::new(self.arena, rng);
    }

    pub fn level(&self) -> u32 {
        self.difficulty.level
    }

    /// Time dilation applied to asteroids (slow motion halves their speed)
    pub fn time_dilation(&self) -> f32 {
        if self.player.slow_motion.active {
            SLOW_MOTION_FACTOR
        } else {
            1.0
        }
    }

    pub fn hud(&self) -> Hud {
        let timer = |active: bool, remaining: f32| active.then_some(remaining);
        let p = &self.player;
        Hud {
            phase: self.phase,
            level: self.difficulty.level,
            score: p.score,
            health: p.health,
            combo: p.combo,
            weapon: p.weapon,
            weapon_time: timer(p.weapon_timer > 0.0, p.weapon_timer),
            shield_time: timer(p.shield.active, p.shield.remaining),
            score_multiplier_time: timer(p.score_multiplier.active, p.score_multiplier.remaining),
            slow_motion_time: timer(p.slow_motion.active, p.slow_motion.remaining),
            invulnerable: p.invulnerable,
        }
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::random::GameRng;

    #[test]
    fn test_new_session_defaults() {
        let state = GameState::new(Vec2::new(800.0, 600.0), &mut GameRng::seeded(1));
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.player.pos, Vec2::new(384.0, 520.0));
        assert_eq!(state.stars.len(), INITIAL_STARS);
        assert!(state.asteroids.is_empty());
        assert_eq!(state.level(), 1);
        assert_eq!(state.spawn_timers.weapon_upgrade, WEAPON_SPAWN_INTERVAL);
        assert_eq!(state.spawn_timers.power_up, POWER_UP_SPAWN_INTERVAL);
    }

    #[test]
    fn test_screen_shake_decays_to_zero() {
        let mut shake = ScreenShake::default();
        shake.trigger(15.0, 0.3);
        shake.decay(0.1);
        assert!((shake.intensity - 13.5).abs() < 1e-5);
        assert!(shake.is_active());
        shake.decay(0.5);
        assert_eq!(shake.timer, 0.0);
        assert_eq!(shake.intensity, 0.0);
        // Stays stopped
        shake.decay(0.1);
        assert_eq!(shake.intensity, 0.0);
    }

    #[test]
    fn test_hud_reports_active_timers() {
        let mut state = GameState::new(Vec2::new(800.0, 600.0), &mut GameRng::seeded(1));
        let hud = state.hud();
        assert_eq!(hud.shield_time, None);
        assert_eq!(hud.weapon_time, None);

        state.player.activate_power_up(PowerUpKind::Shield);
        state.player.upgrade_weapon(WeaponKind::Triple);
        let hud = state.hud();
        assert_eq!(hud.shield_time, Some(10.0));
        assert_eq!(hud.weapon, WeaponKind::Triple);
        assert_eq!(hud.weapon_time, Some(WEAPON_UPGRADE_DURATION));
    }
}
