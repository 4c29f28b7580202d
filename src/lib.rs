//! Asteroid Dodger - a falling-asteroid arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, collisions, game state)
//! - `input`: Held / just-pressed action tracking and default key bindings
//! - `time`: Frame clock and fixed timestep accumulator
//! - `settings`: Host configuration loaded from JSON
//! - `autopilot`: Attract-mode controller used by the headless host

pub mod autopilot;
pub mod input;
pub mod settings;
pub mod sim;
pub mod time;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (144 Hz)
    pub const SIM_DT: f32 = 1.0 / 144.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the accumulator will accept (seconds)
    pub const MAX_FRAME_TIME: f32 = 0.1;

    /// Default arena dimensions (pixels)
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 32.0;
    pub const PLAYER_SPEED: f32 = 400.0;
    /// Distance of the spawn point above the bottom edge
    pub const PLAYER_SPAWN_OFFSET: f32 = 80.0;
    pub const PLAYER_START_HEALTH: u8 = 3;
    pub const PLAYER_MAX_HEALTH: u8 = 5;
    pub const INVULNERABILITY_TIME: f32 = 2.0;
    pub const COMBO_WINDOW: f32 = 1.5;
    pub const WEAPON_UPGRADE_DURATION: f32 = 15.0;

    /// Bullets
    pub const BULLET_SPEED: f32 = 800.0;
    pub const BULLET_WIDTH: f32 = 4.0;
    pub const BULLET_HEIGHT: f32 = 12.0;

    /// Falling pickups
    pub const POWER_UP_SIZE: f32 = 20.0;
    pub const POWER_UP_FALL_SPEED: f32 = 120.0;
    pub const WEAPON_UPGRADE_SIZE: f32 = 24.0;
    pub const WEAPON_UPGRADE_FALL_SPEED: f32 = 100.0;

    /// Spawn positions: horizontal margin and heights above the top edge
    pub const SPAWN_MARGIN: f32 = 50.0;
    pub const SPAWN_Y: f32 = -50.0;
    pub const STAR_SPAWN_Y: f32 = -5.0;
    /// Vertical gap between stacked multi-spawn asteroids
    pub const MULTI_SPAWN_STACK: f32 = 30.0;

    /// Spawn timing
    pub const INITIAL_SPAWN_INTERVAL: f32 = 1.5;
    pub const MIN_SPAWN_INTERVAL: f32 = 0.2;
    /// Floor for the spawn interval past level 10 (0.3 x minimum)
    pub const LATE_MIN_SPAWN_INTERVAL: f32 = 0.06;
    pub const WEAPON_SPAWN_INTERVAL: f32 = 15.0;
    pub const POWER_UP_SPAWN_INTERVAL: f32 = 12.0;
    pub const STAR_SPAWN_INTERVAL: f32 = 0.05;
    pub const MAX_STARS: usize = 128;
    pub const INITIAL_STARS: usize = 80;

    /// Difficulty curve
    pub const DIFFICULTY_STEP_TIME: f32 = 5.0;
    pub const DIFFICULTY_STEP: f32 = 0.05;
    pub const ASTEROIDS_PER_LEVEL: u32 = 15;
    pub const LEVEL_SPEED_MULTIPLIER: f32 = 1.15;
    pub const LEVEL_SPAWN_REDUCTION: f32 = 0.85;
    pub const LATE_LEVEL_SPAWN_REDUCTION: f32 = 0.95;
    /// Last level that still speeds asteroids up
    pub const SPEED_CAP_LEVEL: u32 = 10;
    pub const HEALTH_BONUS_EVERY: u32 = 10;

    /// Splitters
    pub const SPLITTER_MIN_SIZE: f32 = 20.0;
    pub const SPLITTER_RING_RADIUS: f32 = 20.0;

    /// Screen shake on player hit
    pub const SCREEN_SHAKE_INTENSITY: f32 = 15.0;
    pub const SCREEN_SHAKE_DURATION: f32 = 0.3;
    pub const SCREEN_SHAKE_DECAY: f32 = 0.9;

    /// Slow motion time dilation
    pub const SLOW_MOTION_FACTOR: f32 = 0.5;

    /// Explosion sizes (particle counts)
    pub const WEAPON_PICKUP_PARTICLES: usize = 10;
    pub const POWER_UP_PICKUP_PARTICLES: usize = 15;
    pub const ASTEROID_DESTROYED_PARTICLES: usize = 15;
    pub const ASTEROID_HIT_PARTICLES: usize = 5;
    pub const PLAYER_HIT_PARTICLES: usize = 20;
}
