//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep only
//! - Injected RNG only
//! - Stable iteration order (insertion order of each entity list)
//! - No rendering or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod entities;
pub mod random;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Bounds, Rect, rects_overlap};
pub use difficulty::{Difficulty, KillOutcome};
pub use entities::{
    Asteroid, AsteroidKind, Bullet, Particle, Player, PowerUp, PowerUpKind, Star, StarLayer,
    TimedEffect, WeaponKind, WeaponUpgrade,
};
pub use random::{GameRng, RandomSource, ScriptedRandom};
pub use state::{GameEvent, GamePhase, GameState, Hud, ScreenShake, SessionStats, SpawnTimers};
pub use tick::tick;
