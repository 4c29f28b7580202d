//! Level progression and spawn-rate curve

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Outcome of recording a kill
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KillOutcome {
    SameLevel,
    /// Reached a new level; `health_bonus` is set on every 10th level
    LevelUp { level: u32, health_bonus: bool },
}

/// Level, kill tracking, spawn interval and asteroid speed multiplier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    pub level: u32,
    pub destroyed_this_level: u32,
    /// Seconds between asteroid spawns
    pub spawn_interval: f32,
    /// Global asteroid speed multiplier
    pub speed_multiplier: f32,
    /// Accumulated time toward the next interval reduction
    pub timer: f32,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self {
            level: 1,
            destroyed_this_level: 0,
            spawn_interval: INITIAL_SPAWN_INTERVAL,
            speed_multiplier: 1.0,
            timer: 0.0,
        }
    }
}

impl Difficulty {
    /// Time-based ramp: every 5 s shave a fixed step off the spawn interval.
    /// Floored at the early minimum at every level, so a late-level interval
    /// below it is raised back up when the ramp fires.
    pub fn advance_timer(&mut self, dt: f32) {
        self.timer += dt;
        if self.timer >= DIFFICULTY_STEP_TIME {
            self.timer = 0.0;
            self.spawn_interval = (self.spawn_interval - DIFFICULTY_STEP).max(MIN_SPAWN_INTERVAL);
        }
    }

    /// Count a destroyed asteroid, levelling up every 15 kills
    pub fn record_kill(&mut self) -> KillOutcome {
        self.destroyed_this_level += 1;
        if self.destroyed_this_level < ASTEROIDS_PER_LEVEL {
            return KillOutcome::SameLevel;
        }
        self.advance_level();
        KillOutcome::LevelUp {
            level: self.level,
            health_bonus: self.level.is_multiple_of(HEALTH_BONUS_EVERY),
        }
    }

    fn advance_level(&mut self) {
        self.level += 1;
        self.destroyed_this_level = 0;

        if self.level <= SPEED_CAP_LEVEL {
            self.speed_multiplier *= LEVEL_SPEED_MULTIPLIER;
            self.spawn_interval =
                (self.spawn_interval * LEVEL_SPAWN_REDUCTION).max(MIN_SPAWN_INTERVAL);
        } else {
            // Speed stays frozen; only spawn rate keeps climbing
            self.spawn_interval =
                (self.spawn_interval * LATE_LEVEL_SPAWN_REDUCTION).max(LATE_MIN_SPAWN_INTERVAL);
        }

        // Avoid stacking the time-based reduction on top of the level-up one
        self.timer = 0.0;
    }
}
