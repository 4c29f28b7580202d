//! Asteroid Dodger headless host
//!
//! Loads settings, seeds a session and drives the simulation at a fixed
//! timestep with the autopilot at the controls. Prints a JSON summary when
//! the session ends.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use asteroid_dodger::Settings;
use asteroid_dodger::autopilot;
use asteroid_dodger::input::InputTracker;
use asteroid_dodger::sim::{GameEvent, GamePhase, GameRng, GameState, tick};
use asteroid_dodger::time::{FixedTimestep, FrameClock};

#[derive(Parser, Debug)]
#[command(name = "asteroid-dodger")]
#[command(about = "Run a headless Asteroid Dodger session with the autopilot playing")]
struct Cli {
    /// JSON settings file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Session seed (overrides the settings file)
    #[arg(long)]
    seed: Option<u64>,
    /// Simulated seconds to run (overrides the settings file)
    #[arg(long)]
    seconds: Option<f32>,
    /// Pace the loop against the wall clock instead of running flat out
    #[arg(long, default_value_t = false)]
    realtime: bool,
    /// Stop at the first game over
    #[arg(long, default_value_t = false)]
    single: bool,
    /// Print the summary as pretty JSON
    #[arg(long, default_value_t = false)]
    pretty: bool,
}

#[derive(Debug, Serialize)]
struct SessionSummary {
    seed: u64,
    ticks: u64,
    simulated_seconds: f32,
    games_played: u32,
    best_score: u64,
    best_level: u32,
    final_phase: GamePhase,
    final_score: u64,
    final_level: u32,
    asteroids_destroyed: u32,
    asteroids_dodged: u32,
}

/// Owns the session and advances it one step at a time
struct Session {
    state: GameState,
    rng: GameRng,
    tracker: InputTracker,
    screen_shake: bool,
    dt: f32,
    ticks: u64,
    games_played: u32,
    best_score: u64,
    best_level: u32,
    destroyed: u32,
    dodged: u32,
}

impl Session {
    fn new(settings: &Settings, seed: u64) -> Self {
        let mut rng = GameRng::seeded(seed);
        let state = GameState::new(settings.arena(), &mut rng);
        Self {
            state,
            rng,
            tracker: InputTracker::new(),
            screen_shake: settings.effective_screen_shake(),
            dt: settings.tick_dt(),
            ticks: 0,
            games_played: 0,
            best_score: 0,
            best_level: 1,
            destroyed: 0,
            dodged: 0,
        }
    }

    /// Run one simulation step; returns true when a game just ended
    fn step(&mut self) -> bool {
        let held = autopilot::decide(&self.state);
        let input = self.tracker.advance(held);
        let before = self.state.phase;

        tick(&mut self.state, &input, self.dt, &mut self.rng);
        self.ticks += 1;

        if !self.screen_shake {
            self.state.screen_shake = Default::default();
        }
        if self.state.phase != before {
            log::debug!("Phase {:?} -> {:?}", before, self.state.phase);
        }

        let mut ended = false;
        for event in &self.state.events {
            match event {
                GameEvent::AsteroidDestroyed { .. } => self.destroyed += 1,
                GameEvent::AsteroidDodged { .. } => self.dodged += 1,
                GameEvent::LevelUp { level } => self.best_level = self.best_level.max(*level),
                GameEvent::GameOver { score, level } => {
                    self.games_played += 1;
                    self.best_score = self.best_score.max(*score);
                    self.best_level = self.best_level.max(*level);
                    ended = true;
                }
                _ => {}
            }
        }
        ended
    }

    fn summary(&self) -> SessionSummary {
        SessionSummary {
            seed: self.rng.seed(),
            ticks: self.ticks,
            simulated_seconds: self.ticks as f32 * self.dt,
            games_played: self.games_played,
            best_score: self.best_score.max(self.state.player.score),
            best_level: self.best_level,
            final_phase: self.state.phase,
            final_score: self.state.player.score,
            final_level: self.state.level(),
            asteroids_destroyed: self.destroyed,
            asteroids_dodged: self.dodged,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut settings = Settings::load_or_default(cli.config.as_deref())?;
    if let Some(seed) = cli.seed {
        settings.seed = Some(seed);
    }
    if let Some(seconds) = cli.seconds {
        settings.session_seconds = seconds;
    }
    settings.validate().context("invalid command line overrides")?;

    let seed = settings.seed.unwrap_or_else(rand::random::<u64>);
    log::info!(
        "Starting session: seed {seed:#018x}, arena {}x{}, {} Hz",
        settings.arena_width,
        settings.arena_height,
        settings.tick_rate_hz
    );

    let mut session = Session::new(&settings, seed);
    let total_ticks = (settings.session_seconds * settings.tick_rate_hz).round() as u64;

    if cli.realtime {
        run_realtime(&mut session, &settings, total_ticks, cli.single);
    } else {
        while session.ticks < total_ticks {
            if session.step() && cli.single {
                break;
            }
        }
    }

    let summary = session.summary();
    log::info!(
        "Session finished after {} ticks: best score {}, best level {}",
        summary.ticks,
        summary.best_score,
        summary.best_level
    );

    let json = if cli.pretty {
        serde_json::to_string_pretty(&summary)
    } else {
        serde_json::to_string(&summary)
    }
    .context("failed encoding session summary")?;
    println!("{json}");
    Ok(())
}

/// Fixed-step loop paced by the wall clock
fn run_realtime(session: &mut Session, settings: &Settings, total_ticks: u64, single: bool) {
    let mut clock = FrameClock::new();
    let mut timestep = FixedTimestep::new(settings.tick_dt(), settings.max_substeps);

    while session.ticks < total_ticks {
        let steps = timestep.advance(clock.tick());
        for _ in 0..steps {
            if session.step() && single {
                return;
            }
            if session.ticks >= total_ticks {
                return;
            }
        }
        std::thread::sleep(Duration::from_millis(1));
    }
}
