//! Number Runner entry point
//!
//! Headless driver: runs the simulation with the autopilot steering and logs
//! what a renderer would be told each frame.

use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Parser;

use number_runner::presentation::{FrameView, Presenter, present};
use number_runner::settings::{QualityPreset, Settings};
use number_runner::sim::{
    DestroyCause, GameConfig, GameEvent, GamePhase, GameState, HitEffect, TickInput, seeded, tick,
};

/// Rendered frame length the driver simulates
const FRAME_DT: f32 = 1.0 / 60.0;
/// Default run length (5 minutes of play)
const DEFAULT_FRAMES: u64 = 60 * 60 * 5;

#[derive(Debug, Parser)]
#[command(name = "number-runner", version)]
#[command(about = "Headless Number Runner: autopilot play with logged frames")]
struct Options {
    /// RNG seed for row generation
    #[arg(long, default_value_t = 0x5eed)]
    seed: u64,

    /// Frames to simulate before stopping
    #[arg(long, default_value_t = DEFAULT_FRAMES)]
    frames: u64,

    /// Gameplay config JSON (defaults when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Presentation settings JSON (defaults when omitted)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Quality preset: low, medium or high (overrides the settings file)
    #[arg(long, value_parser = parse_quality)]
    quality: Option<QualityPreset>,
}

fn parse_quality(s: &str) -> Result<QualityPreset, String> {
    QualityPreset::parse(s).ok_or_else(|| format!("unknown quality preset: {s}"))
}

/// Presenter that narrates frames through the logger
#[derive(Default)]
struct LogPresenter {
    last_score: i64,
    hits: u32,
}

impl Presenter for LogPresenter {
    fn present(&mut self, frame: &FrameView, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::ObstacleDestroyed {
                    cause: DestroyCause::Hit(effect),
                    pos,
                    ..
                } => {
                    self.hits += 1;
                    let tag = match effect {
                        HitEffect::Absorbed => "absorbed",
                        HitEffect::Halved => "halved",
                        HitEffect::Penalty => "penalty",
                        HitEffect::Overpowered => "overpowered",
                    };
                    log::debug!("Hit at ({:.1}, {:.1}): {}", pos.x, pos.z, tag);
                }
                GameEvent::PlayerMeshNeedsUpdate { score } => self.last_score = *score,
                GameEvent::VictoryWallSpawned { pos } => {
                    log::info!("Victory wall ahead at z={:.1}", pos.z)
                }
                GameEvent::VictoryParticleBurst { pos } => {
                    let points: usize = frame.bursts.iter().map(|b| b.points.len()).sum();
                    log::info!("Burst at z={:.1} ({} points drawn)", pos.z, points)
                }
                GameEvent::PhaseChanged { from, to } => {
                    log::info!("{:?} -> {:?} at z={:.1}", from, to, frame.player_pos.z)
                }
                _ => {}
            }
        }
    }
}

/// Game instance holding all state
struct Game {
    state: GameState,
    settings: Settings,
    input: TickInput,
    presenter: LogPresenter,
    continued: bool,
}

impl Game {
    fn new(options: &Options) -> Result<Self, Box<dyn Error>> {
        let config = match &options.config {
            Some(path) => GameConfig::from_json(&fs::read_to_string(path)?)?,
            None => GameConfig::default(),
        };
        let mut settings = match &options.settings {
            Some(path) => Settings::from_json(&fs::read_to_string(path)?)?,
            None => Settings::from_preset(options.quality.unwrap_or_default()),
        };
        if let Some(quality) = options.quality {
            settings.quality = quality;
        }
        let state = GameState::with_config(config, seeded(options.seed))?;
        Ok(Self {
            state,
            settings,
            input: TickInput {
                idle_mode: true,
                ..Default::default()
            },
            presenter: LogPresenter::default(),
            continued: false,
        })
    }

    /// Run one frame; returns false when the run is finished
    fn update(&mut self) -> bool {
        match self.state.phase {
            GamePhase::Idle => self.input.start = true,
            GamePhase::GameOver if self.state.pending_continue.is_none() => {
                // One continue per run, then start over
                if self.continued {
                    self.input.restart = true;
                    self.continued = false;
                } else {
                    self.input.continue_after_penalty = true;
                    self.continued = true;
                }
            }
            GamePhase::Victory if self.state.bursts.is_empty() => return false,
            _ => {}
        }

        tick(&mut self.state, &self.input, FRAME_DT);
        self.input.clear_one_shots();
        present(&mut self.state, &self.settings, &mut self.presenter);
        true
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = Options::parse();
    log::info!("Number Runner (headless) starting with seed {}", options.seed);

    let mut game = Game::new(&options)?;
    // No glyph system here; text is logged instead
    game.state.mark_glyphs_ready();

    let mut frames = 0;
    while frames < options.frames && game.update() {
        frames += 1;
    }

    log::info!(
        "Finished after {} frames: phase {:?}, score {}, {} hits, distance {:.0}",
        frames,
        game.state.phase,
        game.presenter.last_score,
        game.presenter.hits,
        -game.state.player.pos.z
    );
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser builds embed the library; there is no headless driver
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_defaults() {
        let options = Options::try_parse_from(["number-runner"]).expect("defaults parse");
        assert_eq!(options.seed, 0x5eed);
        assert_eq!(options.frames, DEFAULT_FRAMES);
        assert!(options.config.is_none());
        assert!(options.quality.is_none());
    }

    #[test]
    fn test_options_accept_inline_values() {
        let options = Options::try_parse_from([
            "number-runner",
            "--seed=5",
            "--frames",
            "120",
            "--quality",
            "LOW",
            "--config",
            "level.json",
        ])
        .expect("flags parse");
        assert_eq!(options.seed, 5);
        assert_eq!(options.frames, 120);
        assert_eq!(options.quality, Some(QualityPreset::Low));
        assert_eq!(options.config, Some(PathBuf::from("level.json")));
    }

    #[test]
    fn test_options_reject_unknown_quality() {
        assert!(Options::try_parse_from(["number-runner", "--quality", "ultra"]).is_err());
    }

    #[test]
    fn test_quality_flag_caps_bursts() {
        let options = Options::try_parse_from(["number-runner", "--quality", "low"]).expect("parse");
        let game = Game::new(&options).expect("game");
        assert_eq!(game.settings.max_particles(), 20);
    }
}
