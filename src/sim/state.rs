//! Game session state and core simulation types
//!
//! One [`GameState`] owns everything a run mutates. The frame driver holds it
//! and hands it to [`super::tick`] once per frame.

use glam::Vec3;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::camera::CameraRig;
use super::collision::HitEffect;
use super::config::{ConfigError, GameConfig};
use super::level::LevelGenerator;
use super::obstacles::{ObstacleKind, ObstaclePool};
use super::phase::{GamePhase, Intent, TransitionError, transition};
use super::rng::{RowRng, seeded};
use super::road::RoadPool;
use crate::consts::{BURST_FADE_RATE, BURST_SPEED, BURST_SPREAD, PLAYER_HEIGHT};

/// The player's number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec3,
    /// Non-negative while running; goes negative only on the hit that ends the run
    pub score: i64,
}

impl Player {
    pub fn new(score: i64) -> Self {
        Self {
            pos: Vec3::new(0.0, PLAYER_HEIGHT, 0.0),
            score,
        }
    }
}

/// The milestone wall spawned once the target score is reached
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VictoryWall {
    pub pos: Vec3,
}

/// One point of a particle burst
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec3,
    pub vel: Vec3,
}

/// Short-lived burst of outward-moving points, fading as `life` drops to 0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleBurst {
    pub particles: Vec<Particle>,
    /// 0-1, doubles as opacity
    pub life: f32,
}

impl ParticleBurst {
    pub fn new<R: RowRng + ?Sized>(center: Vec3, count: usize, rng: &mut R) -> Self {
        let mut jitter = || rng.unit() - 0.5;
        let particles = (0..count)
            .map(|_| {
                let pos = center + Vec3::new(jitter(), jitter(), jitter()) * BURST_SPREAD;
                let vel = Vec3::new(jitter(), jitter(), jitter()) * BURST_SPEED;
                Particle { pos, vel }
            })
            .collect();
        Self { particles, life: 1.0 }
    }

    /// Fade and move; returns false once the burst should be discarded
    pub fn update(&mut self, dt: f32) -> bool {
        self.life -= dt * BURST_FADE_RATE;
        if self.life <= 0.0 {
            return false;
        }
        for particle in &mut self.particles {
            particle.pos += particle.vel * dt;
        }
        true
    }
}

/// Why an obstacle left the road
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestroyCause {
    Hit(HitEffect),
    Offscreen,
}

/// Discrete notifications for the presenter, drained after each tick
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    ObstacleSpawned {
        id: u32,
        pos: Vec3,
        kind: ObstacleKind,
        value: i64,
    },
    ObstacleDestroyed {
        id: u32,
        pos: Vec3,
        kind: ObstacleKind,
        cause: DestroyCause,
    },
    VictoryWallSpawned {
        pos: Vec3,
    },
    VictoryParticleBurst {
        pos: Vec3,
    },
    PlayerMeshNeedsUpdate {
        score: i64,
    },
    PhaseChanged {
        from: GamePhase,
        to: GamePhase,
    },
    /// Everything on the road was cleared and the road re-tiled
    LevelReset,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState<R: RowRng = Pcg32> {
    pub config: GameConfig,
    pub rng: R,
    pub phase: GamePhase,
    pub player: Player,
    pub obstacles: ObstaclePool,
    pub road: RoadPool,
    pub level: LevelGenerator,
    pub victory_wall: Option<VictoryWall>,
    /// Visual particles (not gameplay-affecting)
    pub bursts: Vec<ParticleBurst>,
    pub camera: CameraRig,
    /// Camera shake intensity, decays to 0
    pub screen_shake: f32,
    /// Seconds left before a continue-after-penalty takes effect
    pub pending_continue: Option<f32>,
    /// Simulated frames while running in the current level
    pub time_ticks: u64,
    glyphs_ready: bool,
    events: Vec<GameEvent>,
}

impl GameState<Pcg32> {
    /// Session with default config and a seeded RNG
    pub fn new(seed: u64) -> Self {
        Self::from_parts(GameConfig::default(), seeded(seed))
    }
}

impl<R: RowRng> GameState<R> {
    /// Session with an injected config and RNG
    pub fn with_config(config: GameConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_parts(config, rng))
    }

    fn from_parts(config: GameConfig, rng: R) -> Self {
        let road = RoadPool::new(config.chunk_length, config.num_chunks);
        Self {
            player: Player::new(config.start_score),
            road,
            config,
            rng,
            phase: GamePhase::Idle,
            obstacles: ObstaclePool::new(),
            level: LevelGenerator::new(),
            victory_wall: None,
            bursts: Vec::new(),
            camera: CameraRig::default(),
            screen_shake: 0.0,
            pending_continue: None,
            time_ticks: 0,
            glyphs_ready: false,
            events: Vec::new(),
        }
    }

    pub fn glyphs_ready(&self) -> bool {
        self.glyphs_ready
    }

    /// Glyph system is up: obstacle and mesh creation may proceed
    pub fn mark_glyphs_ready(&mut self) {
        if self.glyphs_ready {
            return;
        }
        self.glyphs_ready = true;
        log::info!("Glyphs ready");
        self.notify_score();
    }

    /// Ask for a phase change on behalf of the player
    pub fn request(&mut self, intent: Intent) -> Result<(), TransitionError> {
        let to = transition(self.phase, intent)?;
        match intent {
            Intent::Restart | Intent::NextLevel => {
                self.reset();
                self.set_phase(to);
            }
            Intent::ContinueAfterPenalty => {
                if self.pending_continue.is_some() {
                    return Err(TransitionError::Illegal {
                        from: self.phase,
                        intent,
                    });
                }
                self.pending_continue = Some(self.config.continue_delay);
                log::info!("Continue armed ({}s)", self.config.continue_delay);
            }
            _ => self.set_phase(to),
        }
        Ok(())
    }

    /// Clear the road and return to the start of the level
    pub fn reset(&mut self) {
        self.player = Player::new(self.config.start_score);
        self.obstacles.clear();
        self.victory_wall = None;
        self.bursts.clear();
        self.screen_shake = 0.0;
        self.pending_continue = None;
        self.time_ticks = 0;
        self.road.reset();
        self.level.reset();
        self.camera.reset();
        self.events.push(GameEvent::LevelReset);
        self.notify_score();
        log::info!("Level reset");
    }

    pub(crate) fn set_phase(&mut self, to: GamePhase) {
        let from = self.phase;
        if from == to {
            return;
        }
        self.phase = to;
        log::info!("Phase {:?} -> {:?} (score {})", from, to, self.player.score);
        self.events.push(GameEvent::PhaseChanged { from, to });
    }

    /// Tell the presenter the player's number changed
    pub(crate) fn notify_score(&mut self) {
        if self.glyphs_ready {
            self.events.push(GameEvent::PlayerMeshNeedsUpdate {
                score: self.player.score,
            });
        }
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Whether the victory sequence has begun (row generation is suspended)
    pub fn victory_active(&self) -> bool {
        self.victory_wall.is_some() || self.phase == GamePhase::Victory
    }

    /// Events produced since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::ScriptedRng;

    #[test]
    fn test_new_session() {
        let state = GameState::new(12345);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.player.score, 1);
        assert_eq!(state.road.segments().len(), 4);
        assert!(state.obstacles.is_empty());
        assert!(!state.glyphs_ready());
    }

    #[test]
    fn test_glyph_readiness_announces_score_once() {
        let mut state = GameState::new(1);
        state.notify_score();
        assert!(state.events().is_empty());
        state.mark_glyphs_ready();
        state.mark_glyphs_ready();
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::PlayerMeshNeedsUpdate { score: 1 }]
        );
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GameConfig {
            row_spacing: 0.0,
            ..GameConfig::default()
        };
        assert!(GameState::with_config(config, ScriptedRng::default()).is_err());
    }

    #[test]
    fn test_continue_cannot_be_armed_twice() {
        let mut state = GameState::new(1);
        state.request(Intent::Start).expect("start");
        state.set_phase(GamePhase::GameOver);
        state.request(Intent::ContinueAfterPenalty).expect("armed");
        assert!(state.request(Intent::ContinueAfterPenalty).is_err());
        // Phase changes only when the timer fires
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_reset_clears_frame_counter() {
        let mut state = GameState::new(1);
        state.time_ticks = 600;
        state.reset();
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_particle_burst_fades_in_half_a_second() {
        let mut rng = ScriptedRng::new([0.0, 0.25, 0.5, 0.75]);
        let mut burst = ParticleBurst::new(Vec3::new(0.0, 2.0, -100.0), 80, &mut rng);
        assert_eq!(burst.particles.len(), 80);
        assert!(
            burst
                .particles
                .iter()
                .all(|p| (p.pos - Vec3::new(0.0, 2.0, -100.0)).abs().max_element() <= 1.0)
        );
        assert!(burst.update(0.2));
        assert!((burst.life - 0.6).abs() < 1e-5);
        assert!(!burst.update(0.4));
        assert!(burst.life <= 0.0);
    }
}
