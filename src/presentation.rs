//! Presentation adapter contract
//!
//! The simulation never reads rendering state. After each tick the driver
//! builds a [`FrameView`] and hands it, with the drained events, to a
//! [`Presenter`].

use glam::Vec3;

use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, ParticleBurst, RoadSegment, RowRng};

/// A particle burst as it should be drawn this frame
#[derive(Debug, Clone, PartialEq)]
pub struct BurstView {
    pub points: Vec<Vec3>,
    pub opacity: f32,
}

impl BurstView {
    /// Thin `burst` down to at most `max_points` samples
    pub fn capture(burst: &ParticleBurst, max_points: usize) -> Self {
        Self {
            points: burst
                .particles
                .iter()
                .take(max_points)
                .map(|p| p.pos)
                .collect(),
            opacity: burst.life.clamp(0.0, 1.0),
        }
    }
}

/// Per-frame snapshot a presenter renders from
#[derive(Debug, Clone, PartialEq)]
pub struct FrameView {
    pub player_pos: Vec3,
    pub score: i64,
    pub phase: GamePhase,
    /// Where the trailing camera is heading on z
    pub camera_target_z: f32,
    pub camera_pos: Vec3,
    pub camera_look_at: Vec3,
    /// Shake intensity after presentation settings
    pub shake: f32,
    pub road: Vec<RoadSegment>,
    /// Live bursts, capped by the particle preference
    pub bursts: Vec<BurstView>,
}

impl FrameView {
    pub fn capture<R: RowRng>(state: &GameState<R>, settings: &Settings) -> Self {
        let z = state.player.pos.z;
        Self {
            player_pos: state.player.pos,
            score: state.player.score,
            phase: state.phase,
            camera_target_z: state.camera.target_z(z),
            camera_pos: state.camera.pos,
            camera_look_at: state.camera.look_at(z),
            shake: settings.shake_intensity(state.screen_shake),
            road: state.road.segments().to_vec(),
            bursts: match settings.max_particles() {
                0 => Vec::new(),
                cap => state
                    .bursts
                    .iter()
                    .map(|burst| BurstView::capture(burst, cap))
                    .collect(),
            },
        }
    }
}

/// Renders frames; implemented outside the core
pub trait Presenter {
    fn present(&mut self, frame: &FrameView, events: &[GameEvent]);
}

/// Drain the session's events into `presenter` along with the current frame
pub fn present<R: RowRng, P: Presenter + ?Sized>(
    state: &mut GameState<R>,
    settings: &Settings,
    presenter: &mut P,
) {
    let frame = FrameView::capture(state, settings);
    let events = state.drain_events();
    presenter.present(&frame, &events);
}
