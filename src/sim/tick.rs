//! Per-frame simulation step
//!
//! Core game loop that advances the session by one rendered frame.

use super::collision::{self, apply_hit, hit_radius};
use super::obstacles::Obstacle;
use super::phase::{GamePhase, Intent, transition};
use super::rng::RowRng;
use super::state::{DestroyCause, GameEvent, GameState, ParticleBurst, VictoryWall};
use crate::consts::ROAD_WIDTH;
use crate::distance_xz;
use glam::Vec3;

/// Autopilot lateral speed (units/s)
const AUTOPILOT_SPEED: f32 = 20.0;
/// Autopilot only reacts to rows this close ahead
const AUTOPILOT_LOOKAHEAD: f32 = 30.0;
/// Height the victory wall stands at
const VICTORY_WALL_HEIGHT: f32 = 2.0;

/// Input for a single frame, consumed at the frame boundary
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Lateral movement in world units, already sensitivity-adjusted
    pub lateral_delta: f32,
    pub start: bool,
    pub pause: bool,
    pub resume: bool,
    /// Retry after game over
    pub restart: bool,
    /// Move on after victory
    pub next_level: bool,
    /// Restore the run after a short delay, keeping progress
    pub continue_after_penalty: bool,
    /// Idle/demo mode - autopilot steers the player
    pub idle_mode: bool,
}

impl TickInput {
    /// Clear one-shot inputs after they were processed
    pub fn clear_one_shots(&mut self) {
        self.lateral_delta = 0.0;
        self.start = false;
        self.pause = false;
        self.resume = false;
        self.restart = false;
        self.next_level = false;
        self.continue_after_penalty = false;
    }

    fn intents(&self) -> impl Iterator<Item = Intent> {
        [
            (self.start, Intent::Start),
            (self.pause, Intent::Pause),
            (self.resume, Intent::Resume),
            (self.restart, Intent::Restart),
            (self.next_level, Intent::NextLevel),
            (self.continue_after_penalty, Intent::ContinueAfterPenalty),
        ]
        .into_iter()
        .filter_map(|(set, intent)| set.then_some(intent))
    }
}

/// Map a horizontal pointer drag in pixels to a lateral world delta
pub fn drag_to_world_delta(dx_px: f32, viewport_width_px: f32, sensitivity: f32) -> f32 {
    if viewport_width_px <= 0.0 {
        return 0.0;
    }
    dx_px / viewport_width_px * ROAD_WIDTH * sensitivity
}

/// Advance the session by one frame of `dt` seconds
pub fn tick<R: RowRng>(state: &mut GameState<R>, input: &TickInput, dt: f32) {
    for intent in input.intents() {
        if let Err(err) = state.request(intent) {
            log::debug!("Ignored intent: {}", err);
        }
    }

    if state.phase.simulates() {
        simulate(state, input, dt);
    }

    // Cosmetic timers run in every phase
    advance_effects(state, dt);
}

fn simulate<R: RowRng>(state: &mut GameState<R>, input: &TickInput, dt: f32) {
    state.time_ticks += 1;

    let lateral = if input.idle_mode {
        autopilot_delta(state, dt)
    } else {
        input.lateral_delta
    };
    state.player.pos.x = state.config.clamp_x(state.player.pos.x + lateral);
    state.player.pos.z -= state.config.run_speed * dt;

    recycle_road(state);
    generate_level(state);
    remove_offscreen(state);
    resolve_collisions(state);
    if state.phase == GamePhase::Running {
        resolve_victory_wall(state);
    }

    state.camera.follow(state.player.pos.z);
}

fn recycle_road<R: RowRng>(state: &mut GameState<R>) {
    let camera_z = state.camera.target_z(state.player.pos.z);
    let Some(segment) = state.road.recycle(camera_z, state.config.recycle_margin()) else {
        return;
    };
    // No more rows once the wall is out
    if !state.glyphs_ready() || state.victory_active() {
        return;
    }
    let before = state.obstacles.len();
    state.level.spawn_range(
        segment.back_z,
        segment.front_z,
        &state.config,
        &mut state.obstacles,
        &mut state.rng,
    );
    announce_spawns(state, before);
}

fn generate_level<R: RowRng>(state: &mut GameState<R>) {
    // Creation is skipped, not lost: the cursor waits for glyphs
    if !state.glyphs_ready() {
        return;
    }

    if state.victory_wall.is_none()
        && state.phase == GamePhase::Running
        && state.player.score >= state.config.victory_target
    {
        let pos = Vec3::new(
            0.0,
            VICTORY_WALL_HEIGHT,
            state.player.pos.z - state.config.victory_wall_ahead,
        );
        state.victory_wall = Some(VictoryWall { pos });
        state.push_event(GameEvent::VictoryWallSpawned { pos });
        log::info!("Victory wall spawned at z={} (score {})", pos.z, state.player.score);
    }
    if state.victory_active() {
        return;
    }

    let before = state.obstacles.len();
    state.level.advance(
        state.player.pos.z,
        &state.config,
        &mut state.obstacles,
        &mut state.rng,
    );
    announce_spawns(state, before);
}

fn announce_spawns<R: RowRng>(state: &mut GameState<R>, before: usize) {
    let spawned: Vec<GameEvent> = state.obstacles.as_slice()[before..]
        .iter()
        .map(|o| GameEvent::ObstacleSpawned {
            id: o.id,
            pos: o.pos,
            kind: o.kind,
            value: o.value,
        })
        .collect();
    for event in spawned {
        state.push_event(event);
    }
}

fn destroyed(obstacle: &Obstacle, cause: DestroyCause) -> GameEvent {
    GameEvent::ObstacleDestroyed {
        id: obstacle.id,
        pos: obstacle.pos,
        kind: obstacle.kind,
        cause,
    }
}

fn remove_offscreen<R: RowRng>(state: &mut GameState<R>) {
    let removed = collision::remove_offscreen(state.player.pos.z, &mut state.obstacles, &state.config);
    for obstacle in &removed {
        state.push_event(destroyed(obstacle, DestroyCause::Offscreen));
    }
}

fn resolve_collisions<R: RowRng>(state: &mut GameState<R>) {
    let resolution = collision::resolve(&mut state.player, &mut state.obstacles, &state.config);
    if resolution.hits.is_empty() {
        return;
    }

    for hit in &resolution.hits {
        state.push_event(destroyed(&hit.obstacle, DestroyCause::Hit(hit.effect)));
    }
    if resolution.shake() {
        state.screen_shake = state.config.shake_amount;
    }
    state.notify_score();

    if resolution.game_over {
        if let Ok(to) = transition(state.phase, Intent::Underflow) {
            state.set_phase(to);
        }
    }
}

fn resolve_victory_wall<R: RowRng>(state: &mut GameState<R>) {
    let Some(wall) = state.victory_wall else {
        return;
    };
    if distance_xz(state.player.pos, wall.pos) >= state.config.victory_wall_radius {
        return;
    }

    // Wall is taken out before anything else so contact fires once
    state.victory_wall = None;
    let burst = ParticleBurst::new(wall.pos, state.config.burst_particles, &mut state.rng);
    state.bursts.push(burst);
    state.push_event(GameEvent::VictoryParticleBurst { pos: wall.pos });
    if let Ok(to) = transition(state.phase, Intent::ReachWall) {
        state.set_phase(to);
    }
}

fn advance_effects<R: RowRng>(state: &mut GameState<R>, dt: f32) {
    if state.screen_shake > 0.0 {
        state.screen_shake = (state.screen_shake - dt * state.config.shake_decay).max(0.0);
    }

    state.bursts.retain_mut(|burst| burst.update(dt));

    if let Some(remaining) = state.pending_continue.as_mut() {
        *remaining -= dt;
        if *remaining <= 0.0 {
            state.pending_continue = None;
            fire_continue(state);
        }
    }
}

fn fire_continue<R: RowRng>(state: &mut GameState<R>) {
    let Ok(to) = transition(state.phase, Intent::ContinueAfterPenalty) else {
        return;
    };
    state.player.score = state.config.start_score;
    state.notify_score();
    state.set_phase(to);
}

/// Lateral step the autopilot takes this frame
fn autopilot_delta<R: RowRng>(state: &GameState<R>, dt: f32) -> f32 {
    let x = state.player.pos.x;
    let target = autopilot_target(state).unwrap_or(x);
    let max_step = AUTOPILOT_SPEED * dt;
    (target - x).clamp(-max_step, max_step)
}

/// Lane the autopilot wants to be in for the nearest row ahead
fn autopilot_target<R: RowRng>(state: &GameState<R>) -> Option<f32> {
    if let Some(wall) = state.victory_wall {
        return Some(wall.pos.x);
    }

    let z = state.player.pos.z;
    let row_z = state
        .obstacles
        .iter()
        .map(|o| o.pos.z)
        .filter(|&oz| oz < z && oz > z - AUTOPILOT_LOOKAHEAD)
        .reduce(f32::max)?;
    let row: Vec<&Obstacle> = state
        .obstacles
        .iter()
        .filter(|o| (o.pos.z - row_z).abs() < 0.5)
        .collect();

    let score = state.player.score;
    let gain_at = |lane_x: f32| -> i64 {
        let probe = Vec3::new(lane_x, 0.0, row_z);
        let mut projected = score;
        for obstacle in &row {
            if distance_xz(probe, obstacle.pos) < hit_radius(obstacle.kind, &state.config) {
                apply_hit(&mut projected, score, obstacle);
            }
        }
        projected - score
    };

    // Best gain; ties go to the lane needing the least travel
    state
        .config
        .lanes
        .iter()
        .map(|&lane_x| (lane_x, gain_at(lane_x)))
        .max_by(|a, b| {
            a.1.cmp(&b.1)
                .then((b.0 - state.player.pos.x).abs().total_cmp(&(a.0 - state.player.pos.x).abs()))
        })
        .map(|(lane_x, _)| lane_x)
}
