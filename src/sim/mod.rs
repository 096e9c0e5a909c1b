//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One `tick` per frame, no blocking
//! - Injected RNG only
//! - Stable iteration order (obstacles by id)
//! - No rendering or platform dependencies

pub mod camera;
pub mod collision;
pub mod config;
pub mod level;
pub mod obstacles;
pub mod phase;
pub mod policy;
pub mod rng;
pub mod road;
pub mod state;
pub mod tick;

pub use camera::CameraRig;
pub use collision::{Hit, HitEffect, Resolution, remove_offscreen, resolve};
pub use config::{ConfigError, GameConfig};
pub use level::{LevelGenerator, RowLayout, spawn_row};
pub use obstacles::{Obstacle, ObstacleKind, ObstaclePool};
pub use phase::{GamePhase, Intent, TransitionError, transition};
pub use policy::{LaneValue, division_gate, lanes_for_row, max_possible, row_obstacle_values};
pub use rng::{RowRng, ScriptedRng, seeded};
pub use road::{RoadPool, RoadSegment};
pub use state::{
    DestroyCause, GameEvent, GameState, Particle, ParticleBurst, Player, VictoryWall,
};
pub use tick::{TickInput, drag_to_world_delta, tick};
