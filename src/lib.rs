//! Number Runner - endless lane-runner arithmetic game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (generation, road recycling, scoring, game state)
//! - `presentation`: Presenter contract and per-frame view
//! - `settings`: Player-facing presentation preferences

pub mod presentation;
pub mod settings;
pub mod sim;

pub use presentation::{BurstView, FrameView, Presenter};
pub use sim::{CameraRig, GameState, TickInput, tick};
pub use settings::{QualityPreset, Settings};

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    /// Forward speed of the player (units/s, toward -z)
    pub const RUN_SPEED: f32 = 15.0;

    /// Corridor lateral bounds
    pub const ROAD_X_MIN: f32 = -9.0;
    pub const ROAD_X_MAX: f32 = 9.0;
    pub const ROAD_WIDTH: f32 = ROAD_X_MAX - ROAD_X_MIN;
    /// Resting height of the player and obstacles above the road
    pub const PLAYER_HEIGHT: f32 = 0.5;

    /// Left, Center, Right
    pub const ROW_LANES: [f32; 3] = [-8.0, 0.0, 8.0];
    /// Distance between generated rows
    pub const ROW_SPACING: f32 = 26.0;
    /// Rows are kept generated this far ahead of the player
    pub const SPAWN_AHEAD: f32 = 80.0;
    /// Rows at or below this index are the tutorial (all 1s, all lanes)
    pub const TUTORIAL_ROWS: u32 = 5;
    pub const TUTORIAL_VALUE: i64 = 1;

    pub const POSSIBLE_VALUES: [i64; 12] = [1, 2, 3, 5, 7, 10, 15, 20, 25, 30, 40, 50];
    pub const NEGATIVE_VALUES: [i64; 3] = [-10, -20, -50];
    pub const NEGATIVE_CHANCE: f64 = 0.3;
    pub const DIVISION_GATE_CHANCE: f64 = 0.05;
    /// Marker value carried by division obstacles ("/ 2")
    pub const DIVISION_VALUE: i64 = 2;

    /// Collision radii (planar)
    pub const COLLIDE_RADIUS: f32 = 1.0;
    pub const DIVISION_RADIUS: f32 = 2.5;
    pub const VICTORY_WALL_RADIUS: f32 = 4.0;
    /// Obstacles this far behind the player are discarded unscored
    pub const OFFSCREEN_MARGIN: f32 = 5.0;

    pub const VICTORY_TARGET: i64 = 300;
    pub const VICTORY_WALL_AHEAD: f32 = 50.0;
    pub const START_SCORE: i64 = 1;

    /// Road segments
    pub const CHUNK_LENGTH: f32 = 80.0;
    pub const NUM_ROAD_CHUNKS: usize = 4;
    /// Only recycle a segment at least this many lengths behind the camera
    pub const RECYCLE_MARGIN_CHUNKS: f32 = 2.0;

    /// Camera defaults
    pub const CAMERA_HEIGHT_DEFAULT: f32 = 8.0;
    pub const CAMERA_Z_OFFSET_DEFAULT: f32 = 10.0;
    pub const CAMERA_LERP: f32 = 0.08;
    pub const CAMERA_FOV_DEG: f32 = 60.0;
    /// Keeps the view angle when pulling back
    pub const CAMERA_HEIGHT_RATIO: f32 =
        (CAMERA_HEIGHT_DEFAULT - PLAYER_HEIGHT) / CAMERA_Z_OFFSET_DEFAULT;

    /// Feedback effects
    pub const SHAKE_AMOUNT: f32 = 0.4;
    pub const SHAKE_DECAY: f32 = 3.0;
    pub const BURST_PARTICLES: usize = 80;
    pub const BURST_FADE_RATE: f32 = 2.0;
    pub const BURST_SPREAD: f32 = 2.0;
    pub const BURST_SPEED: f32 = 20.0;

    /// Delay before a continue-after-penalty restores the run (seconds)
    pub const CONTINUE_DELAY: f32 = 2.0;

    /// Pointer drag multiplier on touch devices
    pub const SWIPE_SENSITIVITY_MOBILE: f32 = 2.0;
}

/// Distance on the road plane, ignoring height
#[inline]
pub fn distance_xz(a: Vec3, b: Vec3) -> f32 {
    (a.x - b.x).hypot(a.z - b.z)
}

/// Row index for a row generated at `row_z`
#[inline]
pub fn row_index(row_z: f32, row_spacing: f32) -> u32 {
    (-row_z / row_spacing).floor().max(0.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_ignores_height() {
        let a = Vec3::new(0.0, 0.5, 0.0);
        let b = Vec3::new(3.0, 40.0, -4.0);
        assert!((distance_xz(a, b) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_row_index() {
        assert_eq!(row_index(-26.0, consts::ROW_SPACING), 1);
        assert_eq!(row_index(-155.0, consts::ROW_SPACING), 5);
        assert_eq!(row_index(-156.0, consts::ROW_SPACING), 6);
        assert_eq!(row_index(-320.0, consts::ROW_SPACING), 12);
        assert_eq!(row_index(0.0, consts::ROW_SPACING), 0);
    }
}
