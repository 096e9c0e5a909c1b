//! Trailing camera rig
//!
//! The camera follows the player on z only, behind and above. It is part of
//! the simulation because road recycling is measured against it.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::rng::RowRng;
use crate::consts::*;

/// How far ahead of the player the camera looks
const LOOK_AHEAD: f32 = 15.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraRig {
    pub pos: Vec3,
    /// Distance behind the player on z
    pub z_offset: f32,
    pub height: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            pos: Vec3::new(0.0, CAMERA_HEIGHT_DEFAULT, CAMERA_Z_OFFSET_DEFAULT),
            z_offset: CAMERA_Z_OFFSET_DEFAULT,
            height: CAMERA_HEIGHT_DEFAULT,
        }
    }
}

impl CameraRig {
    /// Pull back (and up) on narrow viewports so the whole road width fits,
    /// keeping the same view angle
    pub fn fit_to_aspect(&mut self, aspect: f32, fov_deg: f32) {
        let half_fov = fov_deg.to_radians() / 2.0;
        // Visible width at the player plane = 2 * distance * tan(half_fov) * aspect
        let min_distance = ROAD_WIDTH / (2.0 * half_fov.tan() * aspect);
        let view_distance = (1.0 + CAMERA_HEIGHT_RATIO * CAMERA_HEIGHT_RATIO).sqrt();
        self.z_offset = CAMERA_Z_OFFSET_DEFAULT.max(min_distance / view_distance);
        self.height = PLAYER_HEIGHT + self.z_offset * CAMERA_HEIGHT_RATIO;
    }

    /// Where the camera wants to be for a player at `player_z`
    #[inline]
    pub fn target_z(&self, player_z: f32) -> f32 {
        player_z + self.z_offset
    }

    /// Ease one frame toward the follow position
    pub fn follow(&mut self, player_z: f32) {
        let target = self.target_z(player_z);
        self.pos.z += (target - self.pos.z) * CAMERA_LERP;
        self.pos.x = 0.0;
        self.pos.y = self.height;
    }

    /// Point the camera aims at
    pub fn look_at(&self, player_z: f32) -> Vec3 {
        Vec3::new(0.0, 0.0, player_z - LOOK_AHEAD)
    }

    /// Snap back to the rest position behind the origin
    pub fn reset(&mut self) {
        self.pos = Vec3::new(0.0, self.height, self.z_offset);
    }

    /// Random jitter for the current shake intensity
    pub fn shake_offset<R: RowRng + ?Sized>(intensity: f32, rng: &mut R) -> Vec3 {
        if intensity <= 0.0 {
            return Vec3::ZERO;
        }
        Vec3::new(
            (rng.unit() - 0.5) * intensity,
            (rng.unit() - 0.5) * intensity,
            0.0,
        )
    }
}
