//! Level generator
//!
//! Keeps rows generated a fixed lookahead ahead of the player. Rows are also
//! regenerated over a whole road segment when the road pool recycles one.

use glam::Vec3;

use super::config::GameConfig;
use super::obstacles::{ObstacleKind, ObstaclePool};
use super::policy::{division_gate, lanes_for_row, row_obstacle_values};
use super::rng::RowRng;
use crate::consts::{DIVISION_VALUE, PLAYER_HEIGHT};
use crate::row_index;

/// What a single row turned into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowLayout {
    /// One centred division gate
    Division,
    /// Number obstacles in this many lanes
    Lanes(usize),
}

/// Spawn cursor and row routine
#[derive(Debug, Clone, Default)]
pub struct LevelGenerator {
    /// Furthest-ahead z at which a row has been generated (only ever decreases)
    last_spawn_z: f32,
}

impl LevelGenerator {
    pub fn new() -> Self {
        Self { last_spawn_z: 0.0 }
    }

    pub fn last_spawn_z(&self) -> f32 {
        self.last_spawn_z
    }

    pub fn reset(&mut self) {
        self.last_spawn_z = 0.0;
    }

    /// Generate rows until the cursor is `spawn_ahead` beyond `player_z`.
    /// Returns the number of rows spawned.
    pub fn advance<R: RowRng + ?Sized>(
        &mut self,
        player_z: f32,
        config: &GameConfig,
        pool: &mut ObstaclePool,
        rng: &mut R,
    ) -> usize {
        let mut rows = 0;
        while player_z - self.last_spawn_z < config.spawn_ahead {
            self.last_spawn_z -= config.row_spacing;
            spawn_row(self.last_spawn_z, config, pool, rng);
            rows += 1;
        }
        rows
    }

    /// Generate every row in `(front_z, back_z]` without touching the cursor
    pub fn spawn_range<R: RowRng + ?Sized>(
        &self,
        back_z: f32,
        front_z: f32,
        config: &GameConfig,
        pool: &mut ObstaclePool,
        rng: &mut R,
    ) -> usize {
        let mut rows = 0;
        let mut z = back_z;
        while z > front_z {
            spawn_row(z, config, pool, rng);
            z -= config.row_spacing;
            rows += 1;
        }
        rows
    }
}

/// Generate one row at `row_z`
pub fn spawn_row<R: RowRng + ?Sized>(
    row_z: f32,
    config: &GameConfig,
    pool: &mut ObstaclePool,
    rng: &mut R,
) -> RowLayout {
    let index = row_index(row_z, config.row_spacing);

    if division_gate(index, config, rng) {
        pool.spawn(
            Vec3::new(0.0, PLAYER_HEIGHT, row_z),
            ObstacleKind::Division,
            DIVISION_VALUE,
        );
        log::debug!("Row {} at z={}: division gate", index, row_z);
        return RowLayout::Division;
    }

    let values = row_obstacle_values(index, config, rng);
    let lanes = lanes_for_row(index, config, rng);
    for &lane in &lanes {
        pool.spawn(
            Vec3::new(config.lanes[lane], PLAYER_HEIGHT, row_z),
            ObstacleKind::Number,
            values[lane].value,
        );
    }
    log::debug!(
        "Row {} at z={}: lanes {:?} values {:?}",
        index,
        row_z,
        lanes,
        values.map(|v| v.value)
    );
    RowLayout::Lanes(lanes.len())
}
