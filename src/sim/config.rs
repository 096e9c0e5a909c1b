//! Gameplay configuration
//!
//! Every tunable the simulation reads. Defaults mirror [`crate::consts`];
//! a JSON document may override any subset of fields.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Reasons a [`GameConfig`] is rejected
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must be positive (got {value})")]
    NonPositive { field: &'static str, value: f32 },
    #[error("{field} must be a probability in [0, 1] (got {value})")]
    Probability { field: &'static str, value: f64 },
    #[error("{field} must not be empty")]
    Empty { field: &'static str },
    #[error("{field} must contain only {sign} values")]
    WrongSign {
        field: &'static str,
        sign: &'static str,
    },
    #[error("road bounds invalid (min {min} >= max {max})")]
    RoadBounds { min: f32, max: f32 },
    #[error("road needs at least two segments to recycle (got {count})")]
    TooFewSegments { count: usize },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Named constants injected into a session at construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub run_speed: f32,
    pub road_x_min: f32,
    pub road_x_max: f32,
    pub lanes: [f32; 3],
    pub row_spacing: f32,
    pub spawn_ahead: f32,
    pub tutorial_rows: u32,
    pub tutorial_value: i64,
    pub possible_values: Vec<i64>,
    pub negative_values: Vec<i64>,
    pub negative_chance: f64,
    pub division_chance: f64,
    pub collide_radius: f32,
    pub division_radius: f32,
    pub offscreen_margin: f32,
    pub start_score: i64,
    pub victory_target: i64,
    pub victory_wall_ahead: f32,
    pub victory_wall_radius: f32,
    pub chunk_length: f32,
    pub num_chunks: usize,
    pub recycle_margin_chunks: f32,
    pub continue_delay: f32,
    pub shake_amount: f32,
    pub shake_decay: f32,
    pub burst_particles: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            run_speed: RUN_SPEED,
            road_x_min: ROAD_X_MIN,
            road_x_max: ROAD_X_MAX,
            lanes: ROW_LANES,
            row_spacing: ROW_SPACING,
            spawn_ahead: SPAWN_AHEAD,
            tutorial_rows: TUTORIAL_ROWS,
            tutorial_value: TUTORIAL_VALUE,
            possible_values: POSSIBLE_VALUES.to_vec(),
            negative_values: NEGATIVE_VALUES.to_vec(),
            negative_chance: NEGATIVE_CHANCE,
            division_chance: DIVISION_GATE_CHANCE,
            collide_radius: COLLIDE_RADIUS,
            division_radius: DIVISION_RADIUS,
            offscreen_margin: OFFSCREEN_MARGIN,
            start_score: START_SCORE,
            victory_target: VICTORY_TARGET,
            victory_wall_ahead: VICTORY_WALL_AHEAD,
            victory_wall_radius: VICTORY_WALL_RADIUS,
            chunk_length: CHUNK_LENGTH,
            num_chunks: NUM_ROAD_CHUNKS,
            recycle_margin_chunks: RECYCLE_MARGIN_CHUNKS,
            continue_delay: CONTINUE_DELAY,
            shake_amount: SHAKE_AMOUNT,
            shake_decay: SHAKE_DECAY,
            burst_particles: BURST_PARTICLES,
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON config and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every field the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("run_speed", self.run_speed),
            ("row_spacing", self.row_spacing),
            ("spawn_ahead", self.spawn_ahead),
            ("collide_radius", self.collide_radius),
            ("division_radius", self.division_radius),
            ("victory_wall_radius", self.victory_wall_radius),
            ("chunk_length", self.chunk_length),
            ("recycle_margin_chunks", self.recycle_margin_chunks),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        for (field, value) in [
            ("negative_chance", self.negative_chance),
            ("division_chance", self.division_chance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Probability { field, value });
            }
        }

        if self.road_x_min >= self.road_x_max {
            return Err(ConfigError::RoadBounds {
                min: self.road_x_min,
                max: self.road_x_max,
            });
        }

        if self.possible_values.is_empty() {
            return Err(ConfigError::Empty {
                field: "possible_values",
            });
        }
        if self.possible_values.iter().any(|&v| v <= 0) {
            return Err(ConfigError::WrongSign {
                field: "possible_values",
                sign: "positive",
            });
        }
        if self.negative_values.is_empty() {
            return Err(ConfigError::Empty {
                field: "negative_values",
            });
        }
        if self.negative_values.iter().any(|&v| v >= 0) {
            return Err(ConfigError::WrongSign {
                field: "negative_values",
                sign: "negative",
            });
        }

        if self.num_chunks < 2 {
            return Err(ConfigError::TooFewSegments {
                count: self.num_chunks,
            });
        }

        Ok(())
    }

    /// Distance behind the camera a segment must reach before recycling
    #[inline]
    pub fn recycle_margin(&self) -> f32 {
        self.recycle_margin_chunks * self.chunk_length
    }

    /// Clamp a lateral position to the corridor
    #[inline]
    pub fn clamp_x(&self, x: f32) -> f32 {
        x.clamp(self.road_x_min, self.road_x_max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
        assert_eq!(GameConfig::default().recycle_margin(), 160.0);
    }

    #[test]
    fn test_partial_json_overrides() {
        let config = GameConfig::from_json(r#"{ "victory_target": 50, "run_speed": 20.0 }"#)
            .expect("valid config");
        assert_eq!(config.victory_target, 50);
        assert_eq!(config.run_speed, 20.0);
        assert_eq!(config.row_spacing, ROW_SPACING);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = GameConfig::from_json(r#"{ "negative_chance": 1.5 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Probability { field: "negative_chance", .. }));

        let err = GameConfig::from_json(r#"{ "negative_values": [5] }"#).unwrap_err();
        assert!(matches!(err, ConfigError::WrongSign { .. }));

        let err = GameConfig::from_json(r#"{ "num_chunks": 1 }"#).unwrap_err();
        assert_eq!(err.to_string(), "road needs at least two segments to recycle (got 1)");

        assert!(matches!(
            GameConfig::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
