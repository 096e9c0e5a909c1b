//! Row value and layout policy
//!
//! Pure functions deciding what a row looks like for a given row index.
//! Difficulty ramps by bounding the "safe" lane's value with the row index.

use super::config::GameConfig;
use super::rng::RowRng;

/// Value assigned to one lane of a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaneValue {
    pub value: i64,
    pub is_negative: bool,
}

/// Highest value the difficulty ramp allows on the safe lane
pub fn max_possible(row_index: u32, config: &GameConfig) -> i64 {
    let tutorial = config.tutorial_rows;
    if row_index <= tutorial {
        1 + row_index as i64
    } else {
        6 + 2 * (row_index - tutorial) as i64
    }
}

/// Values for the three lanes of a row
pub fn row_obstacle_values<R: RowRng + ?Sized>(
    row_index: u32,
    config: &GameConfig,
    rng: &mut R,
) -> [LaneValue; 3] {
    if row_index <= config.tutorial_rows {
        return [LaneValue {
            value: config.tutorial_value,
            is_negative: false,
        }; 3];
    }

    let max = max_possible(row_index, config);
    let mut safe_pool: Vec<i64> = config
        .possible_values
        .iter()
        .copied()
        .filter(|&v| v <= max)
        .collect();
    if safe_pool.is_empty() {
        safe_pool.push(max.max(1));
    }

    let mut negative = [
        rng.chance(config.negative_chance),
        rng.chance(config.negative_chance),
        rng.chance(config.negative_chance),
    ];
    // Never let every lane punish the player
    if negative.iter().all(|&n| n) {
        negative[rng.pick(3)] = false;
    }

    std::array::from_fn(|lane| {
        if negative[lane] {
            let values = &config.negative_values;
            LaneValue {
                value: values[rng.pick(values.len())],
                is_negative: true,
            }
        } else {
            let pool: &[i64] = if lane == 0 {
                &safe_pool
            } else {
                &config.possible_values
            };
            LaneValue {
                value: pool[rng.pick(pool.len())],
                is_negative: false,
            }
        }
    })
}

/// Whether this row becomes a single centred division gate
pub fn division_gate<R: RowRng + ?Sized>(row_index: u32, config: &GameConfig, rng: &mut R) -> bool {
    row_index > config.tutorial_rows && rng.chance(config.division_chance)
}

/// Lanes that receive an obstacle: all three in the tutorial, otherwise two
/// distinct lanes in random order
pub fn lanes_for_row<R: RowRng + ?Sized>(
    row_index: u32,
    config: &GameConfig,
    rng: &mut R,
) -> Vec<usize> {
    if row_index <= config.tutorial_rows {
        return vec![0, 1, 2];
    }
    let mut lanes = vec![0, 1, 2];
    let first = lanes.swap_remove(rng.pick(3));
    let second = lanes[rng.pick(2)];
    vec![first, second]
}
