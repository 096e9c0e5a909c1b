//! Collision detection and score resolution
//!
//! Contact is a planar circle test between the player and each obstacle.
//! Every contact destroys the obstacle and applies exactly one scoring rule.

use super::config::GameConfig;
use super::obstacles::{Obstacle, ObstacleKind, ObstaclePool};
use super::state::Player;
use crate::distance_xz;

/// Scoring rule applied by a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitEffect {
    /// Division gate: score halved, floored at 1
    Halved,
    /// Negative number added
    Penalty,
    /// Positive number within the score, added
    Absorbed,
    /// Positive number larger than the score, subtracted
    Overpowered,
}

impl HitEffect {
    /// Whether this contact punishes the player (drives camera shake)
    pub fn shakes(self) -> bool {
        !matches!(self, HitEffect::Absorbed)
    }
}

/// One resolved contact
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    pub obstacle: Obstacle,
    pub effect: HitEffect,
    pub score_after: i64,
}

/// Outcome of one resolution pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    /// Contacts in resolution order (reverse insertion order)
    pub hits: Vec<Hit>,
    /// The score went negative; remaining obstacles were not examined
    pub game_over: bool,
}

impl Resolution {
    pub fn shake(&self) -> bool {
        self.hits.iter().any(|h| h.effect.shakes())
    }
}

/// Contact radius for an obstacle kind
#[inline]
pub fn hit_radius(kind: ObstacleKind, config: &GameConfig) -> f32 {
    match kind {
        ObstacleKind::Division => config.division_radius,
        ObstacleKind::Number => config.collide_radius,
    }
}

/// Apply one obstacle to `score`. `snapshot` is the score at the start of
/// the pass and decides whether a positive value is absorbable.
pub fn apply_hit(score: &mut i64, snapshot: i64, obstacle: &Obstacle) -> HitEffect {
    match obstacle.kind {
        ObstacleKind::Division => {
            *score = (*score / 2).max(1);
            HitEffect::Halved
        }
        ObstacleKind::Number if obstacle.value < 0 => {
            *score += obstacle.value;
            HitEffect::Penalty
        }
        ObstacleKind::Number if obstacle.value <= snapshot => {
            *score += obstacle.value;
            HitEffect::Absorbed
        }
        ObstacleKind::Number => {
            *score -= obstacle.value;
            HitEffect::Overpowered
        }
    }
}

/// Resolve every obstacle touching the player, removing each one hit
pub fn resolve(player: &mut Player, pool: &mut ObstaclePool, config: &GameConfig) -> Resolution {
    let snapshot = player.score;
    let mut resolution = Resolution::default();

    for i in (0..pool.len()).rev() {
        let Some(obstacle) = pool.get(i) else {
            continue;
        };
        if distance_xz(player.pos, obstacle.pos) >= hit_radius(obstacle.kind, config) {
            continue;
        }

        let obstacle = pool.remove_at(i);
        let effect = apply_hit(&mut player.score, snapshot, &obstacle);
        resolution.hits.push(Hit {
            obstacle,
            effect,
            score_after: player.score,
        });

        if player.score < 0 {
            resolution.game_over = true;
            break;
        }
    }

    resolution
}

/// Discard, unscored, every obstacle more than the trailing margin behind
pub fn remove_offscreen(player_z: f32, pool: &mut ObstaclePool, config: &GameConfig) -> Vec<Obstacle> {
    let behind = player_z + config.offscreen_margin;
    pool.drain_where(|o| o.pos.z > behind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn player_with(score: i64) -> Player {
        Player {
            pos: Vec3::new(0.0, 0.5, -100.0),
            score,
        }
    }

    fn pool_with(obstacles: &[(f32, f32, ObstacleKind, i64)]) -> ObstaclePool {
        let mut pool = ObstaclePool::new();
        for &(x, z, kind, value) in obstacles {
            pool.spawn(Vec3::new(x, 0.5, z), kind, value);
        }
        pool
    }

    #[test]
    fn test_absorbable_value_adds_without_shake() {
        let config = GameConfig::default();
        let mut player = player_with(10);
        let mut pool = pool_with(&[(0.0, -100.5, ObstacleKind::Number, 7)]);
        let res = resolve(&mut player, &mut pool, &config);
        assert_eq!(player.score, 17);
        assert!(pool.is_empty());
        assert!(!res.shake());
        assert!(!res.game_over);
    }

    #[test]
    fn test_overpowering_value_ends_run() {
        let config = GameConfig::default();
        let mut player = player_with(10);
        let mut pool = pool_with(&[(0.0, -100.0, ObstacleKind::Number, 15)]);
        let res = resolve(&mut player, &mut pool, &config);
        assert_eq!(player.score, -5);
        assert!(res.game_over);
        assert!(res.shake());
        assert_eq!(res.hits[0].effect, HitEffect::Overpowered);
    }

    #[test]
    fn test_division_halves_with_floor() {
        let config = GameConfig::default();
        let mut player = player_with(10);
        // Within 2.5 but outside 1.0
        let mut pool = pool_with(&[(2.0, -100.0, ObstacleKind::Division, 2)]);
        let res = resolve(&mut player, &mut pool, &config);
        assert_eq!(player.score, 5);
        assert!(res.shake());

        let mut player = player_with(1);
        let mut pool = pool_with(&[(0.0, -100.0, ObstacleKind::Division, 2)]);
        resolve(&mut player, &mut pool, &config);
        assert_eq!(player.score, 1);
    }

    #[test]
    fn test_penalty_within_score_survives() {
        let config = GameConfig::default();
        let mut player = player_with(25);
        let mut pool = pool_with(&[(0.0, -100.0, ObstacleKind::Number, -20)]);
        let res = resolve(&mut player, &mut pool, &config);
        assert_eq!(player.score, 5);
        assert!(!res.game_over);
        assert_eq!(res.hits[0].effect, HitEffect::Penalty);
    }

    #[test]
    fn test_miss_outside_radius() {
        let config = GameConfig::default();
        let mut player = player_with(10);
        let mut pool = pool_with(&[
            (1.0, -100.0, ObstacleKind::Number, 5),
            (8.0, -100.0, ObstacleKind::Division, 2),
        ]);
        let res = resolve(&mut player, &mut pool, &config);
        assert!(res.hits.is_empty());
        assert_eq!(pool.len(), 2);
        assert_eq!(player.score, 10);
    }

    #[test]
    fn test_multiple_hits_use_snapshot_in_reverse_order() {
        let config = GameConfig::default();
        let mut player = player_with(5);
        let mut pool = pool_with(&[
            (0.0, -100.2, ObstacleKind::Number, 5),
            (0.3, -100.0, ObstacleKind::Number, 3),
        ]);
        let res = resolve(&mut player, &mut pool, &config);
        // Both absorbable against the starting score of 5
        assert_eq!(player.score, 13);
        assert_eq!(res.hits.len(), 2);
        assert_eq!(res.hits[0].obstacle.value, 3);
        assert!(pool.is_empty());

        // Resolving again finds nothing
        assert!(resolve(&mut player, &mut pool, &config).hits.is_empty());
    }

    #[test]
    fn test_game_over_stops_resolution() {
        let config = GameConfig::default();
        let mut player = player_with(5);
        let mut pool = pool_with(&[
            (0.0, -100.0, ObstacleKind::Number, 3),
            (0.0, -100.0, ObstacleKind::Number, -10),
        ]);
        let res = resolve(&mut player, &mut pool, &config);
        assert!(res.game_over);
        assert_eq!(player.score, -5);
        // The earlier obstacle was never reached
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_remove_offscreen_is_unscored() {
        let config = GameConfig::default();
        let mut pool = pool_with(&[
            (0.0, -94.0, ObstacleKind::Number, 5),
            (0.0, -95.0, ObstacleKind::Number, 5),
            (0.0, -130.0, ObstacleKind::Number, 5),
        ]);
        let removed = remove_offscreen(-100.0, &mut pool, &config);
        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].pos.z, -94.0);
        assert_eq!(pool.len(), 2);
    }
}
