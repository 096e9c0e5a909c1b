//! Live obstacle storage
//!
//! Obstacles are kept in insertion (= id) order. Destructive passes walk the
//! list back to front so removal never disturbs indices still to be visited.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Obstacle behaviour on contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Adds or subtracts `value`
    Number,
    /// Halves the score
    Division,
}

/// A numeric obstacle on the road
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub pos: Vec3,
    pub kind: ObstacleKind,
    /// Signed value for numbers, the divisor marker for division gates
    pub value: i64,
}

impl Obstacle {
    /// Text a glyph renderer shows for this obstacle
    pub fn label(&self) -> String {
        match self.kind {
            ObstacleKind::Division => format!("/ {}", self.value),
            ObstacleKind::Number => self.value.to_string(),
        }
    }

    pub fn is_penalty(&self) -> bool {
        self.kind == ObstacleKind::Number && self.value < 0
    }
}

/// Owner of all live obstacles
#[derive(Debug, Clone)]
pub struct ObstaclePool {
    obstacles: Vec<Obstacle>,
    next_id: u32,
}

impl Default for ObstaclePool {
    fn default() -> Self {
        Self::new()
    }
}

impl ObstaclePool {
    pub fn new() -> Self {
        Self {
            obstacles: Vec::new(),
            next_id: 1,
        }
    }

    /// Create an obstacle and return its id
    pub fn spawn(&mut self, pos: Vec3, kind: ObstacleKind, value: i64) -> u32 {
        let id = self.next_id;
        self.next_id = id + 1;
        self.obstacles.push(Obstacle {
            id,
            pos,
            kind,
            value,
        });
        id
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    pub fn as_slice(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn get(&self, index: usize) -> Option<&Obstacle> {
        self.obstacles.get(index)
    }

    /// Remove the obstacle at `index`, preserving order of the rest
    pub fn remove_at(&mut self, index: usize) -> Obstacle {
        self.obstacles.remove(index)
    }

    /// Remove every obstacle matching `pred`, walking back to front.
    /// Returned obstacles are in removal order.
    pub fn drain_where(&mut self, mut pred: impl FnMut(&Obstacle) -> bool) -> Vec<Obstacle> {
        let mut removed = Vec::new();
        for i in (0..self.obstacles.len()).rev() {
            if pred(&self.obstacles[i]) {
                removed.push(self.obstacles.remove(i));
            }
        }
        removed
    }

    /// Discard everything (ids keep increasing)
    pub fn clear(&mut self) {
        self.obstacles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_increase_and_survive_clear() {
        let mut pool = ObstaclePool::new();
        let a = pool.spawn(Vec3::ZERO, ObstacleKind::Number, 5);
        let b = pool.spawn(Vec3::ZERO, ObstacleKind::Number, -10);
        assert!(b > a);
        pool.clear();
        assert!(pool.is_empty());
        let c = pool.spawn(Vec3::ZERO, ObstacleKind::Division, 2);
        assert!(c > b);
    }

    #[test]
    fn test_default_pool_starts_ids_at_one() {
        let mut pool = ObstaclePool::default();
        assert_eq!(pool.spawn(Vec3::ZERO, ObstacleKind::Number, 1), 1);
        assert_eq!(pool.spawn(Vec3::ZERO, ObstacleKind::Number, 1), 2);
    }

    #[test]
    fn test_drain_where_keeps_order() {
        let mut pool = ObstaclePool::new();
        for z in 0..5 {
            pool.spawn(Vec3::new(0.0, 0.5, -(z as f32)), ObstacleKind::Number, z);
        }
        let removed = pool.drain_where(|o| o.value % 2 == 1);
        assert_eq!(removed.iter().map(|o| o.value).collect::<Vec<_>>(), vec![3, 1]);
        assert_eq!(pool.iter().map(|o| o.value).collect::<Vec<_>>(), vec![0, 2, 4]);
    }

    #[test]
    fn test_labels() {
        let mut pool = ObstaclePool::new();
        pool.spawn(Vec3::ZERO, ObstacleKind::Division, 2);
        pool.spawn(Vec3::ZERO, ObstacleKind::Number, -20);
        assert_eq!(pool.as_slice()[0].label(), "/ 2");
        assert_eq!(pool.as_slice()[1].label(), "-20");
        assert!(pool.as_slice()[1].is_penalty());
    }
}
