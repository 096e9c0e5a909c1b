//! Road segment pool
//!
//! A fixed set of corridor segments leapfrogged to the front as the camera
//! passes them. Segments are never created or destroyed after construction.

use serde::{Deserialize, Serialize};

/// One span of corridor, `back_z` > `front_z` (forward is -z)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoadSegment {
    pub back_z: f32,
    pub front_z: f32,
}

impl RoadSegment {
    /// Midpoint, where a renderer centres the segment mesh
    #[inline]
    pub fn center_z(&self) -> f32 {
        (self.back_z + self.front_z) / 2.0
    }
}

/// Fixed-size pool of segments tiling the corridor
#[derive(Debug, Clone)]
pub struct RoadPool {
    segments: Vec<RoadSegment>,
    length: f32,
    count: usize,
}

impl RoadPool {
    pub fn new(length: f32, count: usize) -> Self {
        Self {
            segments: Self::canonical(length, count),
            length,
            count,
        }
    }

    fn canonical(length: f32, count: usize) -> Vec<RoadSegment> {
        (0..count)
            .map(|i| RoadSegment {
                back_z: -(i as f32) * length,
                front_z: -((i + 1) as f32) * length,
            })
            .collect()
    }

    /// Restore the initial tiling
    pub fn reset(&mut self) {
        self.segments = Self::canonical(self.length, self.count);
    }

    pub fn segments(&self) -> &[RoadSegment] {
        &self.segments
    }

    pub fn segment_length(&self) -> f32 {
        self.length
    }

    /// Front edge of the segment furthest ahead
    pub fn leading_edge(&self) -> f32 {
        self.segments
            .iter()
            .map(|s| s.front_z)
            .fold(f32::INFINITY, f32::min)
    }

    /// Move at most one segment that is `margin` or more behind `camera_z`
    /// to the leading edge. Returns its new span.
    pub fn recycle(&mut self, camera_z: f32, margin: f32) -> Option<RoadSegment> {
        let threshold = camera_z + margin;
        let leading = self.leading_edge();
        // Of the qualifying segments, the one least far behind
        let candidate = self
            .segments
            .iter_mut()
            .filter(|s| s.front_z >= threshold)
            .max_by(|a, b| a.front_z.total_cmp(&b.front_z))?;
        candidate.back_z = leading;
        candidate.front_z = leading - self.length;
        let moved = *candidate;
        log::debug!("Recycled road segment to [{}, {}]", moved.back_z, moved.front_z);
        Some(moved)
    }

    /// True when segments cover one unbroken span with no overlap
    pub fn is_contiguous(&self) -> bool {
        let mut spans: Vec<RoadSegment> = self.segments.clone();
        spans.sort_by(|a, b| b.back_z.total_cmp(&a.back_z));
        spans.windows(2).all(|w| w[0].front_z == w[1].back_z)
            && spans.iter().all(|s| s.back_z - s.front_z == self.length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_tiling() {
        let pool = RoadPool::new(80.0, 4);
        let spans: Vec<(f32, f32)> = pool.segments().iter().map(|s| (s.back_z, s.front_z)).collect();
        assert_eq!(
            spans,
            vec![(0.0, -80.0), (-80.0, -160.0), (-160.0, -240.0), (-240.0, -320.0)]
        );
        assert!(pool.is_contiguous());
        assert_eq!(pool.leading_edge(), -320.0);
    }

    #[test]
    fn test_no_recycle_until_margin_reached() {
        let mut pool = RoadPool::new(80.0, 4);
        // First segment's front is at -80; threshold is camera + 160
        assert!(pool.recycle(-239.0, 160.0).is_none());
        let moved = pool.recycle(-240.0, 160.0).expect("segment recycled");
        assert_eq!((moved.back_z, moved.front_z), (-320.0, -400.0));
        assert!(pool.is_contiguous());
    }

    #[test]
    fn test_one_segment_per_call() {
        let mut pool = RoadPool::new(80.0, 4);
        // Far enough that two segments qualify
        let first = pool.recycle(-400.0, 160.0).expect("first");
        assert_eq!(first.back_z, -320.0);
        assert_eq!(pool.leading_edge(), -400.0);
        let second = pool.recycle(-400.0, 160.0).expect("second");
        assert_eq!(second.back_z, -400.0);
        assert!(pool.is_contiguous());
        assert_eq!(pool.segments().len(), 4);
    }

    #[test]
    fn test_reset_restores_tiling() {
        let mut pool = RoadPool::new(80.0, 4);
        let initial = pool.segments().to_vec();
        for step in 1..20 {
            pool.recycle(-(step as f32) * 80.0, 160.0);
        }
        assert_ne!(pool.segments(), initial.as_slice());
        pool.reset();
        assert_eq!(pool.segments(), initial.as_slice());
    }
}
