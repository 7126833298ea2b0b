//! Bounded, insertion-ordered history of tip positions.

use std::collections::VecDeque;

use dp_core::Point2;

/// Ring buffer of the most recent tip positions of one body.
///
/// Points are kept oldest-first. Once `capacity` points are stored, each new
/// point evicts exactly the single oldest one. A zero-capacity buffer drops
/// every insertion.
#[derive(Clone, Debug, PartialEq)]
pub struct TrailBuffer {
    points: VecDeque<Point2>,
    capacity: usize,
}

impl TrailBuffer {
    /// Trail length used by the reference visualisation.
    pub const DEFAULT_CAPACITY: usize = 100;

    pub fn new(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append `point`, evicting the oldest point if the buffer is full.
    pub fn record(&mut self, point: Point2) {
        if self.capacity == 0 {
            return;
        }
        if self.points.len() == self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(point);
    }

    /// Copy of the stored points, oldest first.
    pub fn snapshot(&self) -> Vec<Point2> {
        self.points.iter().copied().collect()
    }

    /// Stored points, oldest first, without copying.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Point2> + '_ {
        self.points.iter()
    }

    /// Points paired with a fade factor rising linearly from 0 at the oldest
    /// point toward 1 at the newest (`i / len`).
    pub fn faded(&self) -> impl Iterator<Item = (Point2, f32)> + '_ {
        let len = self.points.len() as f32;
        self.points
            .iter()
            .enumerate()
            .map(move |(i, p)| (*p, i as f32 / len))
    }

    /// Most recently recorded point.
    pub fn latest(&self) -> Option<Point2> {
        self.points.back().copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}

impl Default for TrailBuffer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dp_core::point;

    #[test]
    fn fills_up_to_capacity() {
        let mut trail = TrailBuffer::new(3);
        trail.record(point(0.0, 0.0));
        trail.record(point(1.0, 0.0));
        assert_eq!(trail.len(), 2);
        assert_eq!(trail.snapshot(), vec![point(0.0, 0.0), point(1.0, 0.0)]);
    }

    #[test]
    fn evicts_single_oldest_when_full() {
        let mut trail = TrailBuffer::new(3);
        for i in 0..4 {
            trail.record(point(i as f64, 0.0));
        }
        assert_eq!(trail.len(), 3);
        assert_eq!(
            trail.snapshot(),
            vec![point(1.0, 0.0), point(2.0, 0.0), point(3.0, 0.0)]
        );
        assert_eq!(trail.latest(), Some(point(3.0, 0.0)));
    }

    #[test]
    fn zero_capacity_drops_everything() {
        let mut trail = TrailBuffer::new(0);
        trail.record(point(1.0, 1.0));
        trail.record(point(2.0, 2.0));
        assert!(trail.is_empty());
        assert_eq!(trail.latest(), None);
        assert!(trail.snapshot().is_empty());
    }

    #[test]
    fn fade_rises_from_zero() {
        let mut trail = TrailBuffer::new(4);
        for i in 0..4 {
            trail.record(point(i as f64, 0.0));
        }
        let alphas: Vec<f32> = trail.faded().map(|(_, a)| a).collect();
        assert_eq!(alphas, vec![0.0, 0.25, 0.5, 0.75]);
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut trail = TrailBuffer::new(2);
        trail.record(point(1.0, 1.0));
        trail.clear();
        assert!(trail.is_empty());
        assert_eq!(trail.capacity(), 2);
    }

    #[test]
    fn default_capacity_matches_reference() {
        assert_eq!(TrailBuffer::default().capacity(), 100);
    }
}
