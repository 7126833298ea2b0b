//! 2D geometry aliases shared by the simulation and its consumers.

use crate::Real;
use nalgebra::Point2 as NPoint2;

/// Position in screen/world space.
pub type Point2 = NPoint2<Real>;

#[inline]
pub fn point(x: Real, y: Real) -> Point2 {
    Point2::new(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_components() {
        let p = point(1.5, -2.0);
        assert_eq!(p.x, 1.5);
        assert_eq!(p.y, -2.0);
    }
}
