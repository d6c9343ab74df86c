//! Integer tile-grid geometry.
//!
//! All coordinates in this crate are tile units unless a function name says
//! otherwise; pixel conversion only happens through [`crate::Config`].

use std::ops::{Add, Sub};

use serde::Deserialize;

/// 2D point in tile-grid units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
pub struct Point {
    /// Column (x grows rightward).
    pub x: i32,
    /// Row (y grows downward).
    pub y: i32,
}

impl Point {
    /// Makes a point from components.
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }

    /// Pins both components into `[min, max]`, inclusive on both ends.
    #[must_use]
    pub fn clamped(self, min: Point, max: Point) -> Point {
        Point {
            x: self.x.max(min.x).min(max.x),
            y: self.y.max(min.y).min(max.y),
        }
    }

    /// Row-major wraparound step inside a `limit`-sized grid: adds `step`,
    /// carries x overflow into the next row, and wraps y back to the top row.
    #[must_use]
    pub fn advanced(self, step: Point, limit: Point) -> Point {
        let mut p = self + step;
        if p.x >= limit.x {
            p.x = 0;
            p.y += 1;
        }
        if p.y >= limit.y {
            p.y = 0;
        }
        p
    }

    /// True when both components lie in `[0, limit)`.
    pub fn in_bounds(self, limit: Point) -> bool {
        self.x >= 0 && self.y >= 0 && self.x < limit.x && self.y < limit.y
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_pins_to_both_bounds() {
        let lo = Point::new(0, 0);
        let hi = Point::new(19, 19);
        assert_eq!(Point::new(-5, 7).clamped(lo, hi), Point::new(0, 7));
        assert_eq!(Point::new(25, -1).clamped(lo, hi), Point::new(19, 0));
        assert_eq!(Point::new(19, 19).clamped(lo, hi), Point::new(19, 19));
    }

    #[test]
    fn advance_wraps_row_major() {
        let lim = Point::new(3, 2);
        let step = Point::new(1, 0);
        let mut p = Point::new(0, 0);
        let mut seen = Vec::new();
        loop {
            seen.push(p);
            p = p.advanced(step, lim);
            if p == Point::new(0, 0) {
                break;
            }
        }
        assert_eq!(
            seen,
            vec![
                Point::new(0, 0),
                Point::new(1, 0),
                Point::new(2, 0),
                Point::new(0, 1),
                Point::new(1, 1),
                Point::new(2, 1),
            ]
        );
    }

    #[test]
    fn advance_column_step_wraps_y_only() {
        let lim = Point::new(3, 2);
        let p = Point::new(1, 1).advanced(Point::new(0, 1), lim);
        assert_eq!(p, Point::new(1, 0));
    }
}
