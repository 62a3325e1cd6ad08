//! 2-D coordinates in the kernel's nanometer grid.

use std::ops::{Add, Neg, Sub};

use serde::{Deserialize, Serialize};

use crate::units::{Angle, Length};

/// An exact 2-D coordinate, X right, Y up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: Length,
    pub y: Length,
}

impl Point {
    pub const ORIGIN: Point = Point {
        x: Length::from_nanometers(0),
        y: Length::from_nanometers(0),
    };

    pub const fn new(x: Length, y: Length) -> Self {
        Point { x, y }
    }

    pub fn scaled(&self, factor: i64) -> Point {
        Point::new(self.x * factor, self.y * factor)
    }

    /// Rotates about `center` by `angle`. The four multiples of 90 degrees are
    /// integer-exact; any other angle goes through floating point.
    pub fn rotated(&self, angle: Angle, center: Point) -> Point {
        let dx = (self.x - center.x).nanometers();
        let dy = (self.y - center.y).nanometers();
        let normalized = angle.mapped_to_0_360().microdegrees();
        let (rx, ry) = match normalized {
            0 => (dx, dy),
            90_000_000 => (-dy, dx),
            180_000_000 => (-dx, -dy),
            270_000_000 => (dy, -dx),
            _ => {
                let rad = angle.to_rad();
                let (sin, cos) = rad.sin_cos();
                let fx = dx as f64 * cos - dy as f64 * sin;
                let fy = dx as f64 * sin + dy as f64 * cos;
                (round_to_i64(fx), round_to_i64(fy))
            }
        };
        Point::new(
            center.x + Length::from_nanometers(rx),
            center.y + Length::from_nanometers(ry),
        )
    }

    /// Mirrors about a vertical axis (flips X) through `center`.
    pub fn mirrored_horizontal(&self, center: Point) -> Point {
        Point::new(center.x - (self.x - center.x), self.y)
    }

    /// Mirrors about a horizontal axis (flips Y) through `center`.
    pub fn mirrored_vertical(&self, center: Point) -> Point {
        Point::new(self.x, center.y - (self.y - center.y))
    }

    /// Rounds each coordinate to the nearest multiple of `grid` (must be > 0).
    pub fn mapped_to_grid(&self, grid: Length) -> Point {
        Point::new(snap(self.x, grid), snap(self.y, grid))
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        let dx = (self.x - other.x).nanometers() as f64;
        let dy = (self.y - other.y).nanometers() as f64;
        (dx * dx + dy * dy).sqrt()
    }

    /// Treats this point as a vector from the origin and returns its exact
    /// length, rounded to the nearest nanometer.
    pub fn vector_length(&self) -> Length {
        Length::from_nanometers(round_to_i64(self.distance_to(Point::ORIGIN)))
    }
}

fn snap(value: Length, grid: Length) -> Length {
    if grid.is_zero() {
        return value;
    }
    let g = grid.nanometers();
    let v = value.nanometers();
    let half = g.abs() / 2;
    let adjusted = if v >= 0 { v + half } else { v - half };
    Length::from_nanometers((adjusted / g) * g)
}

fn round_to_i64(x: f64) -> i64 {
    if x >= 0.0 {
        (x + 0.5).floor() as i64
    } else {
        (x - 0.5).ceil() as i64
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

impl Neg for Point {
    type Output = Point;
    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotates_90_degree_multiples_exactly() {
        let p = Point::new(Length::from_nanometers(1000), Length::from_nanometers(0));
        let rotated = p.rotated(Angle::deg90(), Point::ORIGIN);
        assert_eq!(rotated, Point::new(Length::from_nanometers(0), Length::from_nanometers(1000)));
    }

    #[test]
    fn mirrors_about_center() {
        let center = Point::new(Length::from_nanometers(500), Length::from_nanometers(0));
        let p = Point::new(Length::from_nanometers(1000), Length::from_nanometers(200));
        let mirrored = p.mirrored_horizontal(center);
        assert_eq!(mirrored.x, Length::from_nanometers(0));
        assert_eq!(mirrored.y, Length::from_nanometers(200));
    }

    #[test]
    fn snaps_to_grid() {
        let p = Point::new(Length::from_nanometers(1240), Length::from_nanometers(-1260));
        let snapped = p.mapped_to_grid(Length::from_nanometers(1000));
        assert_eq!(snapped, Point::new(Length::from_nanometers(1000), Length::from_nanometers(-1000)));
    }
}
