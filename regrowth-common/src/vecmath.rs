use serde::{Deserialize, Serialize};
use std::ops::Sub;

/// A simple 2D vector struct, used for cell offsets from the grid center.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    /// Creates a new Vec2.
    pub fn new(x: f64, y: f64) -> Self {
        Vec2 { x, y }
    }

    /// Position of a grid cell; columns run along x and rows along y.
    pub fn from_cell(row: usize, col: usize) -> Self {
        Vec2::new(col as f64, row as f64)
    }

    pub fn length_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    pub fn length(&self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Calculates the distance to another vector (point).
    pub fn distance(&self, other: Vec2) -> f64 {
        (*self - other).length()
    }
}

impl Sub for Vec2 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self { x: self.x - other.x, y: self.y - other.y }
    }
}

/// Converts a vector to an angle (in radians) in `(-pi, pi]`.
/// Uses atan2 for quadrant correctness.
pub fn vec_to_angle(vec: Vec2) -> f64 {
    vec.y.atan2(vec.x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angle_follows_atan2_quadrants() {
        assert_eq!(vec_to_angle(Vec2::new(1.0, 0.0)), 0.0);
        assert!((vec_to_angle(Vec2::new(0.0, 1.0)) - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert!((vec_to_angle(Vec2::new(-1.0, 0.0)) - std::f64::consts::PI).abs() < 1e-12);
    }

    #[test]
    fn distance_between_cells() {
        let a = Vec2::from_cell(0, 0);
        let b = Vec2::from_cell(4, 3);
        assert_eq!(a.distance(b), 5.0);
    }
}
