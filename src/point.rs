use std::fmt::{self, Display};
use std::ops::{Add, Mul, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A point (or vector) with three coordinates.
///
/// Points are plain values and are never mutated once they are part of a [Mesh](crate::Mesh).
/// The `z` coordinate is reserved: every triangulation operation treats points as two
/// dimensional and requires `z` to be zero.
#[derive(Debug, PartialEq, PartialOrd, Clone, Copy, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct Point {
    /// The point's x coordinate
    pub x: f64,
    /// The point's y coordinate
    pub y: f64,
    /// The point's z coordinate. Must be zero for all 2D operations.
    pub z: f64,
}

impl Point {
    /// Creates a new two dimensional point (`z` is set to zero).
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y, z: 0.0 }
    }

    /// Creates a new point with all three coordinates.
    #[inline]
    pub const fn new_3d(x: f64, y: f64, z: f64) -> Self {
        Point { x, y, z }
    }

    /// Returns `true` if this point lies in the z = 0 plane.
    #[inline]
    pub fn is_planar(&self) -> bool {
        self.z == 0.0
    }

    /// Returns the euclidean distance between this point and another point.
    ///
    /// Both points must be two dimensional.
    pub fn distance_2d(&self, other: Point) -> f64 {
        (other - *self).norm_2d()
    }

    /// Returns the length of this vector.
    ///
    /// The vector must be two dimensional.
    pub fn norm_2d(&self) -> f64 {
        self.length2().sqrt()
    }

    /// Returns a vector with the same direction and unit length.
    ///
    /// The vector must be two dimensional. Normalizing the zero vector yields NaN coordinates.
    pub fn normalize(&self) -> Point {
        let norm = self.norm_2d();
        Point::new(self.x / norm, self.y / norm)
    }

    pub(crate) fn length2(&self) -> f64 {
        debug_assert!(self.is_planar(), "2D operation on a point with z != 0");
        self.x * self.x + self.y * self.y
    }
}

impl Add for Point {
    type Output = Point;

    #[inline]
    fn add(self, other: Point) -> Point {
        Point::new_3d(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for Point {
    type Output = Point;

    #[inline]
    fn sub(self, other: Point) -> Point {
        Point::new_3d(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    #[inline]
    fn mul(self, factor: f64) -> Point {
        Point::new_3d(self.x * factor, self.y * factor, self.z * factor)
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.x, self.y, self.z)
    }
}

impl From<[f64; 2]> for Point {
    #[inline]
    fn from(source: [f64; 2]) -> Self {
        Self::new(source[0], source[1])
    }
}

impl From<(f64, f64)> for Point {
    #[inline]
    fn from(source: (f64, f64)) -> Self {
        Self::new(source.0, source.1)
    }
}

impl From<Point> for [f64; 2] {
    #[inline]
    fn from(point: Point) -> Self {
        [point.x, point.y]
    }
}

#[cfg(test)]
mod test {
    use super::Point;
    use approx::assert_relative_eq;

    #[test]
    fn test_arithmetic() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(-3.0, 0.5);
        assert_eq!(a + b, Point::new(-2.0, 2.5));
        assert_eq!(a - b, Point::new(4.0, 1.5));
        assert_eq!(a * 2.0, Point::new(2.0, 4.0));
        assert_eq!(
            Point::new_3d(1.0, 1.0, 1.0) + Point::new_3d(0.0, 0.0, 2.0),
            Point::new_3d(1.0, 1.0, 3.0)
        );
    }

    #[test]
    fn test_distance_and_norm() {
        let a = Point::new(1.0, 1.0);
        let b = Point::new(4.0, 5.0);
        assert_relative_eq!(a.distance_2d(b), 5.0);
        assert_relative_eq!(b.distance_2d(a), 5.0);
        assert_relative_eq!(Point::new(3.0, -4.0).norm_2d(), 5.0);
        assert_eq!(a.distance_2d(a), 0.0);
    }

    #[test]
    fn test_normalize() {
        let n = Point::new(3.0, 4.0).normalize();
        assert_relative_eq!(n.x, 0.6);
        assert_relative_eq!(n.y, 0.8);
        assert_relative_eq!(n.norm_2d(), 1.0);
        assert!(Point::default().normalize().x.is_nan());
    }

    #[test]
    fn test_display() {
        assert_eq!(Point::new(1.5, -2.0).to_string(), "1.5, -2, 0");
    }

    #[test]
    fn test_conversions() {
        assert_eq!(Point::from([1.0, 2.0]), Point::new(1.0, 2.0));
        assert_eq!(Point::from((1.0, 2.0)), Point::new(1.0, 2.0));
        let raw: [f64; 2] = Point::new(3.0, 4.0).into();
        assert_eq!(raw, [3.0, 4.0]);
        assert!(Point::new(1.0, 2.0).is_planar());
        assert!(!Point::new_3d(1.0, 2.0, 3.0).is_planar());
    }
}
