use std::convert;
use std::ops::{Add, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A `Point` consists of an x and y coordinate.
#[derive(Debug, PartialEq, Copy, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(self, other: Point) -> f64 {
        (other - self).length()
    }

    /// Linear interpolation towards `other`, `t` in `0.0..=1.0`.
    pub fn lerp(self, other: Point, t: f64) -> Point {
        Point::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }
}

impl convert::From<(f64, f64)> for Point {
    fn from(val: (f64, f64)) -> Self {
        Self { x: val.0, y: val.1 }
    }
}

impl convert::From<lyon_geom::Point<f64>> for Point {
    fn from(val: lyon_geom::Point<f64>) -> Self {
        Self { x: val.x, y: val.y }
    }
}

impl convert::From<Point> for lyon_geom::Point<f64> {
    fn from(val: Point) -> Self {
        lyon_geom::point(val.x, val.y)
    }
}

impl Add<DirectionVector> for Point {
    type Output = Point;

    fn add(self, rhs: DirectionVector) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = DirectionVector;

    fn sub(self, rhs: Point) -> DirectionVector {
        DirectionVector::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A 2D direction vector. Its angle is derived on demand, never stored.
#[derive(Debug, PartialEq, Copy, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DirectionVector {
    pub x: f64,
    pub y: f64,
}

impl DirectionVector {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Angle from the positive x axis in degrees, in `-180.0..=180.0`.
    pub fn angle_degrees(self) -> f64 {
        self.y.atan2(self.x).to_degrees()
    }
}

impl convert::From<(f64, f64)> for DirectionVector {
    fn from(val: (f64, f64)) -> Self {
        Self { x: val.0, y: val.1 }
    }
}

/// A polyline is a vector of `Point` instances.
pub type Polyline = Vec<Point>;

/// An ordered sequence of direction vectors summarizing one stroke.
pub type Signature = Vec<DirectionVector>;
