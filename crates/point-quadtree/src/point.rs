//! 2D point value stored by the index

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A 2D coordinate
///
/// Points carry no identity: two points with the same coordinates are
/// indistinguishable, and the index stores duplicates as separate entries.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point {
    #[inline]
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<geo::Coord<f64>> for Point {
    #[inline]
    fn from(coord: geo::Coord<f64>) -> Self {
        Self {
            x: coord.x,
            y: coord.y,
        }
    }
}

impl From<geo::Point<f64>> for Point {
    #[inline]
    fn from(point: geo::Point<f64>) -> Self {
        Self {
            x: point.x(),
            y: point.y(),
        }
    }
}

impl From<Point> for geo::Point<f64> {
    #[inline]
    fn from(point: Point) -> Self {
        geo::Point::new(point.x, point.y)
    }
}
