//! Axis-aligned regions used for node extents and query windows

use crate::Point;
use geo::{Coord, Rect};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Closed axis-aligned rectangle `[min_x, max_x] × [min_y, max_y]`
///
/// Corners are taken as given: `min_x <= max_x` and `min_y <= max_y` are expected
/// but not checked. An inverted region never panics, it just contains nothing and
/// only "intersects" according to the raw comparisons in [`Region::intersects`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Region {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Region {
    #[inline]
    pub const fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Square region centered on `(cx, cy)` extending `half_extent` in every direction
    #[inline]
    pub fn from_center(cx: f64, cy: f64, half_extent: f64) -> Self {
        Self {
            min_x: cx - half_extent,
            min_y: cy - half_extent,
            max_x: cx + half_extent,
            max_y: cy + half_extent,
        }
    }

    /// Check whether the point lies inside, boundaries included on all four sides
    #[inline]
    pub fn contains(&self, point: &Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }

    /// Check whether two regions share at least one point
    ///
    /// Regions that only touch along an edge or a corner intersect.
    #[inline]
    pub fn intersects(&self, other: &Region) -> bool {
        !(other.min_x > self.max_x
            || other.max_x < self.min_x
            || other.min_y > self.max_y
            || other.max_y < self.min_y)
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    #[inline]
    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Split into the four quadrants a node creates when it subdivides
    ///
    /// Returned in NW, NE, SW, SE order, where "north" is the half with the smaller `y`.
    /// Neighbouring quadrants share their boundary line.
    pub fn quadrants(&self) -> [Region; 4] {
        let Point { x: mid_x, y: mid_y } = self.center();

        [
            Region::new(self.min_x, self.min_y, mid_x, mid_y),
            Region::new(mid_x, self.min_y, self.max_x, mid_y),
            Region::new(self.min_x, mid_y, mid_x, self.max_y),
            Region::new(mid_x, mid_y, self.max_x, self.max_y),
        ]
    }
}

impl From<Rect<f64>> for Region {
    #[inline]
    fn from(rect: Rect<f64>) -> Self {
        let min = rect.min();
        let max = rect.max();
        Self::new(min.x, min.y, max.x, max.y)
    }
}

/// Note that `Rect::new` reorders inverted corners, so an inverted region does not
/// survive the round trip unchanged.
impl From<Region> for Rect<f64> {
    #[inline]
    fn from(region: Region) -> Self {
        Rect::new(
            Coord {
                x: region.min_x,
                y: region.min_y,
            },
            Coord {
                x: region.max_x,
                y: region.max_y,
            },
        )
    }
}
