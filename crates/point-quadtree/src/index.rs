//! PointIndex - Top-level manager for the quadtree, counters, and queries
//!
//! This module provides the high-level API most callers want: build an index from a
//! [`Config`], feed it points, and run single or batched range queries.

use crate::{Point, Region, Result, SpatialNode};

use rayon::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for the point index
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// Region covered by the root node. Points outside it are rejected.
    /// Default: [0, 1000] × [0, 1000]
    pub region: Region,
    /// Points a node buffers before it splits into quadrants. Must be at least 1.
    /// Default: 4
    pub capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            region: Region::new(0.0, 0.0, 1000.0, 1000.0),
            capacity: 4,
        }
    }
}

/// Information about the index
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IndexInfo {
    /// Number of points stored
    pub point_count: usize,
    /// Number of insertions rejected for lying outside the root region
    pub rejected_count: usize,
    /// Number of nodes in the tree, root included
    pub node_count: usize,
    /// Levels below the root (0 while the root is a leaf)
    pub depth: u32,
}

/// Top-level manager for the quadtree and its queries
#[derive(Debug, Clone)]
pub struct PointIndex {
    /// Root of the spatial index
    root: SpatialNode,
    /// Configuration settings
    config: Config,
    /// Points accepted so far
    point_count: usize,
    /// Points rejected so far
    rejected_count: usize,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl PointIndex {
    /// Create a new, empty index with the given configuration
    ///
    /// Fails with [`crate::IndexError::ZeroCapacity`] if `config.capacity` is 0.
    pub fn new(config: Config) -> Result<Self> {
        let root = SpatialNode::new(config.region, config.capacity)?;

        tracing::debug!(
            region = ?config.region,
            capacity = config.capacity,
            "created point index"
        );

        Ok(Self {
            root,
            config,
            point_count: 0,
            rejected_count: 0,
        })
    }

    /// Insert a single point
    ///
    /// Returns `false` if the point lies outside the configured region. The point is then
    /// dropped and only counted; callers that care must check the return value.
    pub fn insert(&mut self, point: Point) -> bool {
        let inserted = self.root.insert(point);
        if inserted {
            self.point_count += 1;
        } else {
            self.rejected_count += 1;
            tracing::debug!(x = point.x, y = point.y, "point outside index region");
        }
        inserted
    }

    /// Insert many points in iteration order, returning how many were accepted
    pub fn insert_many<I>(&mut self, points: I) -> usize
    where
        I: IntoIterator<Item = Point>,
    {
        #[cfg(feature = "profiling")]
        profiling::scope!("index::insert_many");

        points
            .into_iter()
            .filter(|&point| self.insert(point))
            .count()
    }

    /// Collect every stored point inside `range`
    ///
    /// Result order is reproducible for an unchanged index but otherwise unspecified.
    #[inline]
    pub fn query(&self, range: &Region) -> Vec<Point> {
        self.root.query(range)
    }

    /// Append every stored point inside `range` to `results`
    #[inline]
    pub fn query_into(&self, range: &Region, results: &mut Vec<Point>) {
        self.root.query_range(range, results);
    }

    /// Run many queries in parallel
    ///
    /// The tree is only read, so queries share it across threads. Result `i` is exactly
    /// what `query(&ranges[i])` returns, in the same order.
    pub fn query_batch(&self, ranges: &[Region]) -> Vec<Vec<Point>> {
        #[cfg(feature = "profiling")]
        profiling::scope!("index::query_batch");

        ranges.par_iter().map(|range| self.root.query(range)).collect()
    }

    /// Get total number of stored points
    ///
    /// This is O(1) as the value is counted on insertion.
    #[inline]
    pub fn len(&self) -> usize {
        self.point_count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.point_count == 0
    }

    /// Get index information
    ///
    /// Walks the tree for node count and depth.
    pub fn info(&self) -> IndexInfo {
        IndexInfo {
            point_count: self.point_count,
            rejected_count: self.rejected_count,
            node_count: self.root.node_count(),
            depth: self.root.depth(),
        }
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the root node for inspection
    #[inline]
    pub fn root(&self) -> &SpatialNode {
        &self.root
    }

    /// Remove all points, keeping the configuration
    pub fn clear(&mut self) {
        tracing::info!(
            points = self.point_count,
            rejected = self.rejected_count,
            "clearing point index"
        );

        self.root.reset();
        self.point_count = 0;
        self.rejected_count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IndexError;

    fn create_test_points() -> Vec<Point> {
        // A diagonal line plus a few points on quadrant edges
        let mut points: Vec<Point> = (0..100)
            .map(|i| Point::new(i as f64 * 10.0, i as f64 * 10.0))
            .collect();
        points.push(Point::new(500.0, 0.0));
        points.push(Point::new(0.0, 500.0));
        points.push(Point::new(1000.0, 1000.0));
        points
    }

    #[test]
    fn test_index_creation() {
        let config = Config::default();
        let index = PointIndex::new(config).unwrap();
        assert_eq!(index.len(), 0);
        assert!(index.is_empty());
        assert_eq!(
            index.info(),
            IndexInfo {
                point_count: 0,
                rejected_count: 0,
                node_count: 1,
                depth: 0,
            }
        );
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.capacity, 4);
        assert_eq!(config.region, Region::new(0.0, 0.0, 1000.0, 1000.0));
    }

    #[test]
    fn test_zero_capacity_config() {
        let config = Config {
            capacity: 0,
            ..Config::default()
        };
        assert_eq!(PointIndex::new(config).unwrap_err(), IndexError::ZeroCapacity);
    }

    #[test]
    fn test_insert_and_query() {
        let mut index = PointIndex::new(Config::default()).unwrap();
        let points = create_test_points();

        assert_eq!(index.insert_many(points.clone()), points.len());
        assert_eq!(index.len(), points.len());

        let all = index.query(&index.config().region);
        assert_eq!(all.len(), points.len());
        for point in &points {
            assert!(all.contains(point));
        }

        let window = index.query(&Region::new(95.0, 95.0, 205.0, 205.0));
        assert_eq!(window.len(), 11);
        assert!(window.iter().all(|p| p.x >= 95.0 && p.x <= 205.0));
    }

    #[test]
    fn test_rejected_points_are_counted() {
        let mut index = PointIndex::new(Config::default()).unwrap();

        assert!(index.insert(Point::new(10.0, 10.0)));
        assert!(!index.insert(Point::new(-10.0, 10.0)));
        assert!(!index.insert(Point::new(10.0, 1000.1)));
        assert_eq!(
            index.insert_many([Point::new(1.0, 1.0), Point::new(2000.0, 1.0)]),
            1
        );

        let info = index.info();
        assert_eq!(info.point_count, 2);
        assert_eq!(info.rejected_count, 3);
        assert_eq!(index.query(&index.config().region).len(), 2);
    }

    #[test]
    fn test_query_into_appends() {
        let mut index = PointIndex::new(Config::default()).unwrap();
        index.insert(Point::new(1.0, 1.0));

        let mut results = Vec::new();
        index.query_into(&Region::new(0.0, 0.0, 2.0, 2.0), &mut results);
        index.query_into(&Region::new(0.0, 0.0, 2.0, 2.0), &mut results);
        assert_eq!(results, vec![Point::new(1.0, 1.0); 2]);
    }

    #[test]
    fn test_query_batch_matches_sequential() {
        let mut index = PointIndex::new(Config::default()).unwrap();
        index.insert_many(create_test_points());

        let ranges: Vec<Region> = (0..20)
            .map(|i| Region::from_center(i as f64 * 50.0, i as f64 * 50.0, 30.0))
            .chain(std::iter::once(Region::new(2000.0, 2000.0, 3000.0, 3000.0)))
            .collect();

        let batch = index.query_batch(&ranges);
        assert_eq!(batch.len(), ranges.len());
        for (range, results) in ranges.iter().zip(&batch) {
            assert_eq!(results, &index.query(range));
        }
        assert!(batch.last().unwrap().is_empty());
    }

    #[test]
    fn test_info_tracks_tree_shape() {
        let config = Config {
            region: Region::new(0.0, 0.0, 100.0, 100.0),
            capacity: 1,
        };
        let mut index = PointIndex::new(config).unwrap();
        index.insert(Point::new(10.0, 10.0));
        index.insert(Point::new(20.0, 20.0));
        index.insert(Point::new(90.0, 90.0));

        let info = index.info();
        assert_eq!(info.point_count, 3);
        assert_eq!(info.node_count, 5);
        assert_eq!(info.depth, 1);
        assert_eq!(index.root().len(), 3);
    }

    #[test]
    fn test_clear() {
        let mut index = PointIndex::new(Config::default()).unwrap();
        index.insert_many(create_test_points());
        index.insert(Point::new(-1.0, -1.0));

        index.clear();

        assert!(index.is_empty());
        assert_eq!(
            index.info(),
            IndexInfo {
                point_count: 0,
                rejected_count: 0,
                node_count: 1,
                depth: 0,
            }
        );
        assert!(index.query(&index.config().region).is_empty());
        assert_eq!(index.config(), &Config::default());
    }
}
