//! Point Quadtree - Point-Region Spatial Index
//!
//! This library provides a point-region quadtree: a recursive partition of a rectangular
//! domain that stores 2D points in bounded per-node buffers and answers axis-aligned range
//! queries by pruning every subtree whose region does not touch the query window.
//!
//! # Architecture
//!
//! - **[`Point`]**: Plain 2D coordinate value
//! - **[`Region`]**: Closed axis-aligned rectangle with inclusive predicates
//! - **[`SpatialNode`]**: Quadtree node owning a point buffer and, once full, four children
//! - **[`PointIndex`]**: High-level index with configuration, counters and batch queries
//!
//! # Behavior worth knowing
//!
//! - A node keeps its buffered points after it subdivides, so internal nodes hold points too.
//! - Points on a shared quadrant edge land in the first child that accepts them, trying
//!   NW, NE, SW, SE in that order.
//! - Inserting a point outside the root region returns `false`; nothing else reports it.
//!
//! # Performance Characteristics
//!
//! - **Insert**: O(D) where D=depth of the accepting leaf
//! - **Query**: O(N_v + K) where N_v=visited nodes, K=results
//! - **Memory**: O(N) for points + O(M) for nodes

mod index;
mod point;
mod quadtree;
mod region;

// Public API exports
pub use index::{Config, IndexInfo, PointIndex};
pub use point::Point;
pub use quadtree::{MAX_DEPTH, Quadrant, SpatialNode};
pub use region::Region;

/// Error types for the index
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum IndexError {
    #[error("Node capacity must be at least 1")]
    ZeroCapacity,
}

pub type Result<T> = std::result::Result<T, IndexError>;
