//! Quadtree nodes for point-region indexing
//!
//! A node stores up to `capacity` points in its own buffer. The first insert that finds the
//! buffer full splits the node into four equal quadrants and routes that point (and every
//! later one) to the children. The buffer is kept as-is after the split, so internal nodes
//! keep answering for the points they accepted while they were leaves.

use crate::{IndexError, Point, Region, Result};
use smallvec::SmallVec;

/// Maximum depth of the quadtree to prevent infinite recursion
///
/// More than `capacity` identical points would otherwise keep splitting the same corner
/// until the stack runs out. A node at this depth stores everything it is given.
pub const MAX_DEPTH: u32 = 32;

/// Inline storage for node buffers (the default capacity fits without allocating)
type PointBuffer = SmallVec<[Point; 4]>;

/// Position of a child within its parent
///
/// "North" is the half with the smaller `y` (screen-style axes). The declaration order is
/// the order children are tried on insertion and visited by queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

impl Quadrant {
    /// All quadrants, in insertion/traversal order
    pub const ALL: [Quadrant; 4] = [
        Quadrant::NorthWest,
        Quadrant::NorthEast,
        Quadrant::SouthWest,
        Quadrant::SouthEast,
    ];

    /// Index of this quadrant in a node's children array
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// A single node in the quadtree
///
/// A node is either a leaf (no children) or internal (exactly four children, NW, NE, SW, SE).
/// Each node exclusively owns its children; dropping a node drops its whole subtree.
#[derive(Debug, Clone)]
pub struct SpatialNode {
    /// Extent of this node, fixed at construction
    region: Region,
    /// Buffer size before the node splits (shared by the whole tree)
    capacity: usize,
    /// Depth level in the tree (0 = root)
    level: u32,
    /// Points inserted directly into this node, in insertion order
    points: PointBuffer,
    /// Child nodes (NW, NE, SW, SE) if subdivided
    children: Option<Box<[SpatialNode; 4]>>,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl SpatialNode {
    /// Create an empty root node
    ///
    /// # Arguments
    /// * `region` - Extent of the whole tree; points outside it are rejected
    /// * `capacity` - Points a node buffers before it splits (at least 1)
    pub fn new(region: Region, capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(IndexError::ZeroCapacity);
        }
        Ok(Self::new_child(region, capacity, 0))
    }

    /// Create a node below the root; capacity was validated by the root
    fn new_child(region: Region, capacity: usize, level: u32) -> Self {
        Self {
            region,
            capacity,
            level,
            points: PointBuffer::new(),
            children: None,
        }
    }

    /// Insert a point somewhere in this subtree
    ///
    /// Returns `false` if the point lies outside this node's region (or is NaN), in which
    /// case nothing is modified. Otherwise the point is stored exactly once:
    /// - in this node's buffer while it is a leaf with room left,
    /// - else in the first child, tried NW, NE, SW, SE, whose region contains it.
    ///
    /// Points on a shared quadrant edge are contained by more than one child and therefore
    /// always end up in the earliest of them in that order.
    pub fn insert(&mut self, point: Point) -> bool {
        if !self.region.contains(&point) {
            return false;
        }

        if self.children.is_none()
            && (self.points.len() < self.capacity || self.level >= MAX_DEPTH)
        {
            self.points.push(point);
            return true;
        }

        // Ensure children exist; the buffer stays where it is
        if self.children.is_none() {
            self.subdivide();
        }

        match &mut self.children {
            Some(children) => children.iter_mut().any(|child| child.insert(point)),
            None => false,
        }
    }

    /// Subdivide this node into 4 children
    fn subdivide(&mut self) {
        if self.children.is_some() {
            return; // Already subdivided
        }

        let capacity = self.capacity;
        let child_level = self.level + 1;

        tracing::trace!(
            level = self.level,
            region = ?self.region,
            buffered = self.points.len(),
            "subdividing node"
        );

        let children = self
            .region
            .quadrants()
            .map(|region| SpatialNode::new_child(region, capacity, child_level));

        self.children = Some(Box::new(children));
    }

    /// Drop every point and child, turning this node back into an empty leaf
    pub(crate) fn reset(&mut self) {
        self.points.clear();
        self.children = None;
    }

    /// Append every point of this subtree that lies inside `range` to `results`
    ///
    /// Subtrees whose region does not intersect `range` are skipped without visiting any of
    /// their points. Results come out in pre-order: a node's own points first, then its
    /// children NW, NE, SW, SE. The order is reproducible for an unchanged tree but carries
    /// no spatial meaning.
    pub fn query_range(&self, range: &Region, results: &mut Vec<Point>) {
        if !self.region.intersects(range) {
            return;
        }

        results.extend(self.points.iter().filter(|p| range.contains(p)).copied());

        if let Some(children) = &self.children {
            for child in children.iter() {
                child.query_range(range, results);
            }
        }
    }

    /// Collect every point of this subtree that lies inside `range`
    pub fn query(&self, range: &Region) -> Vec<Point> {
        let mut results = Vec::new();
        self.query_range(range, &mut results);
        results
    }

    #[inline]
    pub fn region(&self) -> &Region {
        &self.region
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Depth of this node below the root (0 = root)
    #[inline]
    pub fn level(&self) -> u32 {
        self.level
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Points stored directly in this node, not including its children
    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Children in NW, NE, SW, SE order, if the node has been subdivided
    #[inline]
    pub fn children(&self) -> Option<&[SpatialNode; 4]> {
        self.children.as_deref()
    }

    #[inline]
    pub fn child(&self, quadrant: Quadrant) -> Option<&SpatialNode> {
        self.children
            .as_ref()
            .map(|children| &children[quadrant.index()])
    }

    /// Total number of points stored in this subtree
    pub fn len(&self) -> usize {
        self.points.len()
            + self
                .children
                .as_ref()
                .map_or(0, |children| children.iter().map(SpatialNode::len).sum())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of nodes in this subtree, this one included
    pub fn node_count(&self) -> usize {
        1 + self.children.as_ref().map_or(0, |children| {
            children.iter().map(SpatialNode::node_count).sum()
        })
    }

    /// Number of levels below this node (0 for a leaf)
    pub fn depth(&self) -> u32 {
        self.children.as_ref().map_or(0, |children| {
            1 + children.iter().map(SpatialNode::depth).max().unwrap_or(0)
        })
    }
}
