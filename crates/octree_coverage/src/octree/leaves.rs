//! OctreeLeaves - the leaf regions of a built octree.
//!
//! The tree structure is implicit: parent/child relationships are computed
//! on-demand via coordinate math. Only leaves are stored, in region order.

use std::collections::HashMap;

use super::{OctreeNode, RegionId};

/// Leaf regions in region-index order.
///
/// Region `i` is `nodes[i]`; `index` maps a node back to its region and
/// `points[i]` holds the indices of the build points inside region `i`.
#[derive(Clone, Debug, Default)]
pub struct OctreeLeaves {
  nodes: Vec<OctreeNode>,
  index: HashMap<OctreeNode, RegionId>,
  points: Vec<Vec<usize>>,
}

impl OctreeLeaves {
  /// Create empty leaves set.
  pub fn new() -> Self {
    Self::default()
  }

  /// Number of leaves.
  pub fn len(&self) -> usize {
    self.nodes.len()
  }

  /// Check if empty.
  pub fn is_empty(&self) -> bool {
    self.nodes.is_empty()
  }

  /// Append a leaf and return its region index.
  ///
  /// Pushing the same node twice is a build bug.
  pub fn push(&mut self, node: OctreeNode, points: Vec<usize>) -> RegionId {
    let id = self.nodes.len();
    let previous = self.index.insert(node, id);
    debug_assert!(previous.is_none(), "Leaf {:?} inserted twice", node);
    self.nodes.push(node);
    self.points.push(points);
    id
  }

  /// Node of region `id`.
  #[inline]
  pub fn node(&self, id: RegionId) -> &OctreeNode {
    &self.nodes[id]
  }

  /// Region index of a leaf node, if it is one.
  #[inline]
  pub fn region_of(&self, node: &OctreeNode) -> Option<RegionId> {
    self.index.get(node).copied()
  }

  /// Check if a node is a leaf.
  pub fn contains(&self, node: &OctreeNode) -> bool {
    self.index.contains_key(node)
  }

  /// Build point indices inside region `id`.
  #[inline]
  pub fn points(&self, id: RegionId) -> &[usize] {
    &self.points[id]
  }

  /// Iterate over leaves in region order.
  pub fn iter(&self) -> impl Iterator<Item = &OctreeNode> {
    self.nodes.iter()
  }

  /// Deepest leaf depth (0 when empty).
  pub fn max_depth(&self) -> u8 {
    self.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
  }
}

#[cfg(test)]
#[path = "leaves_test.rs"]
mod leaves_test;
