//! OctreeConfig - build parameters for one octree level, and the coordinate
//! math mapping grid nodes to world-space bounds.

use glam::DVec3;
use serde::Deserialize;

use super::{DAabb3, OctreeNode};

/// Build parameters for one octree level.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct OctreeConfig {
  /// Deepest subdivision allowed (0 = root only).
  pub max_depth: u8,

  /// A node holding more points than this is split (while depth allows).
  pub max_points_per_region: usize,

  /// Make the root bounds a cube around the data centre before splitting.
  pub cubic_octants: bool,
}

impl OctreeConfig {
  pub fn new(max_depth: u8, max_points_per_region: usize) -> Self {
    Self {
      max_depth,
      max_points_per_region,
      ..Self::default()
    }
  }

  /// One config per level `0..=max_level`, where level `n` may subdivide to
  /// depth `n`.
  pub fn levels(max_level: u8, max_points_per_region: usize) -> Vec<Self> {
    (0..=max_level)
      .map(|depth| Self::new(depth, max_points_per_region))
      .collect()
  }
}

impl Default for OctreeConfig {
  fn default() -> Self {
    Self {
      max_depth: 3,
      max_points_per_region: 1,
      cubic_octants: true,
    }
  }
}

/// Maps grid nodes to world-space bounds inside a fixed root box.
///
/// Node corners are interpolated from the root corners, so faces shared by
/// neighbouring nodes are bit-identical regardless of depth.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OctreeGeometry {
  pub root: DAabb3,
}

impl OctreeGeometry {
  pub fn new(root: DAabb3) -> Self {
    Self { root }
  }

  /// Edge lengths of a cell at `depth`.
  #[inline]
  pub fn cell_size(&self, depth: u8) -> DVec3 {
    self.root.size() / (1u64 << depth) as f64
  }

  /// World-space position of grid corner `(x, y, z)` on the `depth` grid.
  #[inline]
  pub fn grid_corner(&self, x: u32, y: u32, z: u32, depth: u8) -> DVec3 {
    let cells = (1u64 << depth) as f64;
    let f = DVec3::new(x as f64, y as f64, z as f64) / cells;
    self.root.min * (DVec3::ONE - f) + self.root.max * f
  }

  /// Get world-space minimum corner of a node.
  #[inline]
  pub fn node_min(&self, node: &OctreeNode) -> DVec3 {
    self.grid_corner(node.x, node.y, node.z, node.depth)
  }

  /// World-space bounds of a node.
  pub fn node_bounds(&self, node: &OctreeNode) -> DAabb3 {
    DAabb3 {
      min: self.node_min(node),
      max: self.grid_corner(node.x + 1, node.y + 1, node.z + 1, node.depth),
    }
  }

  /// Get world-space center of a node.
  #[inline]
  pub fn node_center(&self, node: &OctreeNode) -> DVec3 {
    self.node_bounds(node).center()
  }

  /// Corner shared by all eight children of `node`.
  ///
  /// Unlike [`Self::node_center`] this is taken from the child grid, so it
  /// is exactly the face the children are bounded by.
  #[inline]
  pub fn split_point(&self, node: &OctreeNode) -> DVec3 {
    self.grid_corner(
      node.x * 2 + 1,
      node.y * 2 + 1,
      node.z * 2 + 1,
      node.depth + 1,
    )
  }

  /// Octant of `node` holding `point` under half-open `(min, max]` bounds.
  #[inline]
  pub fn octant_of(&self, node: &OctreeNode, point: DVec3) -> u8 {
    let mid = self.split_point(node);
    (point.x > mid.x) as u8 | ((point.y > mid.y) as u8) << 1 | ((point.z > mid.z) as u8) << 2
  }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
