//! OctreeNode - immutable value type representing a cell of the octree.
//!
//! Nodes are identified by their grid coordinates at their depth.
//! Depth 0 = the root cell, higher depth = smaller cells.

/// Octree node - immutable value type.
///
/// Grid coordinates are at the node's own depth: a node at depth `d` lives on
/// a `2^d` cells-per-axis grid spanning the root bounds.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct OctreeNode {
  /// Grid X position at this node's depth
  pub x: u32,
  /// Grid Y position at this node's depth
  pub y: u32,
  /// Grid Z position at this node's depth
  pub z: u32,
  /// Subdivision depth (0 = root)
  pub depth: u8,
}

impl OctreeNode {
  /// The root node covering the whole tree.
  pub const ROOT: Self = Self {
    x: 0,
    y: 0,
    z: 0,
    depth: 0,
  };

  /// Create a new node at the given position and depth.
  pub fn new(x: u32, y: u32, z: u32, depth: u8) -> Self {
    Self { x, y, z, depth }
  }

  /// Number of cells per axis on this node's grid (`2^depth`).
  #[inline]
  pub fn cells_per_axis(&self) -> u32 {
    1u32 << self.depth
  }

  /// Get child node (one level deeper).
  ///
  /// Octant: 0-7 where bits represent +X, +Y, +Z offsets:
  /// - bit 0: X offset (0 or 1)
  /// - bit 1: Y offset (0 or 1)
  /// - bit 2: Z offset (0 or 1)
  ///
  /// Returns None once the grid would exceed [`super::MAX_OCTREE_DEPTH`].
  pub fn get_child(&self, octant: u8) -> Option<Self> {
    if self.depth >= super::MAX_OCTREE_DEPTH {
      return None;
    }
    let cx = (octant & 1) as u32;
    let cy = ((octant >> 1) & 1) as u32;
    let cz = ((octant >> 2) & 1) as u32;
    Some(Self {
      x: self.x * 2 + cx,
      y: self.y * 2 + cy,
      z: self.z * 2 + cz,
      depth: self.depth + 1,
    })
  }

  /// Get parent node (one level shallower).
  ///
  /// Returns None for the root.
  pub fn get_parent(&self) -> Option<Self> {
    if self.depth == 0 {
      return None;
    }
    Some(Self {
      x: self.x / 2,
      y: self.y / 2,
      z: self.z / 2,
      depth: self.depth - 1,
    })
  }

  /// Octant index of this node inside its parent (0 for the root).
  #[inline]
  pub fn octant_in_parent(&self) -> u8 {
    if self.depth == 0 {
      return 0;
    }
    ((self.x & 1) | ((self.y & 1) << 1) | ((self.z & 1) << 2)) as u8
  }
}

#[cfg(test)]
#[path = "node_test.rs"]
mod node_test;
