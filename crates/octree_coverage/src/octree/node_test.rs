use std::collections::HashSet;

use super::*;
use crate::octree::MAX_OCTREE_DEPTH;

// =========================================================================
// Batch 1: OctreeNode Tests
// =========================================================================

/// Nodes differing only in depth are distinct keys of the leaf index.
#[test]
fn test_depth_distinguishes_nodes() {
  let set: HashSet<OctreeNode> = [
    OctreeNode::new(1, 1, 0, 1),
    OctreeNode::new(1, 1, 0, 2),
    OctreeNode::new(1, 1, 0, 1),
  ]
  .into_iter()
  .collect();

  assert_eq!(set.len(), 2);
  assert_eq!(OctreeNode::new(1, 1, 0, 2).cells_per_axis(), 4);
}

/// All 8 octants (0-7) should produce children one level deeper.
///
/// Octant bits: X (bit 0), Y (bit 1), Z (bit 2)
#[test]
fn test_get_child_all_8_octants() {
  let parent = OctreeNode::new(3, 4, 5, 4);

  for octant in 0u8..8 {
    let child = parent
      .get_child(octant)
      .unwrap_or_else(|| panic!("Octant {} should return a child", octant));

    assert_eq!(child.x, parent.x * 2 + (octant & 1) as u32);
    assert_eq!(child.y, parent.y * 2 + ((octant >> 1) & 1) as u32);
    assert_eq!(child.z, parent.z * 2 + ((octant >> 2) & 1) as u32);
    assert_eq!(child.depth, parent.depth + 1, "Octant {} depth mismatch", octant);
    assert_eq!(child.octant_in_parent(), octant);
  }
}

/// Children stop at the deepest grid the u32 coordinates address.
#[test]
fn test_get_child_at_max_depth_returns_none() {
  let node = OctreeNode::new(0, 0, 0, MAX_OCTREE_DEPTH);
  assert!(node.get_child(0).is_none());
}

/// The root has no parent.
#[test]
fn test_root_has_no_parent() {
  assert!(OctreeNode::ROOT.get_parent().is_none());
  assert_eq!(OctreeNode::ROOT.cells_per_axis(), 1);
}

/// Walking down then up returns to the starting cell.
#[test]
fn test_descend_then_ascend() {
  let start = OctreeNode::new(7, 8, 9, 5);

  for octant in 0u8..8 {
    let up = start.get_child(octant).and_then(|child| child.get_parent());
    assert_eq!(up, Some(start), "Octant {}", octant);
  }
}
