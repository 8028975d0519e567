use super::*;

// =========================================================================
// Batch 1: OctreeLeaves Tests
// =========================================================================

/// Empty leaves report zero length and depth.
#[test]
fn test_empty_leaves() {
  let leaves = OctreeLeaves::new();
  assert!(leaves.is_empty());
  assert_eq!(leaves.len(), 0);
  assert_eq!(leaves.max_depth(), 0);
}

/// Region ids are assigned in insertion order and map back to nodes.
#[test]
fn test_push_assigns_sequential_ids() {
  let mut leaves = OctreeLeaves::new();
  let a = OctreeNode::new(0, 0, 0, 1);
  let b = OctreeNode::new(1, 0, 0, 1);

  assert_eq!(leaves.push(a, vec![0, 2]), 0);
  assert_eq!(leaves.push(b, vec![]), 1);

  assert_eq!(leaves.node(1), &b);
  assert_eq!(leaves.region_of(&a), Some(0));
  assert_eq!(leaves.region_of(&OctreeNode::ROOT), None);
  assert_eq!(leaves.points(0), &[0, 2]);
  assert!(leaves.points(1).is_empty());
}

/// max_depth reports the deepest leaf.
#[test]
fn test_max_depth() {
  let mut leaves = OctreeLeaves::new();
  leaves.push(OctreeNode::new(0, 0, 0, 1), vec![]);
  leaves.push(OctreeNode::new(3, 2, 1, 3), vec![]);
  assert_eq!(leaves.max_depth(), 3);
  assert!(leaves.contains(&OctreeNode::new(3, 2, 1, 3)));
}
