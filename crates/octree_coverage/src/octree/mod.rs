//! Octree module: point-driven spatial subdivision into leaf regions.
//!
//! An [`Octree`] is built once from a point set and is immutable afterwards.
//! Its leaves are the *regions* every other layer talks about, addressed by
//! a [`RegionId`] in `0..leaf_count()`.
//!
//! # Depth Convention
//!
//! Depth 0 = the root cell, each step halves the cell edge:
//!
//! ```text
//! Cell Size = root_size / 2^depth
//! ```
//!
//! # Region Bounds
//!
//! Regions are half-open per axis, `(min, max]`. The build and every query
//! use the same split planes, so a point on a shared face always resolves
//! to the same region.
//!
//! # Module Structure
//!
//! - [`node`]: `OctreeNode` - immutable value type for octree positions
//! - [`config`]: `OctreeConfig` build knobs and `OctreeGeometry` coordinate
//!   math
//! - [`leaves`]: `OctreeLeaves` - leaf nodes in region order
//! - [`bounds`]: `DAabb3` and its `BoxPlane` faces

pub mod bounds;
pub mod config;
pub mod leaves;
pub mod node;

use glam::DVec3;

// Re-exports
pub use bounds::{BoxPlane, DAabb3};
pub use config::{OctreeConfig, OctreeGeometry};
pub use leaves::OctreeLeaves;
pub use node::OctreeNode;

/// Index of a leaf region inside one octree.
pub type RegionId = usize;

/// Deepest subdivision supported by the grid coordinates.
pub const MAX_OCTREE_DEPTH: u8 = 20;

/// Root padding relative to the largest data extent.
pub const FUDGE_RATIO: f64 = 1e-5;

/// Leaf regions met when walking grid rows through the tree.
///
/// `resolution` cells per axis (`2^deepest leaf depth`). Each row lists the
/// distinct regions in walking order with consecutive repeats removed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RegionRows {
  pub resolution: u32,
  /// Rows along +X, indexed `[z][y]`.
  pub along_x: Vec<Vec<Vec<RegionId>>>,
  /// Rows along +Y, indexed `[z][x]`.
  pub along_y: Vec<Vec<Vec<RegionId>>>,
  /// Rows along +Z, indexed `[y][x]`.
  pub along_z: Vec<Vec<Vec<RegionId>>>,
}

/// Immutable octree over a point set.
#[derive(Clone, Debug)]
pub struct Octree {
  config: OctreeConfig,
  geometry: OctreeGeometry,
  fudge_factor: f64,
  leaves: OctreeLeaves,
  points: Vec<DVec3>,
}

impl Octree {
  /// Build an octree over `points`.
  ///
  /// Nodes holding more than `max_points_per_region` points are split into
  /// all eight octants until `max_depth` is reached. Leaves are numbered in
  /// depth-first order, children 0..7. An empty point set gives an octree
  /// with no regions.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "octree::build"))]
  pub fn build(points: &[DVec3], config: &OctreeConfig) -> Self {
    let Some(data_bounds) = DAabb3::enclosing(points) else {
      return Self {
        config: config.clone(),
        geometry: OctreeGeometry::new(DAabb3::ZERO),
        fudge_factor: FUDGE_RATIO,
        leaves: OctreeLeaves::new(),
        points: Vec::new(),
      };
    };

    let max_extent = data_bounds.size().max_element();
    let fudge_factor = if max_extent > 0.0 {
      max_extent * FUDGE_RATIO
    } else {
      FUDGE_RATIO
    };

    let mut root = data_bounds;
    if config.cubic_octants {
      root = DAabb3::from_center_half_extents(data_bounds.center(), DVec3::splat(max_extent * 0.5));
    }
    let root = root.expanded(fudge_factor);

    let mut octree = Self {
      config: config.clone(),
      geometry: OctreeGeometry::new(root),
      fudge_factor,
      leaves: OctreeLeaves::new(),
      points: points.to_vec(),
    };

    let max_depth = config.max_depth.min(MAX_OCTREE_DEPTH);
    let all_points: Vec<usize> = (0..points.len()).collect();
    octree.subdivide(OctreeNode::ROOT, all_points, max_depth);

    #[cfg(feature = "tracing")]
    tracing::debug!(
      points = points.len(),
      leaves = octree.leaves.len(),
      max_depth,
      "octree built"
    );

    octree
  }

  fn subdivide(&mut self, node: OctreeNode, point_ids: Vec<usize>, max_depth: u8) {
    let splittable = point_ids.len() > self.config.max_points_per_region
      && node.depth < max_depth
      && !self.geometry.node_bounds(&node).is_degenerate();

    let children = if splittable {
      (0u8..8)
        .map(|octant| node.get_child(octant))
        .collect::<Option<Vec<_>>>()
    } else {
      None
    };

    let Some(children) = children else {
      self.leaves.push(node, point_ids);
      return;
    };

    let mut buckets: [Vec<usize>; 8] = Default::default();
    for id in point_ids {
      let octant = self.geometry.octant_of(&node, self.points[id]);
      buckets[octant as usize].push(id);
    }

    for (child, bucket) in children.into_iter().zip(buckets) {
      self.subdivide(child, bucket, max_depth);
    }
  }

  /// Build parameters of this octree.
  pub fn config(&self) -> &OctreeConfig {
    &self.config
  }

  /// Padding applied to the root bounds, also the nudge distance of
  /// [`Self::move_point_inside`].
  pub fn fudge_factor(&self) -> f64 {
    self.fudge_factor
  }

  /// Number of leaf regions.
  pub fn leaf_count(&self) -> usize {
    self.leaves.len()
  }

  pub fn leaves(&self) -> &OctreeLeaves {
    &self.leaves
  }

  /// Points the octree was built from.
  pub fn points(&self) -> &[DVec3] {
    &self.points
  }

  /// Bounds of the whole tree (padded root cell).
  pub fn bounds(&self) -> DAabb3 {
    self.geometry.root
  }

  /// Centre of the whole tree.
  pub fn center(&self) -> DVec3 {
    self.geometry.root.center()
  }

  /// Bounds of region `region`.
  ///
  /// # Panics
  /// If `region >= leaf_count()`.
  pub fn region_bounds(&self, region: RegionId) -> DAabb3 {
    self.geometry.node_bounds(self.leaves.node(region))
  }

  pub fn region_center(&self, region: RegionId) -> DVec3 {
    self.region_bounds(region).center()
  }

  pub fn region_size(&self, region: RegionId) -> DVec3 {
    self.region_bounds(region).size()
  }

  /// Indices (into [`Self::points`]) of the build points inside `region`.
  pub fn points_in_region(&self, region: RegionId) -> &[usize] {
    self.leaves.points(region)
  }

  /// The six faces of region `region`.
  pub fn region_planes(&self, region: RegionId) -> [BoxPlane; 6] {
    self.region_bounds(region).planes()
  }

  /// The six faces of the whole tree.
  pub fn bounding_box_planes(&self) -> [BoxPlane; 6] {
    self.geometry.root.planes()
  }

  /// Region holding `point`, or None when it lies outside the tree.
  pub fn region_containing_point(&self, point: DVec3) -> Option<RegionId> {
    if self.leaves.is_empty() || !self.geometry.root.contains_point_half_open(point) {
      return None;
    }

    let mut node = OctreeNode::ROOT;
    loop {
      if let Some(region) = self.leaves.region_of(&node) {
        return Some(region);
      }
      node = node.get_child(self.geometry.octant_of(&node, point))?;
    }
  }

  /// Shift each out-of-bounds coordinate of `point` one fudge factor
  /// toward the tree.
  ///
  /// Only points within a fudge factor of the tree end up inside; anything
  /// farther out stays outside. Coordinates on the (excluded) minimum face
  /// count as outside.
  pub fn move_point_inside(&self, point: DVec3) -> DVec3 {
    let root = self.geometry.root;
    let nudge = |v: f64, min: f64, max: f64| {
      if v <= min {
        v + self.fudge_factor
      } else if v > max {
        v - self.fudge_factor
      } else {
        v
      }
    };
    DVec3::new(
      nudge(point.x, root.min.x, root.max.x),
      nudge(point.y, root.min.y, root.max.y),
      nudge(point.z, root.min.z, root.max.z),
    )
  }

  /// Largest distance from the tree centre to any region centre.
  pub fn max_distance_center_to_region_center(&self) -> f64 {
    let center = self.center();
    (0..self.leaf_count())
      .map(|region| self.region_center(region).distance(center))
      .fold(0.0, f64::max)
  }

  /// Largest distance from the tree centre to any build point.
  pub fn max_distance_center_to_point(&self) -> f64 {
    let center = self.center();
    self
      .points
      .iter()
      .map(|p| p.distance(center))
      .fold(0.0, f64::max)
  }

  /// Regions met along every grid row of the finest leaf resolution.
  pub fn regions_along_axes(&self) -> RegionRows {
    if self.leaves.is_empty() {
      return RegionRows::default();
    }

    let depth = self.leaves.max_depth();
    let resolution = 1u32 << depth;
    let cell_center = |x: u32, y: u32, z: u32| {
      let min = self.geometry.grid_corner(x, y, z, depth);
      let max = self.geometry.grid_corner(x + 1, y + 1, z + 1, depth);
      (min + max) * 0.5
    };
    let walk = |at: &dyn Fn(u32) -> DVec3| {
      let mut row: Vec<RegionId> = Vec::new();
      for i in 0..resolution {
        if let Some(region) = self.region_containing_point(at(i)) {
          if row.last() != Some(&region) {
            row.push(region);
          }
        }
      }
      row
    };

    let grid = |f: &dyn Fn(u32, u32) -> Vec<RegionId>| -> Vec<Vec<Vec<RegionId>>> {
      (0..resolution)
        .map(|outer| (0..resolution).map(|inner| f(outer, inner)).collect())
        .collect()
    };

    RegionRows {
      resolution,
      along_x: grid(&|z, y| walk(&|x| cell_center(x, y, z))),
      along_y: grid(&|z, x| walk(&|y| cell_center(x, y, z))),
      along_z: grid(&|y, x| walk(&|z| cell_center(x, y, z))),
    }
  }
}
