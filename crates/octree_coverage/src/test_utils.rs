//! Test fixtures shared by the coverage, metrics and pipeline tests.
//!
//! The reference octree is built over the eight corners of `[0, 10]^3` with
//! depth 1, so its regions are the eight octants and region index equals
//! octant index (bit 0: +X, bit 1: +Y, bit 2: +Z).

use glam::DVec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::objects::{CoverageObject, ObjectList};
use crate::octree::{Octree, OctreeConfig};

/// The eight corners of `[0, 10]^3`, listed in octant order.
pub fn cube_corners() -> Vec<DVec3> {
  (0u8..8)
    .map(|octant| {
      DVec3::new(
        (octant & 1) as f64 * 10.0,
        ((octant >> 1) & 1) as f64 * 10.0,
        ((octant >> 2) & 1) as f64 * 10.0,
      )
    })
    .collect()
}

/// Depth-1 octree whose regions are the octants of `[0, 10]^3`.
pub fn corner_octree() -> Octree {
  Octree::build(&cube_corners(), &OctreeConfig::new(1, 1))
}

/// Depth-0 octree over the same corners (a single region).
pub fn single_region_octree() -> Octree {
  Octree::build(&cube_corners(), &OctreeConfig::new(0, 1))
}

/// Table of objects with one feature column named `value`.
pub fn table_with_values(objects: Vec<(CoverageObject, f64)>) -> ObjectList {
  let mut table = ObjectList::new(vec!["value".to_string()]);
  for (object, value) in objects {
    table.push(object, vec![value]);
  }
  table
}

/// `count` random lines inside `[0, 10]^3` with two feature columns.
pub fn random_lines(count: usize, seed: u64) -> ObjectList {
  let mut rng = StdRng::seed_from_u64(seed);
  let mut point = || DVec3::new(rng.random(), rng.random(), rng.random()) * 10.0;
  let mut table = ObjectList::new(vec!["length".to_string(), "index".to_string()]);
  for i in 0..count {
    let line = CoverageObject::line(point(), point());
    let length = line.geometric_length();
    table.push(line, vec![length, i as f64]);
  }
  table
}
