//! Per-level coverage calculation.
//!
//! Every object is broken into segments (line: one, polyline: each
//! consecutive pair, ellipsoid: six centre → extremity rays). Each segment
//! is clipped against the regions it crosses and the clipped length, as a
//! fraction of the object's measure, is added to that region.

use glam::DVec3;
use web_time::Instant;

use super::intersect::{coverage_ratio, first_box_hit, pass_through_hits, COVERAGE_EPSILON};
use super::map::LevelCoverage;
use super::CoverageConfig;
use crate::objects::{CoverageObject, ObjectId, ObjectTable};
use crate::octree::{DAabb3, Octree, RegionId};
use crate::stats::LevelStats;

/// Accumulates the coverage of one octree level.
pub struct CoverageCalculator<'a> {
  octree: &'a Octree,
  config: &'a CoverageConfig,
  coverage: LevelCoverage,
  stats: LevelStats,
}

impl<'a> CoverageCalculator<'a> {
  pub fn new(octree: &'a Octree, config: &'a CoverageConfig) -> Self {
    Self {
      octree,
      config,
      coverage: LevelCoverage::new(octree.leaf_count()),
      stats: LevelStats::default(),
    }
  }

  /// Add the coverage of one object.
  pub fn add_object(&mut self, id: ObjectId, object: &CoverageObject) {
    if self.octree.leaf_count() == 1 {
      // A single region holds everything.
      self.coverage.add(0, id, 1.0);
      return;
    }

    match object {
      CoverageObject::Line { start, end, .. } => {
        self.add_segment(id, *start, *end, object.measure());
      }
      CoverageObject::Polyline { points, .. } => {
        let measure = object.measure();
        for pair in points.windows(2) {
          self.add_segment(id, pair[0], pair[1], measure);
        }
      }
      CoverageObject::Ellipsoid { center, .. } => {
        let rays = object.ellipsoid_rays();
        if rays.is_empty() {
          // Point-like ellipsoid: an epsilon piece measured by itself.
          let measure = DVec3::splat(COVERAGE_EPSILON).length();
          self.add_segment(id, *center, *center, measure);
          return;
        }
        let measure = object.measure();
        for end in rays {
          self.add_segment(id, *center, end, measure);
        }
      }
    }
  }

  /// Clip `a → b` against the regions and add the pieces.
  pub fn add_segment(&mut self, id: ObjectId, a: DVec3, b: DVec3, measure: f64) {
    self.stats.segments += 1;
    let round = self.config.round_decimals;

    let start_region = self.locate(a);
    let end_region = self.locate(b);

    if let (Some(start), Some(end)) = (start_region, end_region) {
      if start == end {
        self.stats.fast_path_segments += 1;
        self.coverage.add(start, id, coverage_ratio(a, b, measure, round));
        return;
      }
    }

    let segment_box = DAabb3::from_points(a, b).expanded(COVERAGE_EPSILON);
    for region in 0..self.octree.leaf_count() {
      let bounds = self.octree.region_bounds(region);
      if !bounds.overlaps(&segment_box) {
        continue;
      }
      self.stats.box_tests += 1;

      let piece = if start_region == Some(region) {
        first_box_hit(&bounds, a, b, None).map(|exit| (a, exit.point))
      } else if end_region == Some(region) {
        first_box_hit(&bounds, b, a, None).map(|entry| (entry.point, b))
      } else {
        // Closed-box clipping also finds pieces lying on a face; keep a
        // piece only in the region that owns it under the half-open rule.
        pass_through_hits(&bounds, a, b).filter(|&(from, to)| {
          self.octree.region_containing_point((from + to) * 0.5) == Some(region)
        })
      };

      if let Some((from, to)) = piece {
        self.coverage.add(region, id, coverage_ratio(from, to, measure, round));
      }
    }
  }

  /// Region of `point`, nudging it inside the tree when it lies just
  /// outside.
  fn locate(&mut self, point: DVec3) -> Option<RegionId> {
    if let Some(region) = self.octree.region_containing_point(point) {
      return Some(region);
    }
    let region = self
      .octree
      .region_containing_point(self.octree.move_point_inside(point));
    match region {
      Some(_) => self.stats.recovered_points += 1,
      None => {
        self.stats.unresolved_points += 1;
        #[cfg(feature = "tracing")]
        tracing::debug!(?point, "segment end outside octree");
      }
    }
    region
  }

  /// Finish the level.
  pub fn finish(self) -> (LevelCoverage, LevelStats) {
    (self.coverage, self.stats)
  }
}

/// Coverage of every object of `table` in one octree.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "coverage::compute_level"))]
pub fn compute_level<T: ObjectTable + ?Sized>(
  table: &T,
  octree: &Octree,
  config: &CoverageConfig,
) -> (LevelCoverage, LevelStats) {
  let start = Instant::now();
  let mut calculator = CoverageCalculator::new(octree, config);
  if octree.leaf_count() > 0 {
    for row in 0..table.len() {
      calculator.add_object(row, table.object(row));
    }
  }
  let (coverage, mut stats) = calculator.finish();
  stats.elapsed_us = start.elapsed().as_micros() as u64;
  (coverage, stats)
}
