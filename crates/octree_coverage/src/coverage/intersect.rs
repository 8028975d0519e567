//! Segment / box intersection used to clip segments to regions.

use glam::DVec3;

use crate::octree::{BoxPlane, DAabb3};

/// Tolerance of the plane tests and the degenerate-segment substitute.
pub const COVERAGE_EPSILON: f64 = 1e-5;

/// Hits closer than this to the ray origin are ignored, so a search that
/// starts on a face does not find that face again.
pub const MIN_HIT_DISTANCE: f64 = 1e-9;

/// Where a segment crosses a region face.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxHit {
  pub point: DVec3,
  /// Face index into [`DAabb3::planes`].
  pub face: usize,
  /// Distance from the search origin.
  pub distance: f64,
}

/// Distance along `dir` (unit) from `origin` to `plane`.
///
/// None when the ray is parallel to the plane or the hit lies outside
/// `(MIN_HIT_DISTANCE, max_distance + ε]`.
#[inline]
pub fn intersect_plane(plane: &BoxPlane, origin: DVec3, dir: DVec3, max_distance: f64) -> Option<f64> {
  let normal = plane.normal();
  let denom = normal.dot(dir);
  if denom.abs() <= COVERAGE_EPSILON {
    return None;
  }
  let t = normal.dot(plane.origin - origin) / denom;
  (t > MIN_HIT_DISTANCE && t <= max_distance + COVERAGE_EPSILON).then_some(t)
}

/// Nearest crossing of `bounds` on the way from `from` to `to`.
///
/// `skip_face` excludes one face, typically the one a previous hit came
/// from. Hits must lie on the finite face (within ε).
pub fn first_box_hit(bounds: &DAabb3, from: DVec3, to: DVec3, skip_face: Option<usize>) -> Option<BoxHit> {
  let delta = to - from;
  let length = delta.length();
  if length == 0.0 {
    return None;
  }
  let dir = delta / length;

  let mut best: Option<BoxHit> = None;
  for (face, plane) in bounds.planes().iter().enumerate() {
    if skip_face == Some(face) {
      continue;
    }
    let Some(t) = intersect_plane(plane, from, dir, length) else {
      continue;
    };
    let point = from + dir * t;
    if !bounds.contains_point_with_tolerance(point, COVERAGE_EPSILON) {
      continue;
    }
    if best.map_or(true, |hit| t < hit.distance) {
      best = Some(BoxHit {
        point,
        face,
        distance: t,
      });
    }
  }
  best
}

/// Entry and exit points of a segment passing through `bounds` with both
/// ends outside it.
///
/// The exit is searched from the entry toward `to`, then toward `from`.
pub fn pass_through_hits(bounds: &DAabb3, from: DVec3, to: DVec3) -> Option<(DVec3, DVec3)> {
  let entry = first_box_hit(bounds, from, to, None)?;
  let exit = first_box_hit(bounds, entry.point, to, Some(entry.face))
    .or_else(|| first_box_hit(bounds, entry.point, from, Some(entry.face)))?;
  Some((entry.point, exit.point))
}

/// Fraction of `measure` covered by the piece `a → b`.
///
/// Identical points count as an `(ε, ε, ε)` piece. `measure` is used as
/// given, so a zero measure yields an infinite ratio.
#[inline]
pub fn coverage_ratio(a: DVec3, b: DVec3, measure: f64, round_decimals: Option<u32>) -> f64 {
  let piece = if a == b {
    DVec3::splat(COVERAGE_EPSILON)
  } else {
    b - a
  };
  let ratio = piece.length() / measure;
  match round_decimals {
    Some(decimals) if ratio.is_finite() => {
      let scale = 10f64.powi(decimals as i32);
      (ratio * scale).round() / scale
    }
    _ => ratio,
  }
}

#[cfg(test)]
#[path = "intersect_test.rs"]
mod intersect_test;
