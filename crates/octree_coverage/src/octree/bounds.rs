//! Axis-aligned bounding box with double precision, plus its six faces.

use glam::DVec3;

/// Double-precision axis-aligned bounding box.
///
/// Region bounds of an octree are half-open per axis: a point belongs to a
/// region when `min < p <= max`. See [`DAabb3::contains_point_half_open`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DAabb3 {
  /// Minimum corner.
  pub min: DVec3,
  /// Maximum corner.
  pub max: DVec3,
}

/// One face of a box: an origin corner and two edge vectors spanning it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxPlane {
  /// Corner the edges start from.
  pub origin: DVec3,
  /// First edge (origin → point 1).
  pub edge1: DVec3,
  /// Second edge (origin → point 2).
  pub edge2: DVec3,
}

impl BoxPlane {
  /// Build a face from its origin corner and the two adjacent corners.
  pub fn from_corners(origin: DVec3, p1: DVec3, p2: DVec3) -> Self {
    Self {
      origin,
      edge1: p1 - origin,
      edge2: p2 - origin,
    }
  }

  /// Unit normal (`edge1 × edge2`), or zero for a degenerate face.
  #[inline]
  pub fn normal(&self) -> DVec3 {
    self.edge1.cross(self.edge2).normalize_or_zero()
  }
}

impl DAabb3 {
  /// An empty box at the origin.
  pub const ZERO: Self = Self {
    min: DVec3::ZERO,
    max: DVec3::ZERO,
  };

  /// Box from its corners. `min` must not exceed `max` on any axis.
  pub fn new(min: DVec3, max: DVec3) -> Self {
    debug_assert!(min.cmple(max).all(), "Box corners out of order: {} > {}", min, max);
    Self { min, max }
  }

  pub fn from_center_half_extents(center: DVec3, half_extents: DVec3) -> Self {
    Self::new(center - half_extents, center + half_extents)
  }

  /// Smallest box holding both points.
  pub fn from_points(a: DVec3, b: DVec3) -> Self {
    Self {
      min: a.min(b),
      max: a.max(b),
    }
  }

  /// Smallest box holding every point, or None for an empty slice.
  pub fn enclosing(points: &[DVec3]) -> Option<Self> {
    let (first, rest) = points.split_first()?;
    let mut aabb = Self {
      min: *first,
      max: *first,
    };
    for p in rest {
      aabb.min = aabb.min.min(*p);
      aabb.max = aabb.max.max(*p);
    }
    Some(aabb)
  }

  /// Grow the box by `amount` on every side.
  #[inline]
  pub fn expanded(&self, amount: f64) -> Self {
    Self {
      min: self.min - DVec3::splat(amount),
      max: self.max + DVec3::splat(amount),
    }
  }

  /// Shared volume or a shared face/edge/corner.
  #[inline]
  pub fn overlaps(&self, other: &DAabb3) -> bool {
    self.min.cmple(other.max).all() && self.max.cmpge(other.min).all()
  }

  /// Closed containment, `min <= p <= max`.
  #[inline]
  pub fn contains_point(&self, point: DVec3) -> bool {
    self.min.cmple(point).all() && point.cmple(self.max).all()
  }

  /// Containment with a tolerance on every face.
  #[inline]
  pub fn contains_point_with_tolerance(&self, point: DVec3, tolerance: f64) -> bool {
    self.expanded(tolerance).contains_point(point)
  }

  /// Octree region containment: `min < p <= max` on every axis.
  #[inline]
  pub fn contains_point_half_open(&self, point: DVec3) -> bool {
    self.min.cmplt(point).all() && point.cmple(self.max).all()
  }

  #[inline]
  pub fn size(&self) -> DVec3 {
    self.max - self.min
  }

  #[inline]
  pub fn center(&self) -> DVec3 {
    (self.min + self.max) * 0.5
  }

  /// True when any axis has zero (or negative) extent.
  #[inline]
  pub fn is_degenerate(&self) -> bool {
    self.size().min_element() <= 0.0
  }

  /// Bounds as `[xmin, xmax, ymin, ymax, zmin, zmax]`.
  pub fn as_bounds_array(&self) -> [f64; 6] {
    [
      self.min.x, self.max.x, self.min.y, self.max.y, self.min.z, self.max.z,
    ]
  }

  /// The six faces, each as origin corner + two edges.
  ///
  /// Order: +Z, +X, -Z, -X, -Y, +Y.
  pub fn planes(&self) -> [BoxPlane; 6] {
    let (x0, x1) = (self.min.x, self.max.x);
    let (y0, y1) = (self.min.y, self.max.y);
    let (z0, z1) = (self.min.z, self.max.z);
    let p = DVec3::new;
    [
      BoxPlane::from_corners(p(x0, y0, z1), p(x1, y0, z1), p(x0, y1, z1)),
      BoxPlane::from_corners(p(x1, y0, z1), p(x1, y0, z0), p(x1, y1, z1)),
      BoxPlane::from_corners(p(x0, y0, z0), p(x1, y0, z0), p(x0, y1, z0)),
      BoxPlane::from_corners(p(x0, y0, z1), p(x0, y0, z0), p(x0, y1, z1)),
      BoxPlane::from_corners(p(x1, y0, z1), p(x1, y0, z0), p(x0, y0, z1)),
      BoxPlane::from_corners(p(x1, y1, z1), p(x1, y1, z0), p(x0, y1, z1)),
    ]
  }
}
