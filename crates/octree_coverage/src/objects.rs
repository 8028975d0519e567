//! Coverage objects and the table that addresses them.
//!
//! An object is a line, a polyline or an ellipsoid. Objects are addressed
//! by a stable row index through [`ObjectTable`], which also exposes the
//! numeric feature columns the metrics layer aggregates.

use glam::DVec3;
use smallvec::SmallVec;

/// Row index of an object inside an [`ObjectTable`].
pub type ObjectId = usize;

/// Geometric shape of one object.
#[derive(Clone, Debug, PartialEq)]
pub enum CoverageObject {
  /// Straight segment. `length` overrides the geometric length as the
  /// coverage measure (curved fibres report their true length).
  Line {
    start: DVec3,
    end: DVec3,
    length: Option<f64>,
  },
  /// Connected segments through `points`.
  Polyline {
    points: Vec<DVec3>,
    length: Option<f64>,
  },
  /// Axis-aligned ellipsoid.
  Ellipsoid { center: DVec3, radii: DVec3 },
}

impl CoverageObject {
  pub fn line(start: DVec3, end: DVec3) -> Self {
    Self::Line {
      start,
      end,
      length: None,
    }
  }

  pub fn line_with_length(start: DVec3, end: DVec3, length: f64) -> Self {
    Self::Line {
      start,
      end,
      length: Some(length),
    }
  }

  pub fn polyline(points: Vec<DVec3>) -> Self {
    Self::Polyline {
      points,
      length: None,
    }
  }

  pub fn ellipsoid(center: DVec3, radii: DVec3) -> Self {
    Self::Ellipsoid { center, radii }
  }

  /// Geometric length of the path (ellipsoid: sum of full axis lengths).
  pub fn geometric_length(&self) -> f64 {
    match self {
      Self::Line { start, end, .. } => start.distance(*end),
      Self::Polyline { points, .. } => points.windows(2).map(|w| w[0].distance(w[1])).sum(),
      Self::Ellipsoid { radii, .. } => 2.0 * (radii.x + radii.y + radii.z),
    }
  }

  /// Denominator of every coverage ratio for this object.
  ///
  /// A stated length wins over the geometric one.
  pub fn measure(&self) -> f64 {
    match self {
      Self::Line {
        length: Some(length),
        ..
      }
      | Self::Polyline {
        length: Some(length),
        ..
      } => *length,
      _ => self.geometric_length(),
    }
  }

  /// Append the points the octree is built from.
  ///
  /// Line: both ends. Polyline: every point. Ellipsoid: centre and the six
  /// axis extremities.
  pub fn extend_sample_points(&self, out: &mut Vec<DVec3>) {
    match self {
      Self::Line { start, end, .. } => {
        out.push(*start);
        out.push(*end);
      }
      Self::Polyline { points, .. } => out.extend_from_slice(points),
      Self::Ellipsoid { center, radii } => {
        out.push(*center);
        out.extend(Self::axis_offsets(*radii).iter().map(|offset| *center + *offset));
      }
    }
  }

  pub fn sample_points(&self) -> Vec<DVec3> {
    let mut out = Vec::new();
    self.extend_sample_points(&mut out);
    out
  }

  /// Ray end points from the centre, in order -X, +X, -Y, +Y, -Z, +Z.
  ///
  /// Axes with zero radius produce no ray. Empty for non-ellipsoids.
  pub fn ellipsoid_rays(&self) -> SmallVec<[DVec3; 6]> {
    let Self::Ellipsoid { center, radii } = self else {
      return SmallVec::new();
    };
    Self::axis_offsets(*radii)
      .iter()
      .filter(|offset| **offset != DVec3::ZERO)
      .map(|offset| *center + *offset)
      .collect()
  }

  fn axis_offsets(radii: DVec3) -> [DVec3; 6] {
    [
      DVec3::new(-radii.x, 0.0, 0.0),
      DVec3::new(radii.x, 0.0, 0.0),
      DVec3::new(0.0, -radii.y, 0.0),
      DVec3::new(0.0, radii.y, 0.0),
      DVec3::new(0.0, 0.0, -radii.z),
      DVec3::new(0.0, 0.0, radii.z),
    ]
  }
}

/// Read access to a table of objects with numeric feature columns.
pub trait ObjectTable: Send + Sync {
  /// Number of objects (rows).
  fn len(&self) -> usize;

  fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Shape of object `row`.
  fn object(&self, row: ObjectId) -> &CoverageObject;

  /// Number of feature columns.
  fn feature_count(&self) -> usize;

  /// Value of feature `feature` for object `row`.
  fn feature(&self, row: ObjectId, feature: usize) -> f64;

  fn feature_name(&self, feature: usize) -> Option<&str>;

  /// Octree input points of every object, in row order.
  fn sample_points(&self) -> Vec<DVec3> {
    let mut points = Vec::with_capacity(self.len() * 2);
    for row in 0..self.len() {
      self.object(row).extend_sample_points(&mut points);
    }
    points
  }
}

/// In-memory [`ObjectTable`]: objects plus a row-major feature matrix.
#[derive(Clone, Debug, Default)]
pub struct ObjectList {
  objects: Vec<CoverageObject>,
  feature_names: Vec<String>,
  features: Vec<Vec<f64>>,
}

impl ObjectList {
  /// Table with the given feature columns and no rows.
  pub fn new(feature_names: Vec<String>) -> Self {
    Self {
      objects: Vec::new(),
      feature_names,
      features: Vec::new(),
    }
  }

  /// Table without feature columns.
  pub fn from_objects(objects: Vec<CoverageObject>) -> Self {
    let features = vec![Vec::new(); objects.len()];
    Self {
      objects,
      feature_names: Vec::new(),
      features,
    }
  }

  /// Append a row and return its id.
  ///
  /// # Panics
  /// Debug-asserts that `features` has one value per column.
  pub fn push(&mut self, object: CoverageObject, features: Vec<f64>) -> ObjectId {
    debug_assert_eq!(
      features.len(),
      self.feature_names.len(),
      "Row must have one value per feature column"
    );
    self.objects.push(object);
    self.features.push(features);
    self.objects.len() - 1
  }

  pub fn objects(&self) -> &[CoverageObject] {
    &self.objects
  }
}

impl ObjectTable for ObjectList {
  fn len(&self) -> usize {
    self.objects.len()
  }

  fn object(&self, row: ObjectId) -> &CoverageObject {
    &self.objects[row]
  }

  fn feature_count(&self) -> usize {
    self.feature_names.len()
  }

  fn feature(&self, row: ObjectId, feature: usize) -> f64 {
    self.features[row][feature]
  }

  fn feature_name(&self, feature: usize) -> Option<&str> {
    self.feature_names.get(feature).map(String::as_str)
  }
}
