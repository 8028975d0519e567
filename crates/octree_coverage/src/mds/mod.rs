//! Metric multidimensional scaling by stress majorization (SMACOF).
//!
//! Projects `N` items with pairwise dissimilarities `D` into `d` dimensions
//! so that Euclidean distances `D̂` approximate `D`.
//!
//! ```text
//! X₀      random in [0, 1)ᵈ, centred, scaled by mean(D) / (√d / 3)
//! B(X)ᵢⱼ  = -Dᵢⱼ / D̂ᵢⱼ          (i ≠ j, 0 when D̂ᵢⱼ < 1e-6)
//! B(X)ᵢᵢ  = -Σⱼ B(X)ᵢⱼ
//! Xₖ₊₁    = B(Xₖ) · Xₖ / N        until Σ|Xₖ₊₁ - Xₖ| ≤ max_error
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;

use crate::cancel::CancelFlag;
use crate::error::MdsError;

/// Distances below this are treated as coincident points in `B(X)`.
pub const MIN_EMBEDDED_DISTANCE: f64 = 1e-6;

/// Relative tolerance of the symmetry check.
pub const SYMMETRY_TOLERANCE: f64 = 1e-9;

/// How the starting configuration is chosen.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MdsInit {
  /// Uniform random, seeded from the OS.
  #[default]
  Entropy,
  /// Uniform random from a fixed seed (reproducible).
  Seeded(u64),
  /// Caller-provided `N × d` configuration, used as is.
  Explicit(Vec<Vec<f64>>),
}

/// SMACOF parameters.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct MdsConfig {
  /// Target dimensionality (1 to 3 for display, any positive value works).
  pub dimensions: usize,
  /// Maximum number of majorization steps.
  pub iterations: usize,
  /// Stop once the summed absolute coordinate change is at most this.
  pub max_error: f64,
  pub init: MdsInit,
}

impl Default for MdsConfig {
  fn default() -> Self {
    Self {
      dimensions: 2,
      iterations: 10,
      max_error: 1e-6,
      init: MdsInit::Entropy,
    }
  }
}

/// Result of a SMACOF run.
#[derive(Clone, Debug, PartialEq)]
pub struct Embedding {
  /// `N × d` coordinates.
  pub coordinates: Vec<Vec<f64>>,
  /// Majorization steps performed.
  pub iterations: usize,
  /// Whether the change threshold was reached before the step limit.
  pub converged: bool,
  /// Raw stress of `coordinates`, see [`stress`].
  pub stress: f64,
}

/// Run SMACOF on a symmetric, non-negative dissimilarity matrix.
pub fn smacof(dissimilarities: &[Vec<f64>], config: &MdsConfig) -> Result<Embedding, MdsError> {
  smacof_with_cancel(dissimilarities, config, &CancelFlag::new())
}

/// [`smacof`] that checks `cancel` before every step.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "mds::smacof"))]
pub fn smacof_with_cancel(
  dissimilarities: &[Vec<f64>],
  config: &MdsConfig,
  cancel: &CancelFlag,
) -> Result<Embedding, MdsError> {
  let n = validate(dissimilarities)?;
  if config.dimensions == 0 {
    return Err(MdsError::ZeroDimensions);
  }

  let mut x = initial_configuration(dissimilarities, config)?;
  let mut b = vec![vec![0.0; n]; n];
  let mut iterations = 0;
  let mut converged = false;

  while iterations < config.iterations {
    if cancel.is_cancelled() {
      return Err(MdsError::Cancelled);
    }

    fill_b_matrix(dissimilarities, &x, &mut b);
    let next = guttman_transform(&b, &x);
    let change: f64 = next
      .iter()
      .zip(&x)
      .flat_map(|(new_row, old_row)| new_row.iter().zip(old_row).map(|(a, b)| (a - b).abs()))
      .sum();

    x = next;
    iterations += 1;
    if change <= config.max_error {
      converged = true;
      break;
    }
  }

  let stress = stress(dissimilarities, &x);

  #[cfg(feature = "tracing")]
  tracing::debug!(n, iterations, converged, stress, "smacof finished");

  Ok(Embedding {
    coordinates: x,
    iterations,
    converged,
    stress,
  })
}

/// Raw stress `Σ_{i<j} (Dᵢⱼ - D̂ᵢⱼ)²` of a configuration.
pub fn stress(dissimilarities: &[Vec<f64>], coordinates: &[Vec<f64>]) -> f64 {
  let n = coordinates.len();
  let mut total = 0.0;
  for i in 0..n {
    for j in (i + 1)..n {
      let diff = dissimilarities[i][j] - distance(&coordinates[i], &coordinates[j]);
      total += diff * diff;
    }
  }
  total
}

/// Check the matrix and return its size.
fn validate(d: &[Vec<f64>]) -> Result<usize, MdsError> {
  let n = d.len();
  for (row, values) in d.iter().enumerate() {
    if values.len() != n {
      return Err(MdsError::NotSquare {
        row,
        len: values.len(),
        expected: n,
      });
    }
  }
  if n < 3 {
    return Err(MdsError::TooSmall(n));
  }

  for row in 0..n {
    for col in 0..n {
      let value = d[row][col];
      if !value.is_finite() || value < 0.0 {
        return Err(MdsError::InvalidEntry { row, col, value });
      }
      if col > row {
        let mirror = d[col][row];
        let scale = value.abs().max(mirror.abs()).max(1.0);
        if (value - mirror).abs() > SYMMETRY_TOLERANCE * scale {
          return Err(MdsError::Asymmetric {
            row,
            col,
            value,
            mirror,
          });
        }
      }
    }
  }
  Ok(n)
}

fn initial_configuration(d: &[Vec<f64>], config: &MdsConfig) -> Result<Vec<Vec<f64>>, MdsError> {
  let n = d.len();
  let dims = config.dimensions;

  let mut rng = match &config.init {
    MdsInit::Explicit(x) => {
      if x.len() != n || x.iter().any(|row| row.len() != dims) {
        return Err(MdsError::InitShape { rows: n, dims });
      }
      return Ok(x.clone());
    }
    MdsInit::Seeded(seed) => StdRng::seed_from_u64(*seed),
    MdsInit::Entropy => StdRng::from_os_rng(),
  };

  let mean = d.iter().flatten().sum::<f64>() / (n * n) as f64;
  let scale = mean / ((dims as f64).sqrt() / 3.0);

  Ok(
    (0..n)
      .map(|_| {
        (0..dims)
          .map(|_| (rng.random::<f64>() - 0.5) * scale)
          .collect()
      })
      .collect(),
  )
}

fn fill_b_matrix(d: &[Vec<f64>], x: &[Vec<f64>], b: &mut [Vec<f64>]) {
  let n = x.len();
  for i in 0..n {
    let mut row_sum = 0.0;
    for j in 0..n {
      if i == j {
        continue;
      }
      let embedded = distance(&x[i], &x[j]);
      let value = if embedded < MIN_EMBEDDED_DISTANCE {
        0.0
      } else {
        -d[i][j] / embedded
      };
      b[i][j] = value;
      row_sum += value;
    }
    b[i][i] = -row_sum;
  }
}

/// `B · X / N`.
fn guttman_transform(b: &[Vec<f64>], x: &[Vec<f64>]) -> Vec<Vec<f64>> {
  let n = x.len();
  let dims = x.first().map_or(0, Vec::len);
  (0..n)
    .map(|i| {
      (0..dims)
        .map(|k| (0..n).map(|j| b[i][j] * x[j][k]).sum::<f64>() / n as f64)
        .collect()
    })
    .collect()
}

#[inline]
fn distance(a: &[f64], b: &[f64]) -> f64 {
  a.iter()
    .zip(b)
    .map(|(p, q)| (p - q) * (p - q))
    .sum::<f64>()
    .sqrt()
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;
