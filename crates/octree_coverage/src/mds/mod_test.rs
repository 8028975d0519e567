use super::*;

/// `|vᵢ - vⱼ|` for scalar values.
fn line_dissimilarities(values: &[f64]) -> Vec<Vec<f64>> {
  values
    .iter()
    .map(|a| values.iter().map(|b| (a - b).abs()).collect())
    .collect()
}

/// Euclidean distances between points.
fn point_dissimilarities(points: &[Vec<f64>]) -> Vec<Vec<f64>> {
  points
    .iter()
    .map(|a| points.iter().map(|b| distance(a, b)).collect())
    .collect()
}

/// `[[0], [1], ..., [n - 1]]`.
fn increasing_init(n: usize) -> MdsInit {
  MdsInit::Explicit((0..n).map(|i| vec![i as f64]).collect())
}

fn one_dimensional(init: MdsInit) -> MdsConfig {
  MdsConfig {
    dimensions: 1,
    iterations: 10,
    max_error: 0.0,
    init,
  }
}

fn assert_coordinates(embedding: &Embedding, expected: &[f64]) {
  assert_eq!(embedding.coordinates.len(), expected.len());
  for (i, (row, &want)) in embedding.coordinates.iter().zip(expected).enumerate() {
    assert!(
      (row[0] - want).abs() < 1e-9,
      "Item {}: got {}, expected {}",
      i,
      row[0],
      want
    );
  }
}

// =========================================================================
// Batch 1: One-Dimensional Recovery Tests
// =========================================================================

/// Eight values come back centred on their mean.
#[test]
fn test_recovers_eight_values() {
  let values = [1.0, 2.0, 3.0, 5.0, 7.0, 10.0, 13.0, 20.0];
  let d = line_dissimilarities(&values);

  let embedding = smacof(&d, &one_dimensional(increasing_init(values.len()))).unwrap();

  assert_coordinates(
    &embedding,
    &[-6.625, -5.625, -4.625, -2.625, -0.625, 2.375, 5.375, 12.375],
  );
  assert!(embedding.stress < 1e-9, "Stress {}", embedding.stress);
}

/// Seven symmetric values come back around zero.
#[test]
fn test_recovers_seven_values() {
  let values = [1.0, 5.0, 9.0, 10.0, 11.0, 15.0, 19.0];
  let d = line_dissimilarities(&values);

  let embedding = smacof(&d, &one_dimensional(increasing_init(values.len()))).unwrap();

  assert_coordinates(&embedding, &[-9.0, -5.0, -1.0, 0.0, 1.0, 5.0, 9.0]);
}

/// A centred configuration that already fits is a fixed point.
#[test]
fn test_perfect_fit_is_fixed_point() {
  let points = vec![
    vec![-1.0, -1.0],
    vec![1.0, -1.0],
    vec![1.0, 1.0],
    vec![-1.0, 1.0],
  ];
  let d = point_dissimilarities(&points);
  let config = MdsConfig {
    dimensions: 2,
    iterations: 10,
    max_error: 1e-6,
    init: MdsInit::Explicit(points.clone()),
  };

  let embedding = smacof(&d, &config).unwrap();

  assert!(embedding.converged);
  assert_eq!(embedding.iterations, 1);
  for (got, want) in embedding.coordinates.iter().zip(&points) {
    assert!((got[0] - want[0]).abs() < 1e-9 && (got[1] - want[1]).abs() < 1e-9);
  }
  assert!(embedding.stress < 1e-12);
}

// =========================================================================
// Batch 2: Random Start Tests
// =========================================================================

/// The same seed gives the same embedding, a different seed does not.
#[test]
fn test_seeded_runs_are_deterministic() {
  let d = line_dissimilarities(&[0.0, 1.0, 4.0, 9.0, 16.0]);
  let config = MdsConfig {
    init: MdsInit::Seeded(42),
    ..Default::default()
  };

  let first = smacof(&d, &config).unwrap();
  let second = smacof(&d, &config).unwrap();
  let other = smacof(
    &d,
    &MdsConfig {
      init: MdsInit::Seeded(43),
      ..Default::default()
    },
  )
  .unwrap();

  assert_eq!(first, second);
  assert_ne!(first.coordinates, other.coordinates);
}

/// The eight-value fixture depends on the random start: seed 3 lands on it,
/// seed 4 on its mirror image, and some other seeds in a different local
/// minimum.
#[test]
fn test_eight_value_fixture_depends_on_seed() {
  let values = [1.0, 2.0, 3.0, 5.0, 7.0, 10.0, 13.0, 20.0];
  let expected = [-6.625, -5.625, -4.625, -2.625, -0.625, 2.375, 5.375, 12.375];
  let d = line_dissimilarities(&values);
  let run = |seed| smacof(&d, &one_dimensional(MdsInit::Seeded(seed))).unwrap();
  let matches = |embedding: &Embedding, sign: f64| {
    embedding
      .coordinates
      .iter()
      .zip(&expected)
      .all(|(row, &want)| (row[0] - sign * want).abs() < 1e-6)
  };

  assert!(matches(&run(3), 1.0), "Seed 3 reproduces the fixture");
  assert!(matches(&run(4), -1.0), "Seed 4 converges to the mirror image");
  assert!(
    (0..3).any(|seed| {
      let embedding = run(seed);
      !matches(&embedding, 1.0) && !matches(&embedding, -1.0)
    }),
    "Some seed ends in another configuration"
  );
}

/// The random start is centred and scaled by 3 · mean(D) / √d.
#[test]
fn test_random_start_scale() {
  let d = line_dissimilarities(&[0.0, 2.0, 4.0, 6.0]);
  let mean = d.iter().flatten().sum::<f64>() / 16.0;
  let config = MdsConfig {
    dimensions: 2,
    iterations: 0,
    max_error: 0.0,
    init: MdsInit::Seeded(3),
  };

  let embedding = smacof(&d, &config).unwrap();
  let half_span = 0.5 * 3.0 * mean / 2f64.sqrt();

  assert_eq!(embedding.iterations, 0);
  assert!(!embedding.converged);
  for row in &embedding.coordinates {
    assert_eq!(row.len(), 2);
    for &x in row {
      assert!(x.abs() <= half_span, "{} outside ±{}", x, half_span);
    }
  }
}

/// Majorization never increases stress from one step to the next.
#[test]
fn test_stress_is_non_increasing() {
  let points: Vec<Vec<f64>> = (0..8)
    .map(|i| {
      let t = i as f64;
      vec![t.cos() * 3.0, (t * 1.7).sin() * 2.0, t * 0.5]
    })
    .collect();
  let d = point_dissimilarities(&points);

  let mut previous = f64::INFINITY;
  for iterations in 0..8 {
    let config = MdsConfig {
      dimensions: 2,
      iterations,
      max_error: 0.0,
      init: MdsInit::Seeded(11),
    };
    let embedding = smacof(&d, &config).unwrap();
    assert!(
      embedding.stress <= previous + 1e-9,
      "Step {}: {} > {}",
      iterations,
      embedding.stress,
      previous
    );
    previous = embedding.stress;
  }
}

/// Stress is the squared residual summed over distinct pairs.
#[test]
fn test_stress_value() {
  let d = line_dissimilarities(&[0.0, 1.0, 2.0]);
  let coordinates = vec![vec![0.0], vec![2.0], vec![2.0]];

  // residuals: (1 - 2), (2 - 2), (1 - 0)
  assert_eq!(stress(&d, &coordinates), 2.0);
}

// =========================================================================
// Batch 3: Validation Tests
// =========================================================================

/// Ragged rows are rejected.
#[test]
fn test_rejects_non_square() {
  let d = vec![vec![0.0, 1.0, 2.0], vec![1.0, 0.0], vec![2.0, 1.0, 0.0]];

  assert_eq!(
    smacof(&d, &MdsConfig::default()),
    Err(MdsError::NotSquare {
      row: 1,
      len: 2,
      expected: 3
    })
  );
}

/// Fewer than three items cannot be embedded.
#[test]
fn test_rejects_too_small() {
  let d = line_dissimilarities(&[0.0, 1.0]);

  assert_eq!(smacof(&d, &MdsConfig::default()), Err(MdsError::TooSmall(2)));
  assert_eq!(smacof(&[], &MdsConfig::default()), Err(MdsError::TooSmall(0)));
}

/// Mirrored entries must agree.
#[test]
fn test_rejects_asymmetric() {
  let mut d = line_dissimilarities(&[0.0, 1.0, 3.0]);
  d[0][2] = 3.5;

  assert_eq!(
    smacof(&d, &MdsConfig::default()),
    Err(MdsError::Asymmetric {
      row: 0,
      col: 2,
      value: 3.5,
      mirror: 3.0
    })
  );
}

/// Rounding noise below the tolerance is accepted.
#[test]
fn test_accepts_near_symmetric() {
  let mut d = line_dissimilarities(&[0.0, 1.0, 3.0]);
  d[0][2] += 1e-12;

  assert!(smacof(&d, &one_dimensional(increasing_init(3))).is_ok());
}

/// Negative and non-finite entries are rejected.
#[test]
fn test_rejects_invalid_entries() {
  let mut negative = line_dissimilarities(&[0.0, 1.0, 3.0]);
  negative[1][2] = -2.0;
  negative[2][1] = -2.0;
  assert_eq!(
    smacof(&negative, &MdsConfig::default()),
    Err(MdsError::InvalidEntry {
      row: 1,
      col: 2,
      value: -2.0
    })
  );

  let mut nan = line_dissimilarities(&[0.0, 1.0, 3.0]);
  nan[2][0] = f64::NAN;
  assert!(matches!(
    smacof(&nan, &MdsConfig::default()),
    Err(MdsError::InvalidEntry { row: 2, col: 0, .. })
  ));
}

/// Zero target dimensions and mis-shaped starts are rejected.
#[test]
fn test_rejects_bad_config() {
  let d = line_dissimilarities(&[0.0, 1.0, 3.0]);

  let zero = MdsConfig {
    dimensions: 0,
    ..Default::default()
  };
  assert_eq!(smacof(&d, &zero), Err(MdsError::ZeroDimensions));

  let wrong_rows = MdsConfig {
    dimensions: 1,
    init: increasing_init(2),
    ..Default::default()
  };
  assert_eq!(
    smacof(&d, &wrong_rows),
    Err(MdsError::InitShape { rows: 3, dims: 1 })
  );

  let wrong_dims = MdsConfig {
    dimensions: 2,
    init: increasing_init(3),
    ..Default::default()
  };
  assert_eq!(
    smacof(&d, &wrong_dims),
    Err(MdsError::InitShape { rows: 3, dims: 2 })
  );
}

// =========================================================================
// Batch 4: Cancellation and Config Tests
// =========================================================================

/// A raised flag stops the run before the first step.
#[test]
fn test_cancelled_run() {
  let d = line_dissimilarities(&[0.0, 1.0, 3.0, 6.0]);
  let cancel = CancelFlag::new();
  cancel.cancel();

  assert_eq!(
    smacof_with_cancel(&d, &MdsConfig::default(), &cancel),
    Err(MdsError::Cancelled)
  );
}

/// Partial TOML tables fall back to defaults, seeds use a tagged table.
#[test]
fn test_config_from_toml() {
  let config: MdsConfig = toml::from_str("dimensions = 3\ninit = { seeded = 7 }\n").unwrap();

  assert_eq!(config.dimensions, 3);
  assert_eq!(config.iterations, 10);
  assert_eq!(config.max_error, 1e-6);
  assert_eq!(config.init, MdsInit::Seeded(7));

  let entropy: MdsConfig = toml::from_str("init = \"entropy\"\n").unwrap();
  assert_eq!(entropy.init, MdsInit::Entropy);
}
