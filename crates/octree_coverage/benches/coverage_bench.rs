//! Octree build and coverage benchmarks.
//!
//! - **octree/build**: point-budget subdivision at increasing depth
//! - **coverage/levels**: full coverage over four levels, sequential vs
//!   parallel levels
//! - **coverage/objects**: lines against ellipsoids at a fixed depth

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::DVec3;
use octree_coverage::{
  compute_coverage, CoverageConfig, CoverageObject, ObjectList, ObjectTable, Octree, OctreeConfig,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// =============================================================================
// Synthetic Tables
// =============================================================================

fn random_point(rng: &mut StdRng) -> DVec3 {
  DVec3::new(rng.random(), rng.random(), rng.random()) * 100.0
}

/// Short lines scattered through `[0, 100]^3`, like fibre tracts.
fn line_table(count: usize, seed: u64) -> ObjectList {
  let mut rng = StdRng::seed_from_u64(seed);
  let mut table = ObjectList::new(vec!["length".to_string()]);
  for _ in 0..count {
    let start = random_point(&mut rng);
    let offset = DVec3::new(rng.random(), rng.random(), rng.random()) * 20.0 - 10.0;
    let line = CoverageObject::line(start, start + offset);
    let length = line.geometric_length();
    table.push(line, vec![length]);
  }
  table
}

fn ellipsoid_table(count: usize, seed: u64) -> ObjectList {
  let mut rng = StdRng::seed_from_u64(seed);
  let mut table = ObjectList::new(vec!["volume".to_string()]);
  for _ in 0..count {
    let center = random_point(&mut rng);
    let radii = DVec3::new(rng.random(), rng.random(), rng.random()) * 5.0;
    table.push(CoverageObject::ellipsoid(center, radii), vec![radii.x * radii.y * radii.z]);
  }
  table
}

fn build_levels(table: &ObjectList, levels: &[OctreeConfig]) -> Vec<Octree> {
  let points = table.sample_points();
  levels.iter().map(|config| Octree::build(&points, config)).collect()
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_octree_build(c: &mut Criterion) {
  let mut group = c.benchmark_group("octree/build");
  let points = line_table(2000, 1).sample_points();

  for depth in [2u8, 4, 6] {
    let config = OctreeConfig::new(depth, 4);
    group.bench_with_input(BenchmarkId::from_parameter(depth), &config, |b, config| {
      b.iter(|| black_box(Octree::build(&points, config)))
    });
  }

  group.finish();
}

fn bench_coverage_levels(c: &mut Criterion) {
  let mut group = c.benchmark_group("coverage/levels");
  let table = line_table(1000, 2);
  let octrees = build_levels(&table, &OctreeConfig::levels(3, 4));

  for parallel_levels in [false, true] {
    let config = CoverageConfig {
      parallel_levels,
      ..Default::default()
    };
    let name = if parallel_levels { "parallel" } else { "sequential" };
    group.bench_function(name, |b| {
      b.iter(|| black_box(compute_coverage(&table, &octrees, &config)))
    });
  }

  group.finish();
}

fn bench_coverage_objects(c: &mut Criterion) {
  let mut group = c.benchmark_group("coverage/objects");
  let config = CoverageConfig::default();
  let level = [OctreeConfig::new(4, 4)];

  for count in [100, 1000] {
    let lines = line_table(count, 3);
    let line_octrees = build_levels(&lines, &level);
    group.bench_with_input(BenchmarkId::new("lines", count), &count, |b, _| {
      b.iter(|| black_box(compute_coverage(&lines, &line_octrees, &config)))
    });

    let ellipsoids = ellipsoid_table(count, 4);
    let ellipsoid_octrees = build_levels(&ellipsoids, &level);
    group.bench_with_input(BenchmarkId::new("ellipsoids", count), &count, |b, _| {
      b.iter(|| black_box(compute_coverage(&ellipsoids, &ellipsoid_octrees, &config)))
    });
  }

  group.finish();
}

criterion_group!(octree, bench_octree_build);

criterion_group!(coverage, bench_coverage_levels, bench_coverage_objects);

criterion_main!(octree, coverage);
