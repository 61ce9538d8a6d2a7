//! Criterion benchmarks for the u-strippack packers.
//!
//! Uses synthetic instances with a fixed mix of rectangles and L, T and U
//! shapes, so timings track the search overhead rather than the data.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;
use u_strippack::beam::{BeamConfig, BeamRunner};
use u_strippack::greedy::GreedyConstructor;
use u_strippack::random::create_rng;
use u_strippack::rls::{RlsConfig, RlsRunner};
use u_strippack::shape::{Coord, Shape};
use u_strippack::width::{CandidateWidths, WidthConfig, WidthSearch};

// ===========================================================================
// Synthetic instances
// ===========================================================================

fn random_shape<R: Rng>(rng: &mut R) -> Shape {
    match rng.random_range(0..4) {
        0 => Shape::rectangle(rng.random_range(1..9), rng.random_range(1..9)),
        1 => {
            let height = rng.random_range(3..9);
            Shape::l_shape(
                rng.random_range(1..5),
                height,
                rng.random_range(1..5),
                rng.random_range(1..height),
            )
        }
        2 => {
            let stem = rng.random_range(3..8);
            Shape::t_shape(
                rng.random_range(1..4),
                rng.random_range(1..4),
                rng.random_range(1..4),
                rng.random_range(1..stem),
                stem,
                rng.random_range(1..stem),
            )
        }
        _ => {
            let floor = rng.random_range(1..4);
            Shape::concave(
                rng.random_range(1..4),
                rng.random_range(1..4),
                rng.random_range(1..4),
                floor + rng.random_range(1..6),
                floor,
                floor + rng.random_range(1..6),
            )
        }
    }
}

fn instance(n: usize) -> Vec<Shape> {
    let mut rng = create_rng(7);
    (0..n).map(|_| random_shape(&mut rng)).collect()
}

/// A width a little above the square root of the total area.
fn bin_width(shapes: &[Shape]) -> Coord {
    let area: Coord = shapes.iter().map(Shape::area).sum();
    let longest = shapes.iter().map(Shape::max_length).max().unwrap_or(1);
    ((area as f64).sqrt().ceil() as Coord).max(longest)
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_greedy(c: &mut Criterion) {
    let mut group = c.benchmark_group("greedy");

    for &n in &[20, 50, 100] {
        let shapes = instance(n);
        let width = bin_width(&shapes);
        let order: Vec<usize> = (0..n).collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &(shapes, order), |b, (s, o)| {
            b.iter(|| {
                let result = GreedyConstructor::new(black_box(s)).construct(black_box(o), width);
                black_box(result)
            })
        });
    }
    group.finish();
}

fn bench_rls(c: &mut Criterion) {
    let mut group = c.benchmark_group("rls");
    group.sample_size(10);

    for &n in &[20, 50] {
        let shapes = instance(n);
        let width = bin_width(&shapes);
        let config = RlsConfig::default().with_max_iterations(500).with_seed(42);
        group.bench_with_input(BenchmarkId::from_parameter(n), &(shapes, config), |b, (s, c)| {
            b.iter(|| {
                let result = RlsRunner::run(black_box(s), width, black_box(c));
                black_box(result)
            })
        });
    }
    group.finish();
}

fn bench_beam(c: &mut Criterion) {
    let mut group = c.benchmark_group("beam");
    group.sample_size(10);

    for &n in &[20, 50] {
        let shapes = instance(n);
        let width = bin_width(&shapes);
        let config = BeamConfig::default().with_seed(42);
        group.bench_with_input(BenchmarkId::from_parameter(n), &(shapes, config), |b, (s, c)| {
            b.iter(|| {
                let result = BeamRunner::run(black_box(s), width, black_box(c));
                black_box(result)
            })
        });
    }
    group.finish();
}

fn bench_width_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("width_search");
    group.sample_size(10);

    let shapes = instance(30);
    let config = WidthConfig::default()
        .with_candidates(CandidateWidths::SquareRoot {
            lower_scale: 0.95,
            upper_scale: 1.05,
            step: 1,
        })
        .with_seed(42);
    group.bench_with_input(BenchmarkId::from_parameter(30), &(shapes, config), |b, (s, c)| {
        b.iter(|| {
            let result = WidthSearch::run(black_box(s), black_box(c));
            black_box(result)
        })
    });
    group.finish();
}

criterion_group!(benches, bench_greedy, bench_rls, bench_beam, bench_width_search);
criterion_main!(benches);
