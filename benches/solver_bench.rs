use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use planar_voronoi::prelude::*;

fn random_points(n: usize, seed: u64) -> Vec<Site> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let x = rng.gen_range(-100.0..100.0);
            let y = rng.gen_range(-100.0..100.0);
            Site::point(x, y).unwrap()
        })
        .collect()
}

fn bench_bisector(c: &mut Criterion) {
    let mut group = c.benchmark_group("bisector");
    let p = Site::point(0.0, 1.0).unwrap();
    let q = Site::point(3.0, -2.0).unwrap();
    let l = Site::line(Point::new(-5.0, 0.0), Point::new(5.0, 0.5)).unwrap();

    group.bench_function("point_point_new", |b| {
        b.iter(|| Bisector::new(black_box(&p), black_box(&q)))
    });
    group.bench_function("point_line_new", |b| {
        b.iter(|| Bisector::new(black_box(&p), black_box(&l)))
    });
    let pl = Bisector::new(&p, &l).unwrap();
    group.bench_function("point_line_eval", |b| {
        b.iter(|| pl.point(black_box(2.5)))
    });
    group.bench_function("point_line_min_offset", |b| b.iter(|| black_box(pl).min_offset()));
    group.finish();
}

fn bench_solvers(c: &mut Criterion) {
    let mut group = c.benchmark_group("solvers");
    let (a, b2, c2) = (
        Site::point(0.0, 0.0).unwrap(),
        Site::point(2.0, 0.0).unwrap(),
        Site::point(1.0, 2.0).unwrap(),
    );
    let floor = Site::line(Point::new(-10.0, 0.0), Point::new(10.0, 0.0)).unwrap();
    let sides = [
        Site::line(Point::new(0.0, 0.0), Point::new(4.0, 0.0)).unwrap(),
        Site::line(Point::new(4.0, 0.0), Point::new(0.0, 4.0)).unwrap(),
        Site::line(Point::new(0.0, 4.0), Point::new(0.0, 0.0)).unwrap(),
    ];
    let plus = Sign::Plus;
    let mut out = Vec::with_capacity(8);

    let ppp = Solver::ppp();
    group.bench_function("ppp", |b| {
        b.iter(|| {
            out.clear();
            ppp.solve(black_box(&a), plus, &b2, plus, &c2, plus, &mut out)
        })
    });
    let qll = Solver::qll();
    group.bench_function("qll_line_point_point", |b| {
        b.iter(|| {
            out.clear();
            qll.solve(black_box(&floor), plus, &a, plus, &c2, plus, &mut out)
        })
    });
    let lll = Solver::lll();
    group.bench_function("lll", |b| {
        b.iter(|| {
            out.clear();
            lll.solve(black_box(&sides[0]), plus, &sides[1], plus, &sides[2], plus, &mut out)
        })
    });
    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve_all");
    for &n in &[100usize, 1_000, 10_000] {
        let sites = random_points(n + 2, 42);
        let jobs: Vec<SolveJob<'_>> = sites
            .windows(3)
            .map(|w| SolveJob::new([&w[0], &w[1], &w[2]], [Sign::Plus; 3]))
            .collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &jobs, |b, jobs| {
            b.iter(|| solve_all(black_box(jobs)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_bisector, bench_solvers, bench_batch);
criterion_main!(benches);
