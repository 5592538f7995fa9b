use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use planar_kdtree::{KdTree, Point, PointSet, Rect};
use rand::{rngs::SmallRng, Rng, SeedableRng};

fn get_rand() -> impl rand::Rng {
    SmallRng::seed_from_u64(0xdeadbeef)
}

fn rand_point(rng: &mut impl Rng) -> Point {
    Point::new(rng.gen(), rng.gen())
}

/// Square query window of side `side` somewhere inside the unit square
fn rand_window(rng: &mut impl Rng, side: f64) -> Rect {
    let x: f64 = rng.gen_range(0.0, 1.0 - side);
    let y: f64 = rng.gen_range(0.0, 1.0 - side);
    Rect::new(x, y, x + side, y + side)
}

fn make_tree(rng: &mut impl Rng, size: usize) -> KdTree {
    let mut tree = KdTree::new();
    for _ in 0..size {
        tree.insert(rand_point(rng)).unwrap();
    }
    tree
}

fn make_set(rng: &mut impl Rng, size: usize) -> PointSet {
    let mut set = PointSet::new();
    for _ in 0..size {
        set.insert(rand_point(rng)).unwrap();
    }
    set
}

fn contains_rand(c: &mut Criterion) {
    let mut group = c.benchmark_group("KdTree contains_rand");
    for size in 8..16 {
        let size = 1 << size;
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, move |b, &size| {
            let mut rng = get_rand();
            let tree = make_tree(&mut rng, size);

            b.iter(|| tree.contains(rand_point(&mut rng)).unwrap())
        });
    }
    group.finish();
}

fn random_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("KdTree random_insert");
    for size in 8..16 {
        let size = 1 << size;
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut rng = get_rand();
            let mut tree = make_tree(&mut rng, size);

            b.iter(|| tree.insert(rand_point(&mut rng)).unwrap());
        });
    }
    group.finish();
}

fn range_small_window(c: &mut Criterion) {
    let mut group = c.benchmark_group("KdTree range small window");
    for size in 8..16 {
        let size = 1 << size;
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut rng = get_rand();
            let tree = make_tree(&mut rng, size);

            b.iter(|| {
                let rect = rand_window(&mut rng, 0.05);
                black_box(tree.range(rect).unwrap().count())
            });
        });
    }
    group.finish();
}

fn range_small_window_brute_force(c: &mut Criterion) {
    let mut group = c.benchmark_group("PointSet range small window");
    for size in 8..13 {
        let size = 1 << size;
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut rng = get_rand();
            let set = make_set(&mut rng, size);

            b.iter(|| {
                let rect = rand_window(&mut rng, 0.05);
                black_box(set.range(rect).unwrap())
            });
        });
    }
    group.finish();
}

fn nearest_rand(c: &mut Criterion) {
    let mut group = c.benchmark_group("KdTree nearest random");
    for size in 8..16 {
        let size = 1 << size;
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut rng = get_rand();
            let tree = make_tree(&mut rng, size);

            b.iter(|| tree.nearest(rand_point(&mut rng)).unwrap());
        });
    }
    group.finish();
}

fn nearest_rand_brute_force(c: &mut Criterion) {
    let mut group = c.benchmark_group("PointSet nearest random");
    for size in 8..13 {
        let size = 1 << size;
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut rng = get_rand();
            let set = make_set(&mut rng, size);

            b.iter(|| set.nearest(rand_point(&mut rng)).unwrap());
        });
    }
    group.finish();
}

fn bulk_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("KdTree from_points");
    for size in 8..16 {
        let size = 1 << size;
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut rng = get_rand();
            let points = (0..size).map(|_| rand_point(&mut rng)).collect::<Vec<_>>();

            b.iter(|| KdTree::from_points(points.iter().cloned()).unwrap());
        });
    }
    group.finish();
}

criterion_group!(
    kdtree_benches,
    contains_rand,
    random_insert,
    range_small_window,
    range_small_window_brute_force,
    nearest_rand,
    nearest_rand_brute_force,
    bulk_build,
);

criterion_main!(kdtree_benches);
