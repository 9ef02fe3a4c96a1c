// Copyright 2025 the Kdviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kdviz_partition::surfaces::{log::DrawLog, svg::SvgSurface};
use kdviz_partition::{Axis, DIAGRAM_BOUNDS, NodeId, PartitionTree, Side, render};
use kurbo::Point;

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_points(count: usize, seed: u64) -> Vec<Point> {
    let mut rng = Rng::new(seed);
    (0..count)
        .map(|_| Point::new(rng.next_f64() * 100.0, rng.next_f64() * 100.0))
        .collect()
}

/// Median split with alternating axes.
fn build_median(points: Vec<Point>) -> PartitionTree {
    let mut t = PartitionTree::new();
    let mut work: Vec<(Vec<Point>, usize, Option<(NodeId, Side)>)> = vec![(points, 0, None)];
    while let Some((mut pts, depth, parent)) = work.pop() {
        if pts.is_empty() {
            continue;
        }
        let axis = if depth % 2 == 0 { Axis::X } else { Axis::Y };
        pts.sort_by(|a, b| axis.coord(*a).total_cmp(&axis.coord(*b)));
        let mid = pts.len() / 2;
        let p = pts[mid];
        let id = match parent {
            None => t.set_root(p, axis),
            Some((pid, side)) => t.insert_child(pid, side, p, axis),
        };
        let right = pts.split_off(mid + 1);
        pts.truncate(mid);
        work.push((pts, depth + 1, Some((id, Side::Left))));
        work.push((right, depth + 1, Some((id, Side::Right))));
    }
    t
}

fn gen_chain(len: usize) -> PartitionTree {
    let mut t = PartitionTree::new();
    let mut cur = t.set_root(Point::new(50.0, 50.0), Axis::X);
    for i in 1..len {
        let axis = if i % 2 == 0 { Axis::X } else { Axis::Y };
        cur = t.insert_child(cur, Side::Right, Point::new(50.0, 50.0), axis);
    }
    t
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    for &n in &[1_000usize, 10_000, 100_000] {
        let tree = build_median(gen_points(n, 0x9E37_79B9_7F4A_7C15));
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("draw_log_median_n{}", n), |b| {
            b.iter_batched(
                DrawLog::new,
                |mut log| {
                    let stats = render(&tree, DIAGRAM_BOUNDS, &mut log);
                    black_box(stats);
                },
                BatchSize::LargeInput,
            )
        });
        group.bench_function(format!("svg_median_n{}", n), |b| {
            b.iter_batched(
                SvgSurface::default,
                |mut svg| {
                    render(&tree, DIAGRAM_BOUNDS, &mut svg);
                    black_box(svg.document().len());
                },
                BatchSize::LargeInput,
            )
        });
    }
    let chain = gen_chain(100_000);
    group.throughput(Throughput::Elements(100_000));
    group.bench_function("draw_log_chain_n100000", |b| {
        b.iter_batched(
            DrawLog::new,
            |mut log| {
                black_box(render(&chain, DIAGRAM_BOUNDS, &mut log));
            },
            BatchSize::LargeInput,
        )
    });
    group.finish();
}

fn bench_wire(c: &mut Criterion) {
    let mut group = c.benchmark_group("wire");
    for &n in &[1_000usize, 10_000] {
        let json = build_median(gen_points(n, 42)).to_json();
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("from_json_n{}", n), |b| {
            b.iter(|| black_box(PartitionTree::from_json(&json).map(|t| t.len())))
        });
    }
    group.finish();
}

fn bench_invariant(c: &mut Criterion) {
    let mut group = c.benchmark_group("invariant");
    for &n in &[10_000usize, 100_000] {
        let tree = build_median(gen_points(n, 7));
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("check_median_n{}", n), |b| {
            b.iter(|| black_box(tree.check_invariant().is_ok()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_render, bench_wire, bench_invariant);
criterion_main!(benches);
