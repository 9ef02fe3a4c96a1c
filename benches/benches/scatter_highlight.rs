// Copyright 2025 the Kdviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kdviz_scatter::{Dataset, EmbeddingPoint, FrameLog, ScatterManager};

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

fn gen_dataset(count: u32, seed: u64) -> Dataset {
    let mut rng = Rng::new(seed);
    let points = (0..count)
        .map(|id| EmbeddingPoint {
            id,
            x: rng.next_f64() * 40.0 - 20.0,
            y: rng.next_f64() * 40.0 - 20.0,
            z: rng.next_f64() * 40.0 - 20.0,
            label: (rng.next_u64() % 10) as u32,
        })
        .collect();
    Dataset::from_points(points).expect("ids are unique")
}

fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("load");
    for &n in &[5_000u32, 50_000] {
        let table = gen_dataset(n, 1).to_table();
        group.throughput(Throughput::Elements(u64::from(n)));
        group.bench_function(format!("from_table_n{}", n), |b| {
            b.iter(|| black_box(Dataset::from_table(&table).map(|d| d.len())))
        });
    }
    group.finish();
}

fn bench_highlight(c: &mut Criterion) {
    let mut group = c.benchmark_group("highlight");
    for &n in &[5_000u32, 50_000] {
        let dataset = gen_dataset(n, 2);
        group.throughput(Throughput::Elements(u64::from(n)));
        group.bench_function(format!("highlight_pair_n{}", n), |b| {
            b.iter_batched(
                || {
                    let mut m = ScatterManager::with_default_view(FrameLog::keep_last(1));
                    m.load_dataset(dataset.clone()).expect("fresh scene");
                    m
                },
                |mut m| {
                    black_box(m.highlight_pair(0, n - 1));
                },
                BatchSize::LargeInput,
            )
        });
        group.bench_function(format!("highlight_miss_n{}", n), |b| {
            let mut m = ScatterManager::with_default_view(FrameLog::keep_last(1));
            m.load_dataset(dataset.clone()).expect("fresh scene");
            b.iter(|| black_box(m.highlight_pair(0, n + 1)))
        });
        group.bench_function(format!("figure_json_n{}", n), |b| {
            let mut m = ScatterManager::with_default_view(FrameLog::keep_last(1));
            m.load_dataset(dataset.clone()).expect("fresh scene");
            let _ = m.highlight_pair(0, 1);
            b.iter(|| black_box(m.sink().latest().map(|f| f.to_figure().map(|s| s.len()))))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_load, bench_highlight);
criterion_main!(benches);
