//! Benchmarks for the synchronization edges.
//!
//! Run with: `cargo bench --package paramsync --bench sync_bench`
//!
//! Measures the cost of one full round trip in each direction (edge write,
//! navigation or cell notification, settle check on the way back) and of the
//! mount pass.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use paramsync::{Codec, ParamAtomSynchronizer};
use paramsync_reactive::Observable;
use paramsync_router::{MemoryRouter, NavigateOptions};
use std::hint::black_box;

fn bench_mount(c: &mut Criterion) {
    c.bench_function("sync/mount", |b| {
        b.iter(|| {
            let router = MemoryRouter::new(["/?q=value&other=1"]).unwrap();
            let cell = Observable::new(String::new());
            let handle =
                ParamAtomSynchronizer::new(cell.clone(), router, "q", Codec::default()).attach();
            black_box(handle.map(|h| h.phase()).ok());
        });
    });
}

fn bench_cell_to_url(c: &mut Criterion) {
    let mut group = c.benchmark_group("sync/cell_to_url");
    for extra_params in [0usize, 8, 32] {
        let entry = (0..extra_params)
            .map(|i| format!("k{i}=v{i}"))
            .collect::<Vec<_>>()
            .join("&");
        group.bench_with_input(
            BenchmarkId::from_parameter(extra_params),
            &entry,
            |b, entry| {
                let router = MemoryRouter::new([format!("/?{entry}")]).unwrap();
                let cell = Observable::new(0u64);
                let _handle =
                    ParamAtomSynchronizer::new(cell.clone(), router.clone(), "n", Codec::parse_or(0))
                        .attach()
                        .unwrap();
                let mut n = 0u64;
                b.iter(|| {
                    n += 1;
                    cell.set(black_box(n));
                    // Keep history bounded.
                    router.back();
                });
            },
        );
    }
    group.finish();
}

fn bench_url_to_cell(c: &mut Criterion) {
    c.bench_function("sync/url_to_cell", |b| {
        let router = MemoryRouter::default();
        let cell = Observable::new(0u64);
        let _handle = ParamAtomSynchronizer::new(cell.clone(), router.clone(), "n", Codec::parse_or(0))
            .attach()
            .unwrap();
        let mut n = 0u64;
        b.iter(|| {
            n += 1;
            router
                .navigate(&format!("/?n={n}"), NavigateOptions::replace())
                .unwrap();
            black_box(cell.get());
        });
    });
}

criterion_group!(benches, bench_mount, bench_cell_to_url, bench_url_to_cell);
criterion_main!(benches);
