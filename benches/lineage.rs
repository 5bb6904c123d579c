//! Performance benchmarks for lineage resolution.
//!
//! Run with: `cargo bench --bench lineage`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::sync::Arc;

use genealogy_kernel::{
    collect_lineage, GenealogyLoader, HistoricBlock, InMemoryChain, InMemoryRecordStore, Network,
};

/// Create a test network record.
fn make_network(id: u64, height: u64) -> Network {
    Network::new(
        format!("net_{id}"),
        HistoricBlock::new(format!("0x{height:016x}"), height),
    )
}

/// Sparse batch with every third entry absent.
fn make_batch(n: u64) -> Vec<Option<Network>> {
    (0..n)
        .map(|i| {
            if i % 3 == 2 {
                None
            } else {
                Some(make_network(i, i * 10))
            }
        })
        .collect()
}

/// Benchmark the pure collector over growing batches.
fn bench_collect_lineage(c: &mut Criterion) {
    let mut group = c.benchmark_group("collect_lineage");

    for size in [10, 100, 1_000, 10_000] {
        let batch = make_batch(size);

        group.throughput(Throughput::Elements(size));
        group.bench_with_input(BenchmarkId::new("networks", size), &batch, |b, batch| {
            b.iter(|| collect_lineage(black_box(batch)))
        });
    }

    group.finish();
}

/// Benchmark a full load against the in-memory collaborators, with a
/// previously-recorded ancestor confirmed for every batch entry.
fn bench_loader(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("tokio runtime");

    let mut group = c.benchmark_group("genealogy_load");

    for size in [4u64, 16, 64] {
        let store = Arc::new(InMemoryRecordStore::new());
        let chain = Arc::new(InMemoryChain::new());

        // One known ancestor below the whole batch
        store.add_network(make_network(9_999, 1));
        chain.add_block(1, format!("0x{:016x}", 1u64));

        let loader = GenealogyLoader::new(store, chain);
        let batch = make_batch(size);

        group.throughput(Throughput::Elements(size));
        group.bench_with_input(BenchmarkId::new("batch", size), &batch, |b, batch| {
            b.iter(|| {
                runtime
                    .block_on(loader.load(black_box(batch), false))
                    .expect("load")
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_collect_lineage, bench_loader);
criterion_main!(benches);
