use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{Rng, SeedableRng};
use serde_json::json;
use trialgraph::{build_similarity_graph, build_view, EdgeWeighting, Record};
use trialgraph_algorithms::{louvain, LouvainConfig};

const CONDITION_POOL: &[&str] = &[
    "Asthma",
    "Diabetes",
    "Hypertension",
    "Measles",
    "Influenza",
    "Migraine",
    "Anemia",
    "Psoriasis",
    "Glaucoma",
    "Arthritis",
];

/// Synthetic corpus: each record draws 1-3 conditions from a small pool so
/// the pairwise scan finds plenty of intersections.
fn synthetic_records(size: usize, seed: u64) -> Vec<Record> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    (0..size)
        .map(|i| {
            let count = rng.gen_range(1..=3);
            let conditions: Vec<&str> = (0..count)
                .map(|_| CONDITION_POOL[rng.gen_range(0..CONDITION_POOL.len())])
                .collect();
            Record::from_json(
                format!("record-{}", i),
                json!({
                    "FullStudy": {"Study": {
                        "ProtocolSection": {"IdentificationModule": {
                            "Organization": {"OrgFullName": format!("Org {}", i % 20)}
                        }},
                        "ConditionsModule": {"Condition": conditions}
                    }}
                }),
            )
        })
        .collect()
}

/// Benchmark the quadratic pairwise similarity scan
fn bench_graph_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("graph_build");

    for size in [100, 250, 500].iter() {
        let records = synthetic_records(*size, 42);
        let config = trialgraph::PipelineConfig::default();

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let graph = build_similarity_graph(&records, &config).unwrap();
                criterion::black_box(graph.edge_count());
            });
        });
    }
    group.finish();
}

/// Benchmark the parallel scan against the same corpus
fn bench_graph_build_parallel(c: &mut Criterion) {
    let mut group = c.benchmark_group("graph_build_parallel");

    for size in [250, 500].iter() {
        let records = synthetic_records(*size, 42);
        let mut config = trialgraph::PipelineConfig::default();
        config.parallel = true;

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let graph = build_similarity_graph(&records, &config).unwrap();
                criterion::black_box(graph.edge_count());
            });
        });
    }
    group.finish();
}

/// Benchmark Louvain on the lowered view
fn bench_louvain(c: &mut Criterion) {
    let mut group = c.benchmark_group("louvain");

    for size in [100, 250, 500].iter() {
        let records = synthetic_records(*size, 42);
        let config = trialgraph::PipelineConfig::default();
        let graph = build_similarity_graph(&records, &config).unwrap();
        let (view, _) = build_view(&graph, EdgeWeighting::Unit);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let result = louvain(&view, &LouvainConfig::default());
                criterion::black_box(result.community_count);
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_graph_build,
    bench_graph_build_parallel,
    bench_louvain
);
criterion_main!(benches);
