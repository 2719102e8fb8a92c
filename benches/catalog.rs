use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use sortviz::{
    create_elements, Algorithm, AlgorithmOptions, InstrumentedHooks, PacingConfig, ResetPreset, RunFlag, SortArray,
    SortEngine,
};

const LEN: usize = 256;

fn make_engine() -> SortEngine<InstrumentedHooks> {
    let flag = RunFlag::new();
    flag.start();
    let hooks = InstrumentedHooks::new(flag)
        .with_pacing(PacingConfig::unpaced())
        .with_columns(LEN);
    SortEngine::new(LEN, hooks)
}

fn bench_catalog(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();
    let engine = make_engine();
    let options = AlgorithmOptions::default();

    let mut input = create_elements(LEN);
    ResetPreset::Shuffle.apply(&mut input);

    let mut group = c.benchmark_group("unpaced_run");
    group.throughput(Throughput::Elements(LEN as u64));
    for algorithm in Algorithm::ALL {
        group.bench_with_input(BenchmarkId::from_parameter(algorithm), &input, |b, input| {
            b.iter(|| {
                let arr = SortArray::new(input.clone());
                runtime.block_on(engine.run(algorithm, &arr, &options)).unwrap();
                arr
            });
        });
    }
    group.finish();
}

fn bench_parallel_networks(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();
    let engine = make_engine();

    let mut input = create_elements(LEN);
    ResetPreset::Shuffle.apply(&mut input);

    let mut group = c.benchmark_group("network_phases");
    for parallel in [false, true] {
        let options = AlgorithmOptions::default().with_parallel(parallel);
        let label = if parallel { "concurrent" } else { "sequential" };
        group.bench_with_input(BenchmarkId::new("bitonic", label), &input, |b, input| {
            b.iter(|| {
                let arr = SortArray::new(input.clone());
                runtime
                    .block_on(engine.run(Algorithm::BitonicSort, &arr, &options))
                    .unwrap();
                arr
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_catalog, bench_parallel_networks);
criterion_main!(benches);
