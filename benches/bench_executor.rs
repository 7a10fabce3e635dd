use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use evolvr::{
    cancellation::CancellationToken,
    crossover::SinglePointCrossover,
    evolution::{ExecutorOptions, GeneticAlgorithmExecutor, WorkerLimit},
    fitness::SumFitnessEvaluator,
    mutation::SwapMutator,
    population::Population,
    rng::RandomNumberGenerator,
    selection::TournamentSelector,
};

const CHROMOSOME_LENGTH: usize = 64;

type SumExecutor = GeneticAlgorithmExecutor<
    i64,
    SumFitnessEvaluator,
    SwapMutator,
    TournamentSelector,
    SinglePointCrossover,
>;

fn worker_limits() -> Vec<(&'static str, WorkerLimit)> {
    vec![
        ("bounded_1", WorkerLimit::default()),
        ("bounded_4", WorkerLimit::bounded(4).unwrap()),
        ("unbounded", WorkerLimit::Unbounded),
    ]
}

fn build_executor(size: usize, workers: WorkerLimit) -> SumExecutor {
    let mut rng = RandomNumberGenerator::from_seed(17);
    let population = Population::random(size, CHROMOSOME_LENGTH, || rng.gen_index(100) as i64);
    let options = ExecutorOptions::builder()
        .workers(workers)
        .mutation_probability(0.1)
        .seed(17)
        .build();

    GeneticAlgorithmExecutor::new(
        population,
        SumFitnessEvaluator,
        SwapMutator::default(),
        TournamentSelector::new(3, 2).unwrap(),
        SinglePointCrossover,
        options,
    )
    .unwrap()
}

fn bench_refresh_fitness(c: &mut Criterion) {
    let mut group = c.benchmark_group("refresh_fitness");
    let token = CancellationToken::new();

    for size in [100, 1000].iter() {
        for (name, workers) in worker_limits() {
            let mut executor = build_executor(*size, workers);
            group.bench_with_input(BenchmarkId::new(name, size), size, |b, _| {
                b.iter(|| executor.refresh_fitness(black_box(&token)).unwrap())
            });
        }
    }

    group.finish();
}

fn bench_generations(c: &mut Criterion) {
    let mut group = c.benchmark_group("generations");
    group.sample_size(20);
    let token = CancellationToken::new();

    for size in [100, 1000].iter() {
        for (name, workers) in worker_limits() {
            group.bench_with_input(BenchmarkId::new(name, size), size, |b, &size| {
                b.iter(|| {
                    let mut executor = build_executor(size, workers);
                    executor
                        .run_generations(black_box(&token), black_box(10))
                        .unwrap()
                        .len()
                })
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_refresh_fitness, bench_generations);
criterion_main!(benches);
