/*
 * Tick Loop Benchmark
 *
 * Measures the cost of the per-tick simulation transition, including the
 * pixel-mask collision sweep, for a range of population sizes.
 */

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::time::Duration;

use flappy_neat::policy::AlwaysJump;
use flappy_neat::{Generation, Policy, SimulationParams, SpriteAtlas};

fn bench_params() -> SimulationParams {
    let mut params = SimulationParams::default();
    params.rng_seed = Some(1);
    // Pin the gap over the glide height so no bird dies during the
    // measurement window
    params.gap_min = 250;
    params.gap_max = 251;
    params
}

fn bench_generation_ticks(c: &mut Criterion) {
    let mut group = c.benchmark_group("generation_ticks");
    let params = bench_params();
    let atlas = SpriteAtlas::synthetic();

    for population in [10usize, 100, 500].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(population),
            population,
            |b, &n| {
                b.iter(|| {
                    let policies: Vec<Box<dyn Policy>> =
                        (0..n).map(|_| Box::new(AlwaysJump) as Box<dyn Policy>).collect();
                    let mut generation = Generation::new(policies, 1, &params, &atlas);
                    generation.run(&atlas, Some(50), |_| true).unwrap();
                    black_box(generation.ticks())
                });
            },
        );
    }

    group.finish();
}

fn bench_collision_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("collision_sweep");
    let params = bench_params();
    let atlas = SpriteAtlas::synthetic();

    // A single long-lived generation, ticked in place
    group.bench_function("population_200", |b| {
        let policies: Vec<Box<dyn Policy>> = (0..200)
            .map(|_| Box::new(AlwaysJump) as Box<dyn Policy>)
            .collect();
        let mut generation = Generation::new(policies, 1, &params, &atlas);

        b.iter(|| {
            generation.tick(&atlas).unwrap();
            black_box(generation.alive())
        });
    });

    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .sample_size(10)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1));
    targets = bench_generation_ticks, bench_collision_sweep
}

criterion_main!(benches);
