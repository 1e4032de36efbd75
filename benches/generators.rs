use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use maze_escape::{
    generators::{self, GenerationStep, RecursiveBacktracker},
    grid::Grid,
    units::{ColumnsCount, RowsCount},
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn fresh_grid(side: usize) -> Grid {
    Grid::new(RowsCount(side), ColumnsCount(side)).unwrap()
}

fn bench_recursive_backtracker_maze_32(c: &mut Criterion) {
    c.bench_function("recursive_backtracker_maze_32", |b| {
        b.iter_batched(|| fresh_grid(32),
                       |mut g| generators::recursive_backtracker(&mut g, StdRng::seed_from_u64(1)),
                       BatchSize::SmallInput)
    });
}

fn bench_recursive_backtracker_maze_256(c: &mut Criterion) {
    c.bench_function("recursive_backtracker_maze_256", |b| {
        b.iter_batched(|| fresh_grid(256),
                       |mut g| generators::recursive_backtracker(&mut g, StdRng::seed_from_u64(1)),
                       BatchSize::LargeInput)
    });
}

fn bench_single_steps_20(c: &mut Criterion) {
    c.bench_function("generation_steps_20", |b| {
        b.iter_batched(|| fresh_grid(20),
                       |mut g| {
                           let mut generator =
                               RecursiveBacktracker::new(&mut g, StdRng::seed_from_u64(7));
                           while generator.step(&mut g) != GenerationStep::Finished {}
                       },
                       BatchSize::SmallInput)
    });
}

criterion_group!(
    benches,
    bench_recursive_backtracker_maze_32,
    bench_recursive_backtracker_maze_256,
    bench_single_steps_20
);
criterion_main!(benches);
