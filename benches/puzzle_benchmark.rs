use gamesearch::puzzle::{ConcurrentSolver, Queens, SequentialSolver};

use criterion::{criterion_group, criterion_main, Criterion};

fn criterion_benchmark(c: &mut Criterion) {
    let queens = Queens::new(12);

    c.bench_function("sequential 12 queens", |b| {
        b.iter(|| SequentialSolver::new(&queens).solve().unwrap())
    });
    c.bench_function("concurrent 12 queens, 4 threads", |b| {
        b.iter(|| ConcurrentSolver::new(&queens, 4).solve().unwrap().unwrap())
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
