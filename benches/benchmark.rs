use criterion::{criterion_group, criterion_main, Criterion};

use aoc2022::{default_input, Options, Pruning, ALL_SOLUTIONS};

pub fn criterion_benchmark(c: &mut Criterion) {
    for &(n, day) in ALL_SOLUTIONS {
        let input = default_input(n).unwrap();
        for pruning in [Pruning::VisitedSet, Pruning::Exact] {
            let options = Options {
                pruning,
                timeout: None,
            };
            c.bench_function(&format!("day{} {:?}", n, pruning), |b| {
                b.iter(|| day(&input, &options))
            });
        }
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
