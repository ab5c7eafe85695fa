// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use cartage_model::problem::Problem;
use cartage_solver::solver::{solve, Method, SolveOptions};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::hint::black_box;

/// Builds a balanced m x n instance with integer-valued costs and
/// marginals, deterministic per seed. Supply is drawn first; demand then
/// splits the supply total so the instance balances exactly.
fn generated_instance(num_origins: usize, num_destinations: usize, seed: u64) -> Problem<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let costs: Vec<Vec<f64>> = (0..num_origins)
        .map(|_| {
            (0..num_destinations)
                .map(|_| rng.random_range(1..=50) as f64)
                .collect()
        })
        .collect();
    let supply: Vec<f64> = (0..num_origins)
        .map(|_| rng.random_range(1..=100) as f64)
        .collect();

    let mut demand = vec![0.0; num_destinations];
    let mut left = supply.iter().sum::<f64>() as u64;
    for d in demand.iter_mut().take(num_destinations - 1) {
        // share < left, so the last destination keeps a positive remainder.
        let share = rng.random_range(0..left);
        *d = share as f64;
        left -= share;
    }
    demand[num_destinations - 1] = left as f64;

    Problem::new(costs, supply, demand).expect("generated instance is valid")
}

fn bench_methods(c: &mut Criterion) {
    let shapes = [(5usize, 5usize), (10, 10), (20, 20), (40, 40)];

    for method in Method::ALL {
        let mut group = c.benchmark_group(format!("solve/{}", method));
        for &(m, n) in &shapes {
            let problem = generated_instance(m, n, 0x5EED + (m * n) as u64);
            group.throughput(Throughput::Elements((m * n) as u64));
            group.bench_with_input(
                BenchmarkId::from_parameter(format!("{}x{}", m, n)),
                &problem,
                |b, problem| {
                    b.iter(|| {
                        let report = solve(
                            black_box(problem.clone()),
                            method,
                            SolveOptions::default(),
                        );
                        // Refiners may reject degenerate random instances;
                        // measuring that path is fine, failing is not.
                        black_box(report.map(|r| r.total_cost()).ok())
                    })
                },
            );
        }
        group.finish();
    }
}

criterion_group!(benches, bench_methods);
criterion_main!(benches);
