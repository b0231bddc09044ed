// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the bootstrap coordinator's two hot paths: the
// lock-free already-initialised check and a full pass over no-op steps.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use blickwerk_bootstrap::{Bootstrap, InitStep};

fn noop_steps(count: usize) -> Vec<InitStep> {
    (0..count)
        .map(|i| InitStep::new(format!("step-{i}"), || async { Ok(()) }))
        .collect()
}

/// Benchmark the fast path: `ensure_initialized` on an already-initialised
/// coordinator. This is what every screen transition pays after startup.
fn bench_already_initialized(c: &mut Criterion) {
    let rt = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("build runtime");

    let bootstrap = Bootstrap::new(noop_steps(2));
    rt.block_on(bootstrap.ensure_initialized())
        .expect("initial pass");

    c.bench_function("ensure_initialized (already initialised)", |b| {
        b.iter(|| {
            rt.block_on(black_box(&bootstrap).ensure_initialized())
                .expect("fast path");
        });
    });
}

/// Benchmark a full pass over no-op steps at various step counts.
///
/// Measures pure coordinator overhead — locking, timing, observer calls —
/// with no real work in the steps.
fn bench_full_pass(c: &mut Criterion) {
    let rt = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("build runtime");

    let counts: &[usize] = &[1, 2, 8];

    let mut group = c.benchmark_group("full_pass_noop_steps");
    for &count in counts {
        group.bench_function(format!("{count} steps"), |b| {
            b.iter(|| {
                // A coordinator initialises once, so each iteration needs a
                // fresh one. Construction cost is part of the measurement.
                let bootstrap = Bootstrap::new(noop_steps(count));
                rt.block_on(bootstrap.ensure_initialized())
                    .expect("full pass");
                black_box(bootstrap);
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_already_initialized, bench_full_pass);
criterion_main!(benches);
