//! Criterion benchmarks for the per-pass update and evaluation of rates.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use surfkin_bench::{coverage_sweep, reference_profile};
use surfkin_core::RateLaw;
use surfkin_interface::{InterfaceArrheniusRate, ReactionRate};
use surfkin_rates::Arrhenius;
use surfkin_test_utils::fixtures::{self, reaction};

/// Benchmark: one update + evaluate pass over 400 rates.
fn bench_pass_400_rates(c: &mut Criterion) {
    let mut driver = reference_profile(100).unwrap();
    let sweep = coverage_sweep(64);
    let mut i = 0;

    c.bench_function("pass_400_rates", |b| {
        b.iter(|| {
            let theta = &sweep[i % sweep.len()];
            i += 1;
            let k = driver.step(900.0, theta).unwrap();
            black_box(k);
        });
    });
}

/// Benchmark: evaluation only, with cached coverage scalars.
fn bench_eval_only_400_rates(c: &mut Criterion) {
    let mut driver = reference_profile(100).unwrap();
    driver.step(900.0, &coverage_sweep(1)[0]).unwrap();

    c.bench_function("eval_only_400_rates", |b| {
        b.iter(|| black_box(driver.eval()));
    });
}

/// Benchmark: bare Arrhenius against the same law wrapped with an empty
/// coverage table.
fn bench_wrapper_overhead(c: &mut Criterion) {
    let kin = fixtures::platinum_hydrogen();
    let law = Arrhenius::new(3.7e20, 0.0, 6.74e7);
    let mut wrapped = InterfaceArrheniusRate::new(law.clone());
    wrapped
        .set_context(&reaction(fixtures::H_DESORPTION), &kin)
        .unwrap();
    let mut data = kin.snapshot();
    data.update_temperature(900.0);
    wrapped.update_from_struct(&data);

    c.bench_function("arrhenius_bare", |b| {
        b.iter(|| black_box(law.eval_rate(black_box(data.log_t), black_box(data.recip_t))));
    });
    c.bench_function("arrhenius_interface_wrapped", |b| {
        b.iter(|| black_box(wrapped.eval_from_struct(black_box(&data))));
    });
}

criterion_group!(
    benches,
    bench_pass_400_rates,
    bench_eval_only_400_rates,
    bench_wrapper_overhead
);
criterion_main!(benches);
