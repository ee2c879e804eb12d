//! Criterion benchmarks for the series generators.
//!
//! Benchmarks:
//! 1. Random-walk history generation
//! 2. Intraday session simulation with peers
//! 3. Normalization of a primary against peers
//! 4. Full dashboard view assembly

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use fundflow_core::catalog::InMemoryCatalog;
use fundflow_core::dashboard::DashboardBuilder;
use fundflow_core::domain::PeerSeries;
use fundflow_core::rng::RngHierarchy;
use fundflow_core::series::{generate_history, normalize, simulate_intraday, IntradayParams};

fn end_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()
}

// ── 1. History ───────────────────────────────────────────────────────

fn bench_history(c: &mut Criterion) {
    let mut group = c.benchmark_group("history");

    for &length in &[31usize, 252, 2520] {
        group.bench_with_input(BenchmarkId::new("random_walk", length), &length, |b, &len| {
            let mut rng = StdRng::seed_from_u64(7);
            b.iter(|| generate_history(black_box(100.0), len, end_date(), &mut rng));
        });
    }

    group.finish();
}

// ── 2. Intraday ──────────────────────────────────────────────────────

fn bench_intraday(c: &mut Criterion) {
    let mut group = c.benchmark_group("intraday");

    let params = IntradayParams::new(142.5, 140.74)
        .with_peer("GREEN-055", 88.2)
        .with_peer("DIV-100", 54.1)
        .with_peer("ASIA-202", 32.8);

    group.bench_function("session_3_peers", |b| {
        let mut rng = StdRng::seed_from_u64(7);
        b.iter(|| simulate_intraday(black_box(&params), &mut rng));
    });

    group.finish();
}

// ── 3. Normalization ─────────────────────────────────────────────────

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    let mut rng = StdRng::seed_from_u64(7);

    let primary = generate_history(100.0, 252, end_date(), &mut rng).unwrap();
    let peers: Vec<PeerSeries> = (0..3)
        .map(|i| PeerSeries {
            code: format!("PEER{i}"),
            series: generate_history(50.0 + i as f64, 252, end_date(), &mut rng).unwrap(),
        })
        .collect();

    group.bench_function("252_points_3_peers", |b| {
        b.iter(|| normalize(black_box(&primary), black_box(&peers)));
    });

    group.finish();
}

// ── 4. Dashboard View ────────────────────────────────────────────────

fn bench_view(c: &mut Criterion) {
    let catalog = InMemoryCatalog::builtin();
    let builder = DashboardBuilder::new(&catalog, RngHierarchy::new(42)).with_end_date(end_date());

    c.bench_function("build_fund_view", |b| {
        b.iter(|| builder.build(black_box("TECH-001")));
    });
}

criterion_group!(
    benches,
    bench_history,
    bench_intraday,
    bench_normalize,
    bench_view,
);
criterion_main!(benches);
