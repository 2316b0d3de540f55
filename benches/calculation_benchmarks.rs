//! Performance benchmarks for the Home Plan Engine.
//!
//! This benchmark suite covers the calculators and the proposal endpoint:
//! - Single plan calculation
//! - Deduction projection across deduction periods
//! - Full three-tier proposal composition
//! - `/proposal` request through the router
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use home_plan_engine::api::{AppState, create_router};
use home_plan_engine::calculation::{build_proposal, compute_deduction, compute_plan};
use home_plan_engine::config::ConfigLoader;
use home_plan_engine::models::{DeductionInput, PlanInput};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

fn load_config() -> ConfigLoader {
    ConfigLoader::load("./config/standard").expect("Failed to load config")
}

fn standard_plan() -> PlanInput {
    PlanInput {
        land: 15_000_000.0,
        building: 30_000_000.0,
        owner_cash: 2_000_000.0,
        base_fee: 2_800_000.0,
        reference_building: 25_000_000.0,
        rate_percent: 1.5,
        term_years: 35,
    }
}

fn bench_compute_plan(c: &mut Criterion) {
    let input = standard_plan();
    c.bench_function("compute_plan", |b| {
        b.iter(|| black_box(compute_plan(black_box(&input))))
    });
}

/// Benchmark: deduction projection for each allowed period length.
fn bench_compute_deduction(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_deduction");

    for years in [1u32, 5, 10, 13, 20].iter() {
        let input = DeductionInput {
            loan_principal: 40_800_000.0,
            rate_percent: 1.5,
            deduction_years: *years,
            cap: 45_000_000.0,
            deduction_rate_percent: 0.7,
            term_years: 35,
        };

        group.throughput(Throughput::Elements(*years as u64));
        group.bench_with_input(BenchmarkId::new("years", years), years, |b, _| {
            b.iter(|| black_box(compute_deduction(black_box(&input))))
        });
    }

    group.finish();
}

fn bench_build_proposal(c: &mut Criterion) {
    let params = load_config().defaults();
    c.bench_function("build_proposal", |b| {
        b.iter(|| black_box(build_proposal(black_box(&params))))
    });
}

/// Benchmark: default proposal through the HTTP router.
fn bench_proposal_endpoint(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(AppState::new(load_config()));
    let body = serde_json::json!({ "customer_name": "Bench", "land_price": 1800 }).to_string();

    c.bench_function("proposal_endpoint", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/proposal")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

criterion_group!(
    benches,
    bench_compute_plan,
    bench_compute_deduction,
    bench_build_proposal,
    bench_proposal_endpoint,
);
criterion_main!(benches);
