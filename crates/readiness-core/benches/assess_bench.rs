//! # Assessment Benchmarks
//!
//! Run with: `cargo bench -p readiness-core`

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use readiness_core::{
    EntitySnapshot, FinancialYear, PeriodSetup, WeekSetup, assess, has_countries_and_currencies,
};
use serde_json::{Value, json};
use std::hint::black_box;

fn period_setup() -> Value {
    PeriodSetup {
        financial_year: FinancialYear {
            name: "FY".to_string(),
            start_month: "January".to_string(),
            end_month: "December".to_string(),
        },
        week_setup: WeekSetup {
            name: "ISO".to_string(),
            month_for_week_one: "January".to_string(),
            starting_day_of_week: "Monday".to_string(),
        },
    }
    .to_value()
}

/// Snapshot whose selections are JSON-encoded strings of `size` identifiers.
fn encoded_snapshot(size: usize) -> EntitySnapshot {
    let ids: Vec<usize> = (0..size).collect();
    EntitySnapshot {
        entity_type: Some("Planning Entity".to_string()),
        entity_data: json!({ "modules": json!(ids).to_string() }),
        period_setup: period_setup(),
        selected_countries: Value::String(json!({ "selectedCountries": ids }).to_string()),
        selected_currencies: Value::String(json!({ "selectedCurrencies": ids }).to_string()),
        current_tab: Some(2),
    }
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_assess(c: &mut Criterion) {
    let mut group = c.benchmark_group("assess_encoded");

    for size in [1, 100, 10000].iter() {
        let snapshot = encoded_snapshot(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &snapshot, |b, s| {
            b.iter(|| black_box(assess(s)));
        });
    }

    group.finish();
}

fn bench_presence_shapes(c: &mut Criterion) {
    let mut group = c.benchmark_group("countries_and_currencies");
    let list = json!(["US", "CA", "MX"]);
    let wrapped = json!({ "selectedCountries": ["US", "CA", "MX"] });
    let encoded = json!(r#"{"selectedCountries":["US","CA","MX"]}"#);

    group.bench_function("list", |b| {
        b.iter(|| has_countries_and_currencies(black_box(&list), black_box(&list)));
    });
    group.bench_function("wrapped", |b| {
        b.iter(|| has_countries_and_currencies(black_box(&wrapped), black_box(&list)));
    });
    group.bench_function("encoded", |b| {
        b.iter(|| has_countries_and_currencies(black_box(&encoded), black_box(&list)));
    });

    group.finish();
}

criterion_group!(benches, bench_assess, bench_presence_shapes);
criterion_main!(benches);
