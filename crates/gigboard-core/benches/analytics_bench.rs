//! Performance benchmarks for analytics and template rendering
//!
//! The dashboard recomputes analytics on every refresh, so compute has
//! to stay cheap even for a backlog of thousands of tracked projects.

use chrono::{Duration, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gigboard_core::analytics::AnalyticsData;
use gigboard_core::models::{BusinessStats, Project, ProjectStatus, RevenuePoint};
use gigboard_core::sample::sample_data;
use gigboard_core::templates::{substitute, TemplateStore, TemplateVars};
use std::sync::Arc;

/// Generate test projects for benchmarking
fn generate_test_projects(count: usize) -> Vec<Arc<Project>> {
    let statuses = ProjectStatus::all();
    let today = Utc::now().date_naive();

    (0..count)
        .map(|i| {
            Arc::new(Project {
                id: i as u32 + 1,
                title: format!("Project {}", i),
                client: format!("Client {}", i % 20),
                project_type: "Market Research".to_string(),
                status: statuses[i % statuses.len()],
                package_type: "Standard".to_string(),
                due_date: today + Duration::days((i % 60) as i64),
                progress: ((i * 7) % 101) as u8,
                price: 250.0 + (i % 10) as f64 * 100.0,
            })
        })
        .collect()
}

fn bench_vars() -> TemplateVars {
    TemplateVars::new()
        .with("client_name", "TechStart Inc.")
        .with("seller_name", "Dana Velasquez")
        .with("service_type", "Market Research")
        .with("project_title", "Market Analysis")
        .with("project_type", "Market Research")
        .with("package_type", "Standard")
        .with("due_date", "2025-08-10")
}

/// Benchmark 1: AnalyticsData::compute with varying project counts
fn analytics_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("analytics_compute");

    let data = sample_data();
    let stats = BusinessStats::default();
    let revenue: Vec<RevenuePoint> = data.revenue.clone();

    for count in [10, 100, 1000] {
        let projects = generate_test_projects(count);
        group.bench_with_input(
            BenchmarkId::new("projects", count),
            &projects,
            |b, projects| {
                b.iter(|| {
                    black_box(AnalyticsData::compute(
                        &stats,
                        &revenue,
                        projects,
                        &data.service_mix,
                    ));
                });
            },
        );
    }

    group.finish();
}

/// Benchmark 2: placeholder substitution over a full template body
fn substitution_benchmark(c: &mut Criterion) {
    let store = TemplateStore::with_builtins();
    let template = store
        .get("project_kickoff")
        .expect("built-in template present");
    let vars = bench_vars();

    c.bench_function("substitute_kickoff_body", |b| {
        b.iter(|| {
            black_box(substitute(&template.body, &vars));
        });
    });
}

/// Benchmark 3: full render through the store, usage tracking included
fn render_benchmark(c: &mut Criterion) {
    let store = TemplateStore::with_builtins();
    let vars = bench_vars();

    c.bench_function("render_kickoff", |b| {
        b.iter(|| {
            black_box(store.render("project_kickoff", &vars)).ok();
        });
    });
}

criterion_group!(
    benches,
    analytics_benchmark,
    substitution_benchmark,
    render_benchmark
);
criterion_main!(benches);
