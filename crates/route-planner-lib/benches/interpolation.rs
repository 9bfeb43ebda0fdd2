//! Performance benchmarks for route-planner-lib
//!
//! Run with: cargo bench --package route-planner-lib

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use route_planner_lib::{Coordinate, Route, RouteConfig, RoutePlanner};
use std::hint::black_box;
use std::time::Duration;

/// Generate a wiggly waypoint path with roughly `step_deg` between waypoints
fn generate_waypoints(count: usize, step_deg: f64) -> Vec<Coordinate> {
    (0..count)
        .map(|i| {
            let t = i as f64;
            Coordinate::new(51.5 + t * step_deg, -0.1 + t * step_deg + (t * 0.7).sin() * step_deg)
        })
        .collect()
}

fn bench_route_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("route_build");
    let config = RouteConfig::default();

    for &count in &[10usize, 100, 1000] {
        // ~100 m between waypoints, ~20 dots per segment
        let waypoints = generate_waypoints(count, 0.0009);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &waypoints, |b, w| {
            b.iter(|| Route::build(black_box(w.iter().copied()), &config))
        });
    }

    group.finish();
}

/// Adding a waypoint rebuilds the whole route, measure the cost at the end of a long list
fn bench_add_and_undo(c: &mut Criterion) {
    let mut planner = RoutePlanner::default();
    let mut now = Duration::ZERO;
    for coordinate in generate_waypoints(200, 0.0009) {
        now += Duration::from_secs(2);
        let _ = planner.add_waypoint(coordinate, now);
    }

    c.bench_function("add_and_undo_200", |b| {
        b.iter(|| {
            now += Duration::from_secs(2);
            let _ = planner.add_waypoint(black_box(Coordinate::new(51.7, 0.1)), now);
            let _ = planner.undo_last();
        })
    });
}

criterion_group!(benches, bench_route_build, bench_add_and_undo);
criterion_main!(benches);
