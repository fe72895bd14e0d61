//! End-to-end tracing over synthetic outcrops.

use std::sync::Arc;

use rekha::core::CloudPoint;
use rekha::{TraceError, Tracer, TracerConfig, TracerStatus};

use crate::fixtures::{self, FRACTURE};

const MAX_ITERATIONS: usize = 100_000;

fn config() -> TracerConfig {
    TracerConfig {
        radius_multiplier: 3.0,
        max_iterations: MAX_ITERATIONS,
        ..Default::default()
    }
}

fn assert_joined(segments: &[Vec<CloudPoint>]) {
    for pair in segments.windows(2) {
        let last = pair[0].last().expect("segment solved");
        let first = pair[1].first().expect("segment solved");
        assert_eq!(last.id, first.id, "segments must share their waypoint");
    }
}

#[test]
fn test_trace_follows_fracture() {
    env_logger::try_init().ok();

    let cloud = Arc::new(fixtures::fracture_outcrop());
    let mut tracer = Tracer::new(&cloud, config());
    assert!((tracer.radius() - 1.5).abs() < 1e-4);

    let start = fixtures::on_fracture(&cloud, 2.0);
    let end = fixtures::on_fracture(&cloud, 18.0);
    tracer.insert_waypoint(start);
    tracer.insert_waypoint(end);

    assert!(tracer.optimize_path(MAX_ITERATIONS));

    let points = tracer.current_trace().points();
    assert_eq!(points.first().map(|p| p.id), Some(start.id));
    assert_eq!(points.last().map(|p| p.id), Some(end.id));
    for p in &points {
        assert_eq!(p.color, FRACTURE, "trace left the fracture at {:?}", p.position);
    }

    // Crosses the partition boundary at x = 10
    assert_ne!(start.id.partition, end.id.partition);
}

#[test]
fn test_segments_make_forward_progress() {
    env_logger::try_init().ok();

    let cloud = Arc::new(fixtures::fracture_outcrop());
    let mut tracer = Tracer::new(&cloud, config());
    for x in [2.0, 10.0, 18.0] {
        tracer.insert_waypoint(fixtures::on_fracture(&cloud, x));
    }
    assert!(tracer.optimize_path(MAX_ITERATIONS));

    for segment in tracer.current_trace().segments() {
        let end = segment.last().expect("segment solved").position;
        for step in segment.windows(2) {
            let before = step[0].position.distance_squared(&end);
            let after = step[1].position.distance_squared(&end);
            assert!(after < before, "step away from target: {} -> {}", before, after);
            assert!(step[0].position.distance(&step[1].position) <= tracer.radius());
        }
    }
}

#[test]
fn test_moving_waypoint_reuses_untouched_segments() {
    env_logger::try_init().ok();

    let cloud = Arc::new(fixtures::fracture_outcrop());
    let mut tracer = Tracer::new(&cloud, config());
    for x in [2.0, 10.0, 18.0] {
        tracer.insert_waypoint(fixtures::on_fracture(&cloud, x));
    }
    assert!(tracer.optimize_path(MAX_ITERATIONS));
    let first = tracer.current_trace().segments()[0].clone();

    let moved = fixtures::on_fracture(&cloud, 14.0);
    assert!(tracer.move_waypoint(2, moved).is_some());
    let report = tracer.optimize_report(MAX_ITERATIONS);

    assert!(report.success());
    assert_eq!(report.reused, 1);
    assert_eq!(report.solved, 1);

    let segments = tracer.current_trace().segments();
    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0], first);
    assert_eq!(segments[1].last().map(|p| p.id), Some(moved.id));
    assert_joined(segments);
}

#[test]
fn test_interior_insertion_splits_segment() {
    env_logger::try_init().ok();

    let cloud = Arc::new(fixtures::fracture_outcrop());
    let mut tracer = Tracer::new(&cloud, config());
    let a = fixtures::on_fracture(&cloud, 2.0);
    let c = fixtures::on_fracture(&cloud, 18.0);
    tracer.insert_waypoint(a);
    tracer.insert_waypoint(c);
    assert!(tracer.optimize_path(MAX_ITERATIONS));

    let b = fixtures::on_fracture(&cloud, 10.0);
    assert_eq!(tracer.insert_waypoint(b), 1);
    assert_eq!(tracer.last_inserted(), Some(1));

    let ids: Vec<_> = tracer.waypoints().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![a.id, b.id, c.id]);

    let report = tracer.optimize_report(MAX_ITERATIONS);
    assert!(report.success());
    assert_eq!(report.solved, 2);

    let segments = tracer.current_trace().segments();
    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0].first().map(|p| p.id), Some(a.id));
    assert_eq!(segments[1].last().map(|p| p.id), Some(c.id));
    assert_joined(segments);

    // Shared waypoint emitted once
    let points = tracer.current_trace().points();
    let total: usize = segments.iter().map(Vec::len).sum();
    assert_eq!(points.len(), total - 1);
}

#[test]
fn test_append_and_prepend_outside_trace() {
    let cloud = Arc::new(fixtures::fracture_outcrop());
    let mut tracer = Tracer::new(&cloud, config());
    tracer.insert_waypoint(fixtures::on_fracture(&cloud, 6.0));
    tracer.insert_waypoint(fixtures::on_fracture(&cloud, 12.0));

    assert_eq!(tracer.insert_waypoint(fixtures::on_fracture(&cloud, 18.0)), 2);
    assert_eq!(tracer.insert_waypoint(fixtures::on_fracture(&cloud, 2.0)), 0);
    assert_eq!(tracer.waypoint_count(), 4);

    assert!(tracer.optimize_path(MAX_ITERATIONS));
    assert_eq!(tracer.current_trace().len(), 3);
    assert_joined(tracer.current_trace().segments());
}

#[test]
fn test_iteration_cap_fails_cleanly() {
    let cloud = Arc::new(fixtures::fracture_outcrop());
    let mut tracer = Tracer::new(&cloud, config());
    tracer.insert_waypoint(fixtures::on_fracture(&cloud, 2.0));
    tracer.insert_waypoint(fixtures::on_fracture(&cloud, 18.0));

    let report = tracer.optimize_report(3);
    assert_eq!(
        report.failures,
        vec![(0, TraceError::IterationLimitExceeded { limit: 3 })]
    );
    assert_eq!(tracer.status(), TracerStatus::Failed);
    assert!(tracer.current_trace().segments()[0].is_empty());

    // Same waypoints, enough budget
    assert!(tracer.optimize_path(MAX_ITERATIONS));
    assert_eq!(tracer.status(), TracerStatus::Traced);
    assert!(tracer.current_trace().is_complete());
}

#[test]
fn test_unreachable_across_gap() {
    env_logger::try_init().ok();

    let cloud = Arc::new(fixtures::split_patches());
    let mut tracer = Tracer::new(&cloud, config());
    tracer.insert_waypoint(fixtures::at(&cloud, 0.0, 0.0));
    tracer.insert_waypoint(fixtures::at(&cloud, 34.5, 4.5));

    let report = tracer.optimize_report(MAX_ITERATIONS);
    assert_eq!(report.failures.len(), 1);
    let (slot, err) = &report.failures[0];
    assert_eq!(*slot, 0);
    assert!(matches!(err, TraceError::Unreachable { .. }));
    assert!(err.is_anomalous());
}

#[test]
fn test_single_waypoint_is_degenerate() {
    let cloud = Arc::new(fixtures::fracture_outcrop());
    let mut tracer = Tracer::new(&cloud, config());
    tracer.insert_waypoint(fixtures::on_fracture(&cloud, 4.0));

    assert!(!tracer.request_trace());
    let report = tracer.optimize_report(MAX_ITERATIONS);
    assert_eq!(
        report.failures,
        vec![(0, TraceError::DegenerateTrace { waypoints: 1 })]
    );
    assert!(tracer.current_trace().is_empty());
}
