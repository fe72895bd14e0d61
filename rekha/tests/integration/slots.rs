//! Several operators tracing the same cloud, configured from YAML.

use std::sync::Arc;

use rekha::{RekhaConfig, TraceError, TracerSlots, TracerStatus};

use crate::fixtures::{self, FRACTURE};

const CONFIG: &str = r#"
search:
  radius_multiplier: 3.0
  max_iterations: 50000
cost:
  terms: [rgb]
tracers:
  slots: 2
"#;

#[test]
fn test_slots_trace_independently() {
    env_logger::try_init().ok();

    let config = RekhaConfig::from_yaml(CONFIG).unwrap();
    let cloud = Arc::new(fixtures::twin_fractures());
    let mut slots = TracerSlots::new(&cloud, config.tracers.slots, config.to_tracer_config());

    for (slot, y) in [(1, 4.0), (2, 16.0)] {
        let tracer = slots.tracer_mut(slot).unwrap();
        tracer.insert_waypoint(fixtures::at(&cloud, 2.0, y));
        tracer.insert_waypoint(fixtures::at(&cloud, 18.0, y));
        assert!(tracer.request_trace());
    }

    let mut results = slots.update_all();
    results.sort();
    assert_eq!(results, vec![(1, true), (2, true)]);

    for (slot, y) in [(1, 4.0), (2, 16.0)] {
        let tracer = slots.get(slot).unwrap();
        assert_eq!(tracer.status(), TracerStatus::Traced);
        let points = tracer.current_trace().points();
        assert_eq!(points.len(), 33);
        for p in &points {
            assert_eq!(p.position.y, y);
            assert_eq!(p.color, FRACTURE);
        }
    }

    // Nothing pending
    assert!(slots.update_all().is_empty());

    assert_eq!(
        slots.tracer_mut(3).err(),
        Some(TraceError::InvalidSlot { slot: 3, slots: 2 })
    );
}

#[test]
fn test_reset_one_slot_keeps_other() {
    let config = RekhaConfig::from_yaml(CONFIG).unwrap();
    let cloud = Arc::new(fixtures::twin_fractures());
    let mut slots = TracerSlots::new(&cloud, config.tracers.slots, config.to_tracer_config());

    for slot in [1, 2] {
        let tracer = slots.tracer_mut(slot).unwrap();
        tracer.insert_waypoint(fixtures::at(&cloud, 4.0, 4.0));
        tracer.insert_waypoint(fixtures::at(&cloud, 8.0, 4.0));
        assert!(tracer.optimize_path(50_000));
    }

    slots.reset(2).unwrap();
    assert_eq!(slots.get(2).unwrap().waypoint_count(), 0);
    assert!(slots.get(2).unwrap().current_trace().is_empty());
    assert_eq!(slots.get(1).unwrap().current_trace().points().len(), 9);
    assert_eq!(slots.active_slots(), vec![1, 2]);
}

#[test]
fn test_default_config_file_parses() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("configs/rekha.yaml");
    let config = RekhaConfig::load(&path).unwrap();
    assert_eq!(config.search.radius_multiplier, 32.0);
    assert_eq!(config.search.max_iterations, 1_000_000);
    assert_eq!(config.tracers.slots, 3);
    assert_eq!(config.to_cost_model().describe(), "rgb");
}
