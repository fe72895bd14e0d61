//! # Rekha: Least-Cost Feature Tracing on 3D Point Clouds
//!
//! Snaps a handful of operator-picked waypoints on a dense, coloured point
//! cloud onto a continuous trace that follows a surface feature such as a
//! fracture on an outcrop scan.
//!
//! ## Features
//!
//! - **Implicit graph**: neighbours come from radius queries against a
//!   [`PointStore`]; no adjacency is ever materialized
//! - **Constrained search**: uniform-cost search that only moves towards the
//!   target and gives up after a fixed number of settled points
//! - **Incremental re-planning**: after a waypoint edit only the affected
//!   segments are solved again
//! - **Pluggable cost**: colour similarity by default, with intensity,
//!   curvature, gradient, scalar and distance terms available
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use rekha::{InMemoryCloud, PointRecord, Tracer, TracerConfig};
//! use rekha::core::{Point3, PointId, Rgb};
//!
//! let cloud = Arc::new(InMemoryCloud::from_records(
//!     (0..20).map(|i| PointRecord::new(Point3::new(i as f32, 0.0, 0.0), Rgb::grey(40))),
//! ));
//!
//! let config = TracerConfig { radius_multiplier: 1.5, ..Default::default() };
//! let mut tracer = Tracer::new(&cloud, config);
//! tracer.insert_waypoint_id(PointId::new(0, 2)).unwrap();
//! tracer.insert_waypoint_id(PointId::new(0, 17)).unwrap();
//!
//! assert!(tracer.optimize_path(10_000));
//! assert_eq!(tracer.current_trace().points().len(), 16);
//! ```
//!
//! ## Architecture
//!
//! - [`core`]: point identity, position, colour and geometry helpers
//! - [`cloud`]: the point store interface and an in-memory R-tree indexed cloud
//! - [`cost`]: edge cost terms and the cost model
//! - [`search`]: single-segment constrained search
//! - [`trace`]: waypoints, memoized trace optimization, tracers and slots
//! - [`config`]: YAML configuration
//!
//! ## Data Flow
//!
//! ```text
//!   operator pick ──► Tracer::insert_waypoint ──► WaypointList
//!                                                     │
//!   Tracer::optimize_path ──► PathOptimizer ◄─────────┘
//!                                 │  per changed pair
//!                                 ▼
//!                           SegmentSearch ──► PointStore radius queries
//!                                 │                 + CostModel
//!                                 ▼
//!                               Trace (one segment per waypoint pair)
//! ```
//!
//! The crate logs through the `log` facade and never installs a logger.

pub mod cloud;
pub mod config;
pub mod core;
pub mod cost;
pub mod error;
pub mod search;
pub mod trace;

// Re-export main types at crate root
pub use cloud::{CloudBuilder, CloudConfig, InMemoryCloud, PointRecord, PointStore};
pub use config::{ConfigLoadError, RekhaConfig};
pub use cost::{CostContext, CostModel, CostTerm};
pub use error::{Result, TraceError};
pub use search::{SegmentPath, SegmentSearch, solve_segment};
pub use trace::{
    OptimizeReport, PathOptimizer, Trace, Tracer, TracerConfig, TracerSlots, TracerStatus,
    WaypointList,
};
