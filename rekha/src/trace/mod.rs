//! Waypoints, incremental trace optimization and the per-operator tracer.
//!
//! - [`WaypointList`]: ordered anchors with the insertion rule
//! - [`PathOptimizer`]: memoized per-pair re-planning into a [`Trace`]
//! - [`Tracer`]: one operator's waypoints and trace over a shared cloud
//! - [`TracerSlots`]: a fixed number of tracers addressed by slot

mod optimizer;
mod registry;
mod tracer;
mod waypoints;

pub use optimizer::{OptimizeReport, PathOptimizer, Segment, Trace};
pub use registry::{DEFAULT_SLOTS, TracerSlots};
pub use tracer::{Tracer, TracerConfig, TracerStatus};
pub use waypoints::WaypointList;
