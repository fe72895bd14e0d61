//! Per-operator tracer: waypoints, trace and status over a shared cloud.

use std::sync::{Arc, Weak};

use log::{debug, info, warn};

use super::optimizer::{OptimizeReport, PathOptimizer, Trace};
use super::waypoints::WaypointList;
use crate::cloud::PointStore;
use crate::core::{CloudPoint, PointId};
use crate::cost::CostModel;
use crate::error::{Result, TraceError};
use crate::search::SegmentSearch;

/// Tracer parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct TracerConfig {
    /// Search radius as a multiple of the cloud's average spacing
    pub radius_multiplier: f32,
    /// Settlement cap per segment for [`Tracer::update`]
    pub max_iterations: usize,
    /// Edge cost model
    pub cost: CostModel,
}

impl Default for TracerConfig {
    fn default() -> Self {
        Self {
            radius_multiplier: 32.0,
            max_iterations: 1_000_000,
            cost: CostModel::default(),
        }
    }
}

/// Where a tracer is in its request/update cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TracerStatus {
    /// Nothing requested, or the waypoints changed since the last trace
    #[default]
    Idle,
    /// Trace requested, runs on the next [`Tracer::update`]
    Pending,
    /// Every segment solved for the current waypoints
    Traced,
    /// Last trace left at least one segment unsolved
    Failed,
}

/// One operator's fracture trace.
///
/// Holds a weak handle to the cloud: the tracer never keeps it alive, and
/// once it is dropped every segment fails with [`TraceError::NoCloud`].
pub struct Tracer<S: PointStore + ?Sized> {
    store: Weak<S>,
    config: TracerConfig,
    spacing: f32,
    radius: f32,
    waypoints: WaypointList,
    optimizer: PathOptimizer,
    status: TracerStatus,
    last_report: Option<OptimizeReport>,
}

impl<S: PointStore + ?Sized> Tracer<S> {
    /// Create a tracer over `store`. The search radius is fixed here from the
    /// store's average spacing.
    pub fn new(store: &Arc<S>, config: TracerConfig) -> Self {
        let spacing = store.average_spacing();
        let radius = spacing * config.radius_multiplier;

        if radius > 0.0 && radius.is_finite() {
            info!(
                "[Tracer] created: spacing={:.4}, radius={:.4}, cost={}",
                spacing,
                radius,
                config.cost.describe()
            );
        } else {
            warn!(
                "[Tracer] created with unusable radius {} (spacing {})",
                radius, spacing
            );
        }

        Self {
            store: Arc::downgrade(store),
            config,
            spacing,
            radius,
            waypoints: WaypointList::new(),
            optimizer: PathOptimizer::new(),
            status: TracerStatus::Idle,
            last_report: None,
        }
    }

    /// Insert a waypoint; returns its index.
    pub fn insert_waypoint(&mut self, point: CloudPoint) -> usize {
        let index = self.waypoints.insert(point);
        debug!(
            "[Tracer] waypoint {} at index {} ({} total)",
            point.id,
            index,
            self.waypoints.len()
        );
        self.mark_stale();
        index
    }

    /// Resolve `id` through the store and insert it.
    pub fn insert_waypoint_id(&mut self, id: PointId) -> Result<usize> {
        let store = self.store.upgrade().ok_or(TraceError::NoCloud)?;
        let point = store.point(id).ok_or(TraceError::UnknownPoint(id))?;
        Ok(self.insert_waypoint(point))
    }

    /// Replace the waypoint at `index`; returns the old one.
    pub fn move_waypoint(&mut self, index: usize, point: CloudPoint) -> Option<CloudPoint> {
        let old = self.waypoints.replace(index, point)?;
        self.mark_stale();
        Some(old)
    }

    /// Re-plan the trace. True iff every segment was solved.
    pub fn optimize_path(&mut self, max_iterations: usize) -> bool {
        self.optimize_report(max_iterations).success()
    }

    /// Re-plan the trace and return the full report.
    pub fn optimize_report(&mut self, max_iterations: usize) -> OptimizeReport {
        let store = self.store.upgrade();
        let search = match store.as_deref() {
            Some(store) => SegmentSearch::new(store, &self.config.cost),
            None => SegmentSearch::detached(&self.config.cost),
        };

        let report = self.optimizer.optimize(
            self.waypoints.as_slice(),
            &search,
            self.radius,
            max_iterations,
        );

        self.status = if report.success() {
            TracerStatus::Traced
        } else {
            TracerStatus::Failed
        };
        self.last_report = Some(report.clone());
        report
    }

    /// Ask for a trace on the next [`update`](Self::update).
    ///
    /// Refused (returns false) with fewer than two waypoints.
    pub fn request_trace(&mut self) -> bool {
        if self.waypoints.len() < 2 {
            info!(
                "[Tracer] trace refused: need at least 2 waypoints, have {}",
                self.waypoints.len()
            );
            return false;
        }
        self.status = TracerStatus::Pending;
        true
    }

    /// Run a pending trace with the configured iteration cap.
    ///
    /// Returns `None` when nothing was pending.
    pub fn update(&mut self) -> Option<bool> {
        if self.status != TracerStatus::Pending {
            return None;
        }
        Some(self.optimize_path(self.config.max_iterations))
    }

    /// Current trace.
    pub fn current_trace(&self) -> &Trace {
        self.optimizer.trace()
    }

    pub fn waypoint_count(&self) -> usize {
        self.waypoints.len()
    }

    pub fn waypoints(&self) -> &[CloudPoint] {
        self.waypoints.as_slice()
    }

    /// Index of the most recently inserted waypoint.
    pub fn last_inserted(&self) -> Option<usize> {
        self.waypoints.last_inserted()
    }

    /// Neighbour query radius.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Average spacing the radius was derived from.
    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    pub fn status(&self) -> TracerStatus {
        self.status
    }

    pub fn config(&self) -> &TracerConfig {
        &self.config
    }

    /// Report of the most recent optimization, if any.
    pub fn last_report(&self) -> Option<&OptimizeReport> {
        self.last_report.as_ref()
    }

    /// Whether the cloud is still alive.
    pub fn has_cloud(&self) -> bool {
        self.store.strong_count() > 0
    }

    /// Drop all waypoints and the trace.
    pub fn reset(&mut self) {
        self.waypoints.clear();
        self.optimizer.clear();
        self.status = TracerStatus::Idle;
        self.last_report = None;
    }

    fn mark_stale(&mut self) {
        if self.status != TracerStatus::Pending {
            self.status = TracerStatus::Idle;
        }
    }
}
