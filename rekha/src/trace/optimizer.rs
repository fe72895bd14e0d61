//! Incremental multi-segment re-planning.
//!
//! The trace keeps one segment per adjacent waypoint pair. After a waypoint
//! edit only the pairs whose endpoints changed are solved again; every other
//! segment is reused as-is.

use log::{debug, warn};

use crate::cloud::PointStore;
use crate::core::CloudPoint;
use crate::error::TraceError;
use crate::search::SegmentSearch;

/// Solved path between two consecutive waypoints. Empty means not yet
/// solved or failed.
pub type Segment = Vec<CloudPoint>;

/// Ordered segments; `segments[i]` joins waypoint `i` to waypoint `i + 1`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Trace {
    segments: Vec<Segment>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Segments in waypoint order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Whether every segment is solved.
    pub fn is_complete(&self) -> bool {
        !self.segments.is_empty() && self.segments.iter().all(|s| !s.is_empty())
    }

    /// All trace points in order. A waypoint shared by two segments appears
    /// once.
    pub fn points(&self) -> Vec<CloudPoint> {
        let mut out: Vec<CloudPoint> = Vec::new();
        for segment in &self.segments {
            let skip = match (out.last(), segment.first()) {
                (Some(last), Some(first)) if last.same_as(first) => 1,
                _ => 0,
            };
            out.extend(segment.iter().skip(skip).copied());
        }
        out
    }

    /// Euclidean length over all segments.
    pub fn length(&self) -> f32 {
        self.segments
            .iter()
            .flat_map(|s| s.windows(2))
            .map(|w| w[0].position.distance(&w[1].position))
            .sum()
    }

    pub fn clear(&mut self) {
        self.segments.clear();
    }
}

/// Outcome of one optimization pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OptimizeReport {
    /// Segments solved (or re-solved) in this pass
    pub solved: usize,
    /// Segments reused unchanged
    pub reused: usize,
    /// Failed segments: (segment index, reason)
    pub failures: Vec<(usize, TraceError)>,
}

impl OptimizeReport {
    /// True iff no segment failed.
    pub fn success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Owner of the trace; decides per waypoint pair whether to reuse, replace
/// or insert a segment.
#[derive(Clone, Debug, Default)]
pub struct PathOptimizer {
    trace: Trace,
}

impl PathOptimizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current trace.
    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    pub fn clear(&mut self) {
        self.trace.clear();
    }

    /// Bring the trace in line with `waypoints`.
    ///
    /// For each pair `(waypoints[i-1], waypoints[i])`, slot `i-1`:
    /// - past the end of the trace: solve and append;
    /// - non-empty with matching first and last point: reuse;
    /// - otherwise solve, then overwrite the slot if its old segment still
    ///   ends at the pair's end (or was empty), and insert before it if not.
    ///
    /// Inserting keeps the old segment for a later pair. Whatever is left
    /// past the last pair is dropped at the end, so the trace always ends up
    /// with `waypoints.len() - 1` segments.
    pub fn optimize<S: PointStore + ?Sized>(
        &mut self,
        waypoints: &[CloudPoint],
        search: &SegmentSearch<'_, S>,
        radius: f32,
        max_iterations: usize,
    ) -> OptimizeReport {
        let mut report = OptimizeReport::default();

        if waypoints.len() < 2 {
            self.trace.clear();
            report.failures.push((
                0,
                TraceError::DegenerateTrace {
                    waypoints: waypoints.len(),
                },
            ));
            return report;
        }

        let segments = &mut self.trace.segments;

        for i in 1..waypoints.len() {
            let start = &waypoints[i - 1];
            let end = &waypoints[i];
            let slot = i - 1;

            if slot >= segments.len() {
                let segment = solve_or_empty(search, start, end, radius, max_iterations, slot, &mut report);
                segments.push(segment);
                continue;
            }

            let existing = &segments[slot];
            let valid = matches!(
                (existing.first(), existing.last()),
                (Some(first), Some(last)) if first.same_as(start) && last.same_as(end)
            );
            if valid {
                report.reused += 1;
                continue;
            }

            let end_unchanged = existing.last().is_none_or(|last| last.same_as(end));
            let segment = solve_or_empty(search, start, end, radius, max_iterations, slot, &mut report);
            if end_unchanged {
                segments[slot] = segment;
            } else {
                segments.insert(slot, segment);
            }
        }

        let expected = waypoints.len() - 1;
        if segments.len() > expected {
            debug!(
                "[PathOptimizer] dropping {} stale segments",
                segments.len() - expected
            );
            segments.truncate(expected);
        }

        debug!(
            "[PathOptimizer] {} segments: {} solved, {} reused, {} failed",
            segments.len(),
            report.solved,
            report.reused,
            report.failures.len()
        );

        report
    }
}

fn solve_or_empty<S: PointStore + ?Sized>(
    search: &SegmentSearch<'_, S>,
    start: &CloudPoint,
    end: &CloudPoint,
    radius: f32,
    max_iterations: usize,
    slot: usize,
    report: &mut OptimizeReport,
) -> Segment {
    report.solved += 1;
    match search.solve(start, end, radius, max_iterations) {
        Ok(path) => path.points,
        Err(e) => {
            if e.is_anomalous() {
                warn!(
                    "[PathOptimizer] segment {} ({} -> {}) {}: {}",
                    slot, start.id, end.id, e.code(), e
                );
            } else {
                debug!(
                    "[PathOptimizer] segment {} ({} -> {}) {}: {}",
                    slot, start.id, end.id, e.code(), e
                );
            }
            report.failures.push((slot, e));
            Segment::new()
        }
    }
}
