//! Constrained least-cost search between two waypoints.
//!
//! Uniform-cost search (Dijkstra) over an implicit graph: the neighbours of a
//! point are whatever the [`PointStore`] returns for a radius query around it.
//! Two constraints keep the search narrow:
//!
//! - **Forward progress**: a neighbour is only considered if it is strictly
//!   closer (in Euclidean distance) to the target than the point being
//!   expanded. Paths never double back or turn sharper than ~90°.
//! - **Iteration cap**: at most `max_iterations` points are settled; past
//!   that the call fails cleanly. This is the only cancellation mechanism.
//!
//! ```rust,ignore
//! use rekha::search::SegmentSearch;
//!
//! let search = SegmentSearch::new(&cloud, &cost_model);
//! match search.solve(&start, &end, radius, 100_000) {
//!     Ok(path) => println!("{} points, cost {:.1}", path.len(), path.cost),
//!     Err(e) => println!("segment failed: {}", e),
//! }
//! ```

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use log::{debug, trace, warn};

use crate::cloud::PointStore;
use crate::core::{CloudPoint, PointId};
use crate::cost::{CostContext, CostModel};
use crate::error::{Result, TraceError};

/// A frontier entry. Ordered for a min-heap on cost, ties settled in
/// insertion order.
#[derive(Clone, Debug)]
struct OpenEntry {
    cost: f32,
    seq: u64,
    point: CloudPoint,
}

impl Eq for OpenEntry {}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A solved segment.
#[derive(Clone, Debug, PartialEq)]
pub struct SegmentPath {
    /// Points from start to end, both inclusive
    pub points: Vec<CloudPoint>,
    /// Total cost
    pub cost: f32,
    /// Points settled during the search
    pub iterations: usize,
}

impl SegmentPath {
    /// Number of points in the path.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Euclidean length of the polyline.
    pub fn length(&self) -> f32 {
        self.points
            .windows(2)
            .map(|w| w[0].position.distance(&w[1].position))
            .sum()
    }
}

/// Segment solver bound to a store and a cost model.
///
/// Holds no mutable state: open set, settled set and distances live inside
/// one [`solve`](Self::solve) call.
pub struct SegmentSearch<'a, S: PointStore + ?Sized> {
    store: Option<&'a S>,
    cost: &'a CostModel,
}

impl<'a, S: PointStore + ?Sized> SegmentSearch<'a, S> {
    /// Create a solver over `store`.
    pub fn new(store: &'a S, cost: &'a CostModel) -> Self {
        Self {
            store: Some(store),
            cost,
        }
    }

    /// Create a solver with no store; every solve fails with `NoCloud`.
    pub fn detached(cost: &'a CostModel) -> Self {
        Self { store: None, cost }
    }

    /// Find the least-cost path from `start` to `end`.
    ///
    /// # Errors
    /// - `NoCloud` if the solver has no store
    /// - `IterationLimitExceeded` once `max_iterations` points are settled
    ///   without reaching `end`
    /// - `Unreachable` if the frontier empties first
    pub fn solve(
        &self,
        start: &CloudPoint,
        end: &CloudPoint,
        radius: f32,
        max_iterations: usize,
    ) -> Result<SegmentPath> {
        let Some(store) = self.store else {
            debug!("[SegmentSearch] FAILED: NoCloud");
            return Err(TraceError::NoCloud);
        };

        trace!(
            "[SegmentSearch] solve: start={} end={} radius={:.3} max_iterations={}",
            start.id, end.id, radius, max_iterations
        );

        let ctx = CostContext::new(start, end, radius).with_scalar_range(store.scalar_range());
        let use_neighbourhood = self.cost.needs_neighbourhood();

        // key = point, value = predecessor
        let mut open: HashMap<PointId, PointId> = HashMap::new();
        let mut closed: HashMap<PointId, (CloudPoint, PointId)> = HashMap::new();
        let mut dist: HashMap<PointId, f32> = HashMap::new();
        let mut heap = BinaryHeap::new();
        let mut seq: u64 = 0;

        open.insert(start.id, start.id);
        dist.insert(start.id, 0.0);
        heap.push(OpenEntry {
            cost: 0.0,
            seq,
            point: *start,
        });

        let mut iterations = 0;

        while let Some(current) = heap.pop() {
            let id = current.point.id;

            // Settled already, or superseded by a cheaper entry
            let Some(&predecessor) = open.get(&id) else {
                continue;
            };
            if dist.get(&id).is_some_and(|&best| current.cost > best) {
                continue;
            }

            if iterations >= max_iterations {
                debug!(
                    "[SegmentSearch] FAILED: IterationLimitExceeded ({} iterations)",
                    iterations
                );
                return Err(TraceError::IterationLimitExceeded {
                    limit: max_iterations,
                });
            }
            iterations += 1;

            open.remove(&id);
            closed.insert(id, (current.point, predecessor));

            if id == end.id {
                let points = reconstruct_path(&closed, start.id, end.id);
                debug!(
                    "[SegmentSearch] SUCCESS: {} points, cost={:.2}, iterations={}",
                    points.len(),
                    current.cost,
                    iterations
                );
                return Ok(SegmentPath {
                    points,
                    cost: current.cost,
                    iterations,
                });
            }

            let current_d2 = current.point.position.distance_squared(&end.position);
            let neighbours = store.points_within_radius(&current.point, radius);
            trace!(
                "[SegmentSearch] expand {}: {} neighbours",
                id,
                neighbours.len()
            );

            let neighbourhood: &[CloudPoint] = if use_neighbourhood { &neighbours } else { &[] };

            for candidate in &neighbours {
                // Must make progress towards the target
                if candidate.position.distance_squared(&end.position) >= current_d2 {
                    continue;
                }
                if closed.contains_key(&candidate.id) {
                    continue;
                }

                let tentative = current.cost
                    + self
                        .cost
                        .edge_cost(&ctx, &current.point, candidate, neighbourhood);

                let improves = dist.get(&candidate.id).is_none_or(|&known| tentative < known);
                if !improves {
                    continue;
                }

                dist.insert(candidate.id, tentative);
                open.insert(candidate.id, id);
                seq += 1;
                heap.push(OpenEntry {
                    cost: tentative,
                    seq,
                    point: *candidate,
                });
            }
        }

        warn!(
            "[SegmentSearch] FAILED: {} unreachable from {} after {} iterations (radius {:.3})",
            end.id, start.id, iterations, radius
        );
        Err(TraceError::Unreachable { iterations, radius })
    }
}

/// Walk predecessor links back from `end` to `start`.
fn reconstruct_path(
    closed: &HashMap<PointId, (CloudPoint, PointId)>,
    start: PointId,
    end: PointId,
) -> Vec<CloudPoint> {
    let mut path = Vec::new();
    let mut current = end;

    while let Some(&(point, predecessor)) = closed.get(&current) {
        path.push(point);
        if current == start {
            break;
        }
        current = predecessor;
    }

    path.reverse();
    path
}

/// Solve one segment with a fresh solver.
pub fn solve_segment<S: PointStore + ?Sized>(
    store: &S,
    cost: &CostModel,
    start: &CloudPoint,
    end: &CloudPoint,
    radius: f32,
    max_iterations: usize,
) -> Result<SegmentPath> {
    SegmentSearch::new(store, cost).solve(start, end, radius, max_iterations)
}
