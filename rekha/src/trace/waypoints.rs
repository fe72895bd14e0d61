//! Ordered waypoint list with the insertion rule.

use log::trace;

use crate::core::CloudPoint;
use crate::core::math::in_circle;

/// Operator-designated anchor points, in trace order.
#[derive(Clone, Debug, Default)]
pub struct WaypointList {
    points: Vec<CloudPoint>,
    last_inserted: Option<usize>,
}

impl WaypointList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a waypoint where it belongs; returns its index.
    ///
    /// - With fewer than two waypoints, `q` is appended.
    /// - Otherwise the first adjacent pair whose diameter sphere contains `q`
    ///   is split by it.
    /// - Failing that, `q` is prepended if it is closer to the start of the
    ///   *last* pair than to its end, and appended otherwise. With more than
    ///   two waypoints this compares against the trailing pair, not the first
    ///   waypoint.
    pub fn insert(&mut self, q: CloudPoint) -> usize {
        let n = self.points.len();

        if n >= 2 {
            for i in 1..n {
                if in_circle(&self.points[i - 1].position, &self.points[i].position, &q.position) {
                    trace!("[Waypoints] {} splits pair {}-{}", q.id, i - 1, i);
                    self.points.insert(i, q);
                    self.last_inserted = Some(i);
                    return i;
                }
            }

            let start = &self.points[n - 2];
            let end = &self.points[n - 1];
            let ds = q.position.distance(&start.position);
            let de = q.position.distance(&end.position);
            if ds < de {
                trace!("[Waypoints] {} prepended", q.id);
                self.points.insert(0, q);
                self.last_inserted = Some(0);
                return 0;
            }
        }

        self.points.push(q);
        let index = self.points.len() - 1;
        self.last_inserted = Some(index);
        index
    }

    /// Replace the waypoint at `index`; returns the old one.
    pub fn replace(&mut self, index: usize, q: CloudPoint) -> Option<CloudPoint> {
        let slot = self.points.get_mut(index)?;
        Some(std::mem::replace(slot, q))
    }

    /// Index produced by the most recent insertion.
    pub fn last_inserted(&self) -> Option<usize> {
        self.last_inserted
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn as_slice(&self) -> &[CloudPoint] {
        &self.points
    }

    pub fn get(&self, index: usize) -> Option<&CloudPoint> {
        self.points.get(index)
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.last_inserted = None;
    }
}
