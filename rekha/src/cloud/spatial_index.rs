//! R-tree index for radius and nearest-neighbour queries over 3D samples.

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use crate::core::Point3;

/// A sample position tagged with its slot in the owner's point array.
#[derive(Clone, Debug)]
pub struct IndexedPoint {
    /// Position as an R-tree point.
    pub position: [f32; 3],
    /// Slot in the original collection.
    pub slot: usize,
}

impl IndexedPoint {
    pub fn new(position: Point3, slot: usize) -> Self {
        Self {
            position: [position.x, position.y, position.z],
            slot,
        }
    }
}

impl RTreeObject for IndexedPoint {
    type Envelope = AABB<[f32; 3]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.position)
    }
}

impl PointDistance for IndexedPoint {
    fn distance_2(&self, point: &[f32; 3]) -> f32 {
        let dx = self.position[0] - point[0];
        let dy = self.position[1] - point[1];
        let dz = self.position[2] - point[2];
        dx * dx + dy * dy + dz * dz
    }

    fn contains_point(&self, point: &[f32; 3]) -> bool {
        self.position == *point
    }
}

/// Spatial index over sample slots.
///
/// Radius results are returned in slot order, so repeated queries and
/// searches over them are deterministic.
#[derive(Clone)]
pub struct PointSpatialIndex {
    tree: RTree<IndexedPoint>,
    positions: Vec<Point3>,
}

impl PointSpatialIndex {
    /// Build an index over `positions`; slot `i` is `positions[i]`.
    pub fn new(positions: &[Point3]) -> Self {
        let indexed: Vec<IndexedPoint> = positions
            .iter()
            .enumerate()
            .map(|(slot, p)| IndexedPoint::new(*p, slot))
            .collect();

        Self {
            tree: RTree::bulk_load(indexed),
            positions: positions.to_vec(),
        }
    }

    /// Slots within `radius` of `center`, boundary inclusive.
    ///
    /// A negative or NaN radius matches nothing.
    pub fn query_radius(&self, center: Point3, radius: f32) -> Vec<usize> {
        if radius.is_nan() || radius < 0.0 {
            return Vec::new();
        }

        let mut slots: Vec<usize> = self
            .tree
            .locate_within_distance([center.x, center.y, center.z], radius * radius)
            .map(|p| p.slot)
            .collect();
        slots.sort_unstable();
        slots
    }

    /// Nearest slot to `point`, and its distance.
    pub fn nearest(&self, point: Point3) -> Option<(usize, f32)> {
        let p = [point.x, point.y, point.z];
        self.tree
            .nearest_neighbor(&p)
            .map(|indexed| (indexed.slot, indexed.distance_2(&p).sqrt()))
    }

    /// Nearest slot to `point` other than `exclude`, and its distance.
    pub fn nearest_other(&self, point: Point3, exclude: usize) -> Option<(usize, f32)> {
        let p = [point.x, point.y, point.z];
        self.tree
            .nearest_neighbor_iter(&p)
            .find(|indexed| indexed.slot != exclude)
            .map(|indexed| (indexed.slot, indexed.distance_2(&p).sqrt()))
    }

    /// Positions by slot.
    #[inline]
    pub fn positions(&self) -> &[Point3] {
        &self.positions
    }

    /// Number of indexed samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

impl std::fmt::Debug for PointSpatialIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PointSpatialIndex")
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn line_positions(n: usize, step: f32) -> Vec<Point3> {
        (0..n).map(|i| Point3::new(i as f32 * step, 0.0, 0.0)).collect()
    }

    #[test]
    fn test_new() {
        let index = PointSpatialIndex::new(&line_positions(10, 1.0));
        assert_eq!(index.len(), 10);
        assert!(!index.is_empty());
        assert!(PointSpatialIndex::new(&[]).is_empty());
    }

    #[test]
    fn test_query_radius_is_exact() {
        let index = PointSpatialIndex::new(&line_positions(10, 1.0));

        let result = index.query_radius(Point3::new(4.0, 0.0, 0.0), 1.5);
        assert_eq!(result, vec![3, 4, 5]);

        // Inclusive boundary
        let result = index.query_radius(Point3::new(4.0, 0.0, 0.0), 1.0);
        assert_eq!(result, vec![3, 4, 5]);

        assert!(index.query_radius(Point3::ZERO, -1.0).is_empty());
        assert!(index.query_radius(Point3::ZERO, f32::NAN).is_empty());
    }

    #[test]
    fn test_query_negative_coordinates() {
        let positions = vec![
            Point3::new(-0.5, -0.5, -0.5),
            Point3::new(0.5, 0.5, 0.5),
            Point3::new(-3.0, 0.0, 0.0),
        ];
        let index = PointSpatialIndex::new(&positions);
        assert_eq!(index.query_radius(Point3::ZERO, 1.0), vec![0, 1]);
    }

    #[test]
    fn test_query_deterministic() {
        let index = PointSpatialIndex::new(&line_positions(50, 0.3));
        let a = index.query_radius(Point3::new(7.0, 0.0, 0.0), 2.0);
        let b = index.query_radius(Point3::new(7.0, 0.0, 0.0), 2.0);
        assert_eq!(a, b);
        assert!(a.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_nearest_other() {
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(5.0, 0.0, 0.0),
            Point3::new(0.0, 0.7, 0.0),
        ];
        let index = PointSpatialIndex::new(&positions);

        let (slot, dist) = index.nearest_other(positions[0], 0).unwrap();
        assert_eq!(slot, 2);
        assert!((dist - 0.7).abs() < 1e-6);

        let (slot, dist) = index.nearest_other(positions[1], 1).unwrap();
        assert_eq!(slot, 0);
        assert!((dist - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_nearest_other_single_point() {
        let index = PointSpatialIndex::new(&[Point3::ZERO]);
        assert!(index.nearest_other(Point3::ZERO, 0).is_none());
        assert_eq!(index.nearest(Point3::ZERO), Some((0, 0.0)));
    }

    #[test]
    fn test_nearest_far_from_cloud() {
        let index = PointSpatialIndex::new(&line_positions(2, 1.0));

        let started = Instant::now();
        let (slot, dist) = index.nearest(Point3::new(3000.0, 0.0, 0.0)).unwrap();
        assert_eq!(slot, 1);
        assert!((dist - 2999.0).abs() < 1e-2);
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_huge_coordinates() {
        let index = PointSpatialIndex::new(&line_positions(2, 1.0));

        let (_, dist) = index.nearest(Point3::new(1e12, 0.0, 0.0)).unwrap();
        assert!(dist > 9.9e11);

        let (slot, _) = index.nearest_other(Point3::new(-1e12, 0.0, 0.0), 0).unwrap();
        assert_eq!(slot, 1);

        assert!(index.query_radius(Point3::new(1e12, 1e12, 1e12), 10.0).is_empty());
    }
}
