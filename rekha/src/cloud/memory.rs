//! Resident point cloud with an R-tree index.

use std::collections::HashMap;

use log::debug;

use super::{PointSpatialIndex, PointStore, estimate_average_spacing};
use crate::core::{CloudPoint, Point3, PointId, Rgb};

/// In-memory cloud settings
#[derive(Clone, Debug)]
pub struct CloudConfig {
    /// Points sampled for the average spacing estimate
    pub spacing_samples: usize,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            spacing_samples: 30,
        }
    }
}

/// A raw sample before it is assigned an identity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointRecord {
    pub position: Point3,
    pub color: Rgb,
    pub scalar: Option<f32>,
}

impl PointRecord {
    pub fn new(position: Point3, color: Rgb) -> Self {
        Self {
            position,
            color,
            scalar: None,
        }
    }

    pub fn with_scalar(mut self, value: f32) -> Self {
        self.scalar = Some(value);
        self
    }
}

/// Builder assigning `PointId { partition, index }` to partitioned records.
///
/// # Example
/// ```
/// use rekha::cloud::{CloudBuilder, PointRecord, PointStore};
/// use rekha::core::{Point3, Rgb};
///
/// let mut builder = CloudBuilder::new();
/// let partition = builder.add_partition(
///     (0..10).map(|i| PointRecord::new(Point3::new(i as f32, 0.0, 0.0), Rgb::grey(128))),
/// );
/// let cloud = builder.build();
/// assert_eq!(partition, 0);
/// assert_eq!(cloud.len(), 10);
/// assert!((cloud.average_spacing() - 1.0).abs() < 1e-6);
/// ```
#[derive(Debug, Default)]
pub struct CloudBuilder {
    config: CloudConfig,
    points: Vec<CloudPoint>,
    partitions: u32,
    spacing: Option<f32>,
}

impl CloudBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CloudConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Use a known spacing (e.g. from a cloud header) instead of estimating it.
    pub fn spacing(mut self, spacing: f32) -> Self {
        self.spacing = Some(spacing);
        self
    }

    /// Add a partition; returns its number.
    pub fn add_partition(&mut self, records: impl IntoIterator<Item = PointRecord>) -> u32 {
        let partition = self.partitions;
        self.partitions += 1;

        for (index, record) in records.into_iter().enumerate() {
            self.points.push(CloudPoint {
                id: PointId::new(partition, index as u32),
                position: record.position,
                color: record.color,
                scalar: record.scalar,
            });
        }

        partition
    }

    /// Index the points and estimate spacing.
    pub fn build(self) -> InMemoryCloud {
        let positions: Vec<Point3> = self.points.iter().map(|p| p.position).collect();

        let index = PointSpatialIndex::new(&positions);
        let spacing = self
            .spacing
            .unwrap_or_else(|| estimate_average_spacing(&index, self.config.spacing_samples));

        let slots = self
            .points
            .iter()
            .enumerate()
            .map(|(slot, p)| (p.id, slot))
            .collect();

        let scalar_range = self.points.iter().filter_map(|p| p.scalar).fold(None, |acc, v| {
            match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((f32::min(lo, v), f32::max(hi, v))),
            }
        });

        debug!(
            "[InMemoryCloud] {} points in {} partitions, spacing {:.4}",
            self.points.len(),
            self.partitions,
            spacing
        );

        InMemoryCloud {
            points: self.points,
            slots,
            index,
            spacing,
            scalar_range,
        }
    }
}

/// Point cloud held entirely in memory.
#[derive(Clone, Debug)]
pub struct InMemoryCloud {
    points: Vec<CloudPoint>,
    slots: HashMap<PointId, usize>,
    index: PointSpatialIndex,
    spacing: f32,
    scalar_range: Option<(f32, f32)>,
}

impl InMemoryCloud {
    /// Single-partition cloud from records.
    pub fn from_records(records: impl IntoIterator<Item = PointRecord>) -> Self {
        let mut builder = CloudBuilder::new();
        builder.add_partition(records);
        builder.build()
    }

    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// All points, partition by partition.
    #[inline]
    pub fn points(&self) -> &[CloudPoint] {
        &self.points
    }

    /// Point nearest to a position (e.g. a picked ray hit).
    pub fn nearest(&self, position: Point3) -> Option<CloudPoint> {
        self.index
            .nearest(position)
            .map(|(slot, _)| self.points[slot])
    }
}

impl PointStore for InMemoryCloud {
    fn point(&self, id: PointId) -> Option<CloudPoint> {
        self.slots.get(&id).map(|&slot| self.points[slot])
    }

    fn points_within_radius(&self, center: &CloudPoint, radius: f32) -> Vec<CloudPoint> {
        self.index
            .query_radius(center.position, radius)
            .into_iter()
            .map(|slot| self.points[slot])
            .collect()
    }

    fn average_spacing(&self) -> f32 {
        self.spacing
    }

    fn scalar_range(&self) -> Option<(f32, f32)> {
        self.scalar_range
    }
}
