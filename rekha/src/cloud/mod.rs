//! Spatial point store interface and an in-memory implementation.
//!
//! The tracer never holds an adjacency list. Neighbours of a sample are
//! discovered on demand with a radius query against a [`PointStore`], which
//! may be backed by an out-of-core loader. Every call here may block or be
//! expensive; the search only ever touches points a query returned.
//!
//! [`InMemoryCloud`] is a resident store with an R-tree index, useful for
//! small clouds, tools and tests.

mod memory;
mod spacing;
mod spatial_index;

pub use memory::{CloudBuilder, CloudConfig, InMemoryCloud, PointRecord};
pub use spacing::estimate_average_spacing;
pub use spatial_index::{IndexedPoint, PointSpatialIndex};

use crate::core::{CloudPoint, PointId};

/// Read-only access to a point cloud.
///
/// Implementations shared between tracers on several threads must make their
/// read path safe for concurrent readers (`Sync`).
pub trait PointStore {
    /// Look up a point by identity.
    fn point(&self, id: PointId) -> Option<CloudPoint>;

    /// All points within `radius` of `center` (inclusive of `center` itself
    /// when it is stored). Order is unspecified but finite.
    fn points_within_radius(&self, center: &CloudPoint, radius: f32) -> Vec<CloudPoint>;

    /// Average spacing between neighbouring points.
    fn average_spacing(&self) -> f32;

    /// `(min, max)` of the scalar attribute, if the cloud carries one.
    fn scalar_range(&self) -> Option<(f32, f32)> {
        None
    }
}

impl<S: PointStore + ?Sized> PointStore for &S {
    fn point(&self, id: PointId) -> Option<CloudPoint> {
        (**self).point(id)
    }

    fn points_within_radius(&self, center: &CloudPoint, radius: f32) -> Vec<CloudPoint> {
        (**self).points_within_radius(center, radius)
    }

    fn average_spacing(&self) -> f32 {
        (**self).average_spacing()
    }

    fn scalar_range(&self) -> Option<(f32, f32)> {
        (**self).scalar_range()
    }
}
