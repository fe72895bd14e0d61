//! Core types for the rekha tracing library.
//!
//! - [`PointId`]: stable identity of a cloud sample (partition + index)
//! - [`Point3`] and [`Rgb`]: position and colour
//! - [`CloudPoint`]: an immutable sample as returned by the point store
//! - [`math`]: containment test and neighbourhood statistics

mod point;

pub mod math;

pub use point::{CloudPoint, Point3, PointId, Rgb};
