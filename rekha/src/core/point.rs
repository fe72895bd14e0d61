//! Point and colour types for cloud samples.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Sub};

/// Stable identity of a sample: partition (octree node, tile, chunk) plus the
/// index of the sample inside that partition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct PointId {
    /// Partition the sample belongs to
    pub partition: u32,
    /// Index within the partition
    pub index: u32,
}

impl PointId {
    /// Create a new point identity
    #[inline]
    pub fn new(partition: u32, index: u32) -> Self {
        Self { partition, index }
    }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.partition, self.index)
    }
}

/// Position in cloud coordinates (f32)
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3 {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
    /// Z coordinate
    pub z: f32,
}

impl Point3 {
    /// Create a new position
    #[inline]
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Origin
    pub const ZERO: Point3 = Point3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Euclidean distance to another point
    #[inline]
    pub fn distance(&self, other: &Point3) -> f32 {
        self.distance_squared(other).sqrt()
    }

    /// Squared distance (avoids sqrt)
    #[inline]
    pub fn distance_squared(&self, other: &Point3) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }

    /// Dot product (as vectors)
    #[inline]
    pub fn dot(&self, other: &Point3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Length as a vector from the origin
    #[inline]
    pub fn length(&self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Midpoint between this point and another
    #[inline]
    pub fn midpoint(&self, other: &Point3) -> Point3 {
        (*self + *other) * 0.5
    }
}

impl Add for Point3 {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Point3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for Point3 {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Point3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Mul<f32> for Point3 {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: f32) -> Self {
        Point3::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

/// 8-bit RGB colour
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Maximum intensity (255 + 255 + 255)
    pub const MAX_INTENSITY: f32 = 765.0;

    #[inline]
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Grey level
    #[inline]
    pub fn grey(v: u8) -> Self {
        Self::new(v, v, v)
    }

    /// Euclidean distance in RGB space
    #[inline]
    pub fn distance(&self, other: &Rgb) -> f32 {
        let dr = self.r as f32 - other.r as f32;
        let dg = self.g as f32 - other.g as f32;
        let db = self.b as f32 - other.b as f32;
        (dr * dr + dg * dg + db * db).sqrt()
    }

    /// Taxi-cab intensity r + g + b, in [0, 765]
    #[inline]
    pub fn intensity(&self) -> f32 {
        self.r as f32 + self.g as f32 + self.b as f32
    }
}

/// A sample read from the point store. Never mutated by the tracer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CloudPoint {
    /// Stable identity
    pub id: PointId,
    /// Position
    pub position: Point3,
    /// Colour
    pub color: Rgb,
    /// Optional scalar attribute (intensity, classification, ...)
    pub scalar: Option<f32>,
}

impl CloudPoint {
    /// Create a point without a scalar attribute
    pub fn new(id: PointId, position: Point3, color: Rgb) -> Self {
        Self {
            id,
            position,
            color,
            scalar: None,
        }
    }

    /// Attach a scalar attribute
    pub fn with_scalar(mut self, value: f32) -> Self {
        self.scalar = Some(value);
        self
    }

    /// Same identity as another point
    #[inline]
    pub fn same_as(&self, other: &CloudPoint) -> bool {
        self.id == other.id
    }
}
