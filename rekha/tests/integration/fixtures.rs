//! Synthetic outcrop clouds.

#![allow(dead_code)]

use rekha::core::{CloudPoint, Point3, Rgb};
use rekha::{CloudBuilder, InMemoryCloud, PointRecord};

/// Grid spacing of the synthetic outcrop.
pub const SPACING: f32 = 0.5;

/// Outcrop extent along X and Y.
pub const EXTENT: f32 = 20.0;

pub const ROCK: Rgb = Rgb { r: 200, g: 190, b: 170 };
pub const FRACTURE: Rgb = Rgb { r: 35, g: 30, b: 30 };

/// Centre line of the diagonal fracture.
pub fn fracture_y(x: f32) -> f32 {
    5.0 + 0.5 * x
}

/// Planar outcrop with one dark diagonal fracture, split into two
/// partitions at x = 10.
pub fn fracture_outcrop() -> InMemoryCloud {
    outcrop(|x, y| (y - fracture_y(x)).abs() <= 0.3)
}

/// Planar outcrop with two dark horizontal fractures at y = 4 and y = 16.
pub fn twin_fractures() -> InMemoryCloud {
    outcrop(|_, y| y == 4.0 || y == 16.0)
}

fn outcrop(dark: impl Fn(f32, f32) -> bool) -> InMemoryCloud {
    let steps = (EXTENT / SPACING) as usize;
    let mut left = Vec::new();
    let mut right = Vec::new();

    for i in 0..=steps {
        for j in 0..=steps {
            let x = i as f32 * SPACING;
            let y = j as f32 * SPACING;
            let color = if dark(x, y) { FRACTURE } else { ROCK };
            let record = PointRecord::new(Point3::new(x, y, 0.0), color);
            if x < EXTENT / 2.0 {
                left.push(record);
            } else {
                right.push(record);
            }
        }
    }

    let mut builder = CloudBuilder::new();
    builder.add_partition(left);
    builder.add_partition(right);
    builder.build()
}

/// Two separate patches with a gap far wider than any search radius.
pub fn split_patches() -> InMemoryCloud {
    let mut records = Vec::new();
    for offset in [0.0, 30.0] {
        for i in 0..10 {
            for j in 0..10 {
                records.push(PointRecord::new(
                    Point3::new(offset + i as f32 * SPACING, j as f32 * SPACING, 0.0),
                    ROCK,
                ));
            }
        }
    }
    InMemoryCloud::from_records(records)
}

/// Cloud point at the given grid position.
pub fn at(cloud: &InMemoryCloud, x: f32, y: f32) -> CloudPoint {
    cloud
        .nearest(Point3::new(x, y, 0.0))
        .expect("cloud is not empty")
}

/// Fracture point at `x`.
pub fn on_fracture(cloud: &InMemoryCloud, x: f32) -> CloudPoint {
    at(cloud, x, fracture_y(x))
}
