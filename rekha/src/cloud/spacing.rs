//! Average point spacing estimation.

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::PointSpatialIndex;

/// Estimate the average nearest-neighbour distance of an indexed cloud.
///
/// Picks `samples` slots at random (seeded with the point count, so the same
/// cloud always yields the same estimate) and averages the distance from each
/// to its nearest other sample. Returns 0.0 for clouds with fewer than two
/// points.
pub fn estimate_average_spacing(index: &PointSpatialIndex, samples: usize) -> f32 {
    let n = index.len();
    if n < 2 || samples == 0 {
        return 0.0;
    }

    let mut rng = StdRng::seed_from_u64(n as u64);
    let positions = index.positions();

    let mut sum = 0.0f64;
    let mut found = 0usize;
    for _ in 0..samples {
        let slot = rng.random_range(0..n);
        if let Some((_, d)) = index.nearest_other(positions[slot], slot) {
            sum += d as f64;
            found += 1;
        }
    }

    if found == 0 {
        return 0.0;
    }

    let spacing = (sum / found as f64) as f32;
    debug!(
        "[Spacing] {} samples over {} points: average spacing {:.4}",
        found, n, spacing
    );
    spacing
}
