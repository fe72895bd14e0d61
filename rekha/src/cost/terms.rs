//! Individual cost terms.
//!
//! Every term returns a non-negative value on roughly the same scale (0–765
//! for the intensity-based terms, 0–255ish for the colour term) so that terms
//! can be mixed by summation.

use serde::{Deserialize, Serialize};

use super::CostContext;
use crate::core::math::surface_variation;
use crate::core::{CloudPoint, Point3, Rgb};

/// Upper end of the intensity scale shared by the mixable terms.
pub const MAX_TERM_COST: f32 = Rgb::MAX_INTENSITY;

/// Flat per-edge cost of the distance term.
pub const DISTANCE_COST: f32 = 255.0;

/// Curvature above this value is treated as maximal.
const CURVATURE_CLAMP: f32 = 1.0 / 3.0;

/// Squared offsets below this are ignored by the gradient estimate.
const GRADIENT_MIN_NORM2: f32 = 1e-12;

/// Available cost terms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostTerm {
    /// Local and global colour similarity (default)
    Rgb,
    /// Prefer dark points
    Dark,
    /// Prefer light points
    Light,
    /// Prefer high-curvature neighbourhoods (ridges, grooves)
    Curvature,
    /// Prefer strong intensity gradients (edges)
    Gradient,
    /// Prefer low scalar values
    Scalar,
    /// Prefer high scalar values
    InverseScalar,
    /// Flat cost per edge
    Distance,
}

impl CostTerm {
    /// Short name, as written in configuration.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Rgb => "rgb",
            Self::Dark => "dark",
            Self::Light => "light",
            Self::Curvature => "curvature",
            Self::Gradient => "gradient",
            Self::Scalar => "scalar",
            Self::InverseScalar => "inverse_scalar",
            Self::Distance => "distance",
        }
    }

    /// Whether the term reads the neighbourhood of the expanded point.
    pub fn needs_neighbourhood(&self) -> bool {
        matches!(self, Self::Curvature | Self::Gradient)
    }

    /// Evaluate this term for the edge `from -> to`.
    pub fn evaluate(
        &self,
        ctx: &CostContext,
        from: &CloudPoint,
        to: &CloudPoint,
        neighbourhood: &[CloudPoint],
    ) -> f32 {
        match self {
            Self::Rgb => rgb_cost(ctx, from, to),
            Self::Dark => to.color.intensity(),
            Self::Light => MAX_TERM_COST - to.color.intensity(),
            Self::Curvature => curvature_cost(from, neighbourhood),
            Self::Gradient => gradient_cost(ctx, to, neighbourhood),
            Self::Scalar => scalar_cost(ctx, to, false),
            Self::InverseScalar => scalar_cost(ctx, to, true),
            Self::Distance => DISTANCE_COST,
        }
    }
}

/// `(|c1-c2| + 0.25 (|c1-s| + |c1-e| + |c2-s| + |c2-e|)) / 3.5`
///
/// The divisor brings the cost back into the 0–255 range of one channel.
fn rgb_cost(ctx: &CostContext, from: &CloudPoint, to: &CloudPoint) -> f32 {
    let local = from.color.distance(&to.color);
    // Summed per endpoint so the result is bitwise symmetric in (from, to).
    let from_global = from.color.distance(&ctx.start_color) + from.color.distance(&ctx.end_color);
    let to_global = to.color.distance(&ctx.start_color) + to.color.distance(&ctx.end_color);
    (local + 0.25 * (from_global + to_global)) / 3.5
}

/// Inverted surface variation of the neighbourhood around `from`.
///
/// Needs at least four neighbours; flat or unknown neighbourhoods are maximal
/// cost.
fn curvature_cost(from: &CloudPoint, neighbourhood: &[CloudPoint]) -> f32 {
    if neighbourhood.len() < 4 {
        return MAX_TERM_COST;
    }

    let mut positions: Vec<Point3> = neighbourhood.iter().map(|p| p.position).collect();
    if !neighbourhood.iter().any(|p| p.same_as(from)) {
        positions.push(from.position);
    }

    match surface_variation(&positions) {
        Some(v) => {
            let scaled = (v.min(CURVATURE_CLAMP) / CURVATURE_CLAMP) * MAX_TERM_COST;
            MAX_TERM_COST - scaled
        }
        None => MAX_TERM_COST,
    }
}

/// Inverted distance-weighted intensity gradient at `to`.
fn gradient_cost(ctx: &CostContext, to: &CloudPoint, neighbourhood: &[CloudPoint]) -> f32 {
    if neighbourhood.len() < 3 || ctx.radius <= 0.0 {
        return MAX_TERM_COST;
    }

    let value = to.color.intensity();
    let mut sum = Point3::ZERO;
    for n in neighbourhood {
        let delta = n.position - to.position;
        let norm2 = delta.dot(&delta);
        if norm2 > GRADIENT_MIN_NORM2 {
            // Divide once for direction, once for the gradient itself.
            let weighted = (value - n.color.intensity()) / norm2;
            sum = sum + delta * weighted;
        }
    }

    let gradient = (sum.length() / neighbourhood.len() as f32).min(MAX_TERM_COST / ctx.radius);
    MAX_TERM_COST - gradient * ctx.radius
}

/// Scalar value mapped onto 0–765 over the cloud's scalar range.
fn scalar_cost(ctx: &CostContext, to: &CloudPoint, inverse: bool) -> f32 {
    let (Some((lo, hi)), Some(v)) = (ctx.scalar_range, to.scalar) else {
        return 0.0;
    };
    if hi <= lo {
        return 0.0;
    }

    let t = ((v - lo) / (hi - lo)).clamp(0.0, 1.0);
    if inverse {
        (1.0 - t) * MAX_TERM_COST
    } else {
        t * MAX_TERM_COST
    }
}
