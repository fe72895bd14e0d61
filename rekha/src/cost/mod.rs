//! Edge cost model for the segment search.
//!
//! A [`CostModel`] is a small set of [`CostTerm`]s whose values are summed.
//! The default model uses only the colour term:
//!
//! ```text
//! local  = |c1 - c2|
//! global = |c1 - start| + |c1 - end| + |c2 - start| + |c2 - end|
//! cost   = (local + 0.25 * global) / 3.5
//! ```
//!
//! Start and end colours belong to one search call and travel in a
//! [`CostContext`]; the model itself holds no per-search state.
//!
//! ```rust
//! use rekha::cost::{CostContext, CostModel, CostTerm};
//! use rekha::core::{CloudPoint, Point3, PointId, Rgb};
//!
//! let model = CostModel::default();
//! assert_eq!(model.terms(), &[CostTerm::Rgb]);
//!
//! let a = CloudPoint::new(PointId::new(0, 0), Point3::ZERO, Rgb::grey(20));
//! let b = CloudPoint::new(PointId::new(0, 1), Point3::new(1.0, 0.0, 0.0), Rgb::grey(20));
//! let ctx = CostContext::new(&a, &b, 1.0);
//! assert_eq!(model.edge_cost(&ctx, &a, &b, &[]), 0.0);
//! ```

mod terms;

pub use terms::{CostTerm, DISTANCE_COST, MAX_TERM_COST};

use crate::core::{CloudPoint, Rgb};

/// Per-search inputs to the cost terms.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CostContext {
    /// Colour of the segment's start waypoint
    pub start_color: Rgb,
    /// Colour of the segment's end waypoint
    pub end_color: Rgb,
    /// Neighbour query radius
    pub radius: f32,
    /// Scalar attribute range of the cloud, if any
    pub scalar_range: Option<(f32, f32)>,
}

impl CostContext {
    /// Context for the segment `start -> end`.
    pub fn new(start: &CloudPoint, end: &CloudPoint, radius: f32) -> Self {
        Self {
            start_color: start.color,
            end_color: end.color,
            radius,
            scalar_range: None,
        }
    }

    /// Attach the cloud's scalar range.
    pub fn with_scalar_range(mut self, range: Option<(f32, f32)>) -> Self {
        self.scalar_range = range;
        self
    }
}

/// Sum of enabled cost terms.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CostModel {
    terms: Vec<CostTerm>,
}

impl CostModel {
    /// Model over the given terms (duplicates collapse, order normalized).
    ///
    /// An empty set is allowed and yields a flat cost of 1 per edge, i.e.
    /// the search degrades to fewest hops.
    pub fn new(terms: impl IntoIterator<Item = CostTerm>) -> Self {
        let mut terms: Vec<CostTerm> = terms.into_iter().collect();
        terms.sort_unstable();
        terms.dedup();
        Self { terms }
    }

    /// Enabled terms.
    pub fn terms(&self) -> &[CostTerm] {
        &self.terms
    }

    /// Whether any enabled term reads the neighbourhood.
    pub fn needs_neighbourhood(&self) -> bool {
        self.terms.iter().any(CostTerm::needs_neighbourhood)
    }

    /// Comma-separated term names, e.g. `"rgb,gradient"`.
    pub fn describe(&self) -> String {
        self.terms
            .iter()
            .map(CostTerm::name)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Cost of moving from `from` to `to`. Never negative.
    ///
    /// `neighbourhood` is the radius query result around `from`.
    pub fn edge_cost(
        &self,
        ctx: &CostContext,
        from: &CloudPoint,
        to: &CloudPoint,
        neighbourhood: &[CloudPoint],
    ) -> f32 {
        if self.terms.is_empty() {
            return 1.0;
        }

        let cost: f32 = self
            .terms
            .iter()
            .map(|t| t.evaluate(ctx, from, to, neighbourhood))
            .sum();
        cost.max(0.0)
    }
}

impl Default for CostModel {
    fn default() -> Self {
        Self::new([CostTerm::Rgb])
    }
}
