//! Default value functions for serde deserialization.

use crate::cost::CostTerm;

pub fn radius_multiplier() -> f32 {
    32.0
}

pub fn max_iterations() -> usize {
    1_000_000
}

pub fn cost_terms() -> Vec<CostTerm> {
    vec![CostTerm::Rgb]
}

pub fn spacing_samples() -> usize {
    30
}

pub fn slots() -> usize {
    crate::trace::DEFAULT_SLOTS
}
