//! Configuration sections.

use serde::{Deserialize, Serialize};

use super::defaults;
use crate::cost::CostTerm;

/// Segment search settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchSection {
    /// Neighbour query radius as a multiple of the average point spacing
    #[serde(default = "defaults::radius_multiplier")]
    pub radius_multiplier: f32,

    /// Maximum points settled per segment
    #[serde(default = "defaults::max_iterations")]
    pub max_iterations: usize,
}

impl Default for SearchSection {
    fn default() -> Self {
        Self {
            radius_multiplier: defaults::radius_multiplier(),
            max_iterations: defaults::max_iterations(),
        }
    }
}

/// Cost model settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CostSection {
    /// Enabled cost terms, summed per edge
    #[serde(default = "defaults::cost_terms")]
    pub terms: Vec<CostTerm>,
}

impl Default for CostSection {
    fn default() -> Self {
        Self {
            terms: defaults::cost_terms(),
        }
    }
}

/// In-memory cloud settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CloudSection {
    /// Points sampled when estimating average spacing
    #[serde(default = "defaults::spacing_samples")]
    pub spacing_samples: usize,
}

impl Default for CloudSection {
    fn default() -> Self {
        Self {
            spacing_samples: defaults::spacing_samples(),
        }
    }
}

/// Tracer slot settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TracersSection {
    /// Number of operator slots
    #[serde(default = "defaults::slots")]
    pub slots: usize,
}

impl Default for TracersSection {
    fn default() -> Self {
        Self {
            slots: defaults::slots(),
        }
    }
}
