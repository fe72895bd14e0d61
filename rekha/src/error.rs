//! Error types for rekha

use crate::core::PointId;

/// Result type alias
pub type Result<T> = std::result::Result<T, TraceError>;

/// Tracing failures.
///
/// None of these are fatal: a failed segment is stored empty and the rest of
/// the trace stays valid.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TraceError {
    /// The point store handle is gone
    #[error("Point store is not available")]
    NoCloud,

    /// Search gave up after settling `limit` points
    #[error("Search exceeded {limit} iterations")]
    IterationLimitExceeded {
        /// Configured iteration limit
        limit: usize,
    },

    /// Open set exhausted before the target was settled
    #[error(
        "Target unreachable within radius {radius:.3} after {iterations} iterations \
         (radius too small or colour discontinuity too large)"
    )]
    Unreachable {
        /// Points settled before the frontier ran dry
        iterations: usize,
        /// Neighbour query radius in use
        radius: f32,
    },

    /// Fewer than two waypoints
    #[error("Trace needs at least 2 waypoints, have {waypoints}")]
    DegenerateTrace {
        /// Current waypoint count
        waypoints: usize,
    },

    /// Point identity not known to the store
    #[error("Unknown point {0}")]
    UnknownPoint(PointId),

    /// Tracer slot outside `1..=slots`
    #[error("Invalid tracer slot {slot} (valid: 1..={slots})")]
    InvalidSlot {
        /// Requested slot
        slot: usize,
        /// Number of configured slots
        slots: usize,
    },
}

impl TraceError {
    /// Get a short error code for logging.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NoCloud => "NO_CLOUD",
            Self::IterationLimitExceeded { .. } => "ITERATION_LIMIT",
            Self::Unreachable { .. } => "UNREACHABLE",
            Self::DegenerateTrace { .. } => "DEGENERATE_TRACE",
            Self::UnknownPoint(_) => "UNKNOWN_POINT",
            Self::InvalidSlot { .. } => "INVALID_SLOT",
        }
    }

    /// Whether an operator should be told about this failure.
    ///
    /// Iteration limits and short traces are routine; an unreachable target
    /// or a missing cloud points at bad input or a bad radius.
    pub fn is_anomalous(&self) -> bool {
        matches!(self, Self::Unreachable { .. } | Self::NoCloud)
    }
}
