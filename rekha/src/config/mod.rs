//! Unified configuration loading for Rekha.
//!
//! Loads all configuration from a single YAML file.

mod defaults;
mod error;
mod rekha;
mod sections;

// Re-export main types
pub use error::ConfigLoadError;
pub use rekha::RekhaConfig;

// Re-export section types
pub use sections::{CloudSection, CostSection, SearchSection, TracersSection};
