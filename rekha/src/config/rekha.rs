//! Main RekhaConfig and conversion methods.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cloud::CloudConfig;
use crate::cost::CostModel;
use crate::trace::TracerConfig;

use super::error::ConfigLoadError;
use super::sections::{CloudSection, CostSection, SearchSection, TracersSection};

/// Full Rekha configuration loaded from YAML
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct RekhaConfig {
    /// Segment search settings
    #[serde(default)]
    pub search: SearchSection,

    /// Cost model settings
    #[serde(default)]
    pub cost: CostSection,

    /// In-memory cloud settings
    #[serde(default)]
    pub cloud: CloudSection,

    /// Tracer slot settings
    #[serde(default)]
    pub tracers: TracersSection,
}

impl RekhaConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigLoadError::Io(e.to_string()))?;
        Self::from_yaml(&contents)
    }

    /// Load from default config path (configs/rekha.yaml)
    pub fn load_default() -> Result<Self, ConfigLoadError> {
        let path = Path::new("configs/rekha.yaml");
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigLoadError::Parse(e.to_string()))
    }

    /// Convert to CostModel
    pub fn to_cost_model(&self) -> CostModel {
        CostModel::new(self.cost.terms.iter().copied())
    }

    /// Convert to TracerConfig
    pub fn to_tracer_config(&self) -> TracerConfig {
        TracerConfig {
            radius_multiplier: self.search.radius_multiplier,
            max_iterations: self.search.max_iterations,
            cost: self.to_cost_model(),
        }
    }

    /// Convert to CloudConfig for CloudBuilder
    pub fn to_cloud_config(&self) -> CloudConfig {
        CloudConfig {
            spacing_samples: self.cloud.spacing_samples,
        }
    }
}
