//! # Adapter Configuration
//!
//! Behaviour switches for a push session. Every field has a default, so an
//! empty JSON object is a valid configuration.
//!
//! ```rust
//! use bridge_core::config::{AdapterConfig, AreaLoadDistribution};
//!
//! let config = AdapterConfig::from_json(r#"{ "replace_loads": false }"#).unwrap();
//! assert!(!config.replace_loads);
//! assert_eq!(config.area_load_distribution, AreaLoadDistribution::TwoWay);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{BridgeError, BridgeResult};

/// How a uniform load on a panel without a shell property reaches the
/// surrounding frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AreaLoadDistribution {
    OneWay,
    #[default]
    TwoWay,
}

impl AreaLoadDistribution {
    /// Distribution code of the external uniform-to-frame call
    pub fn code(&self) -> i32 {
        match self {
            AreaLoadDistribution::OneWay => 1,
            AreaLoadDistribution::TwoWay => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdapterConfig {
    /// Replace existing loads of the same pattern on the first load call per object
    pub replace_loads: bool,

    /// Create a missing group and retry the assignment once
    pub create_missing_groups: bool,

    pub area_load_distribution: AreaLoadDistribution,

    /// Select every case and combination when a result request names none
    pub select_all_cases_by_default: bool,

    /// Section passed to the frame create call, before the real section is assigned
    pub default_frame_section: String,

    /// Property passed to the area create call for panels without one
    pub default_area_property: String,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        AdapterConfig {
            replace_loads: true,
            create_missing_groups: true,
            area_load_distribution: AreaLoadDistribution::TwoWay,
            select_all_cases_by_default: true,
            default_frame_section: "None".to_string(),
            default_area_property: "None".to_string(),
        }
    }
}

impl AdapterConfig {
    pub fn from_json(json: &str) -> BridgeResult<Self> {
        serde_json::from_str(json).map_err(|e| BridgeError::SerializationError {
            reason: format!("Invalid adapter configuration: {}", e),
        })
    }

    /// Builder: set load replacement
    pub fn with_replace_loads(mut self, replace: bool) -> Self {
        self.replace_loads = replace;
        self
    }

    /// Builder: set group creation on failed assignment
    pub fn with_create_missing_groups(mut self, create: bool) -> Self {
        self.create_missing_groups = create;
        self
    }

    pub fn with_area_load_distribution(mut self, distribution: AreaLoadDistribution) -> Self {
        self.area_load_distribution = distribution;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AdapterConfig::default();
        assert!(config.replace_loads);
        assert!(config.create_missing_groups);
        assert!(config.select_all_cases_by_default);
        assert_eq!(config.area_load_distribution.code(), 2);
        assert_eq!(config.default_frame_section, "None");
    }

    #[test]
    fn test_empty_json_is_default() {
        let config = AdapterConfig::from_json("{}").unwrap();
        assert_eq!(config, AdapterConfig::default());
    }

    #[test]
    fn test_partial_json() {
        let config = AdapterConfig::from_json(r#"{ "area_load_distribution": "OneWay" }"#).unwrap();
        assert_eq!(config.area_load_distribution, AreaLoadDistribution::OneWay);
        assert!(config.replace_loads);
    }

    #[test]
    fn test_invalid_json() {
        let err = AdapterConfig::from_json("{ not json").unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }
}
