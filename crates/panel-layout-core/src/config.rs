use crate::geometry::{check_gsd, ScanStrategy};
use crate::types::{LayoutError, PanelFootprint, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Settings shared by every roof of a request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Ground sample distance in meters per pixel
    pub gsd: f64,
    /// Safety margin kept free along the roof edge, in meters
    pub margin_m: f64,
    /// Clearance added to both panel dimensions, in meters
    pub spacing_m: f64,
    /// Rated output of a single panel, used for the capacity figure
    pub panel_rating_kw: f64,
    /// Panel footprints in evaluation order
    pub catalogue: Vec<PanelFootprint>,
    pub scan_strategy: ScanStrategy,
    /// Plan the roofs of a batch on the rayon thread pool
    pub parallel: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            gsd: 0.05,
            margin_m: 0.3,
            spacing_m: 0.02,
            panel_rating_kw: 0.4,
            catalogue: default_catalogue(),
            scan_strategy: ScanStrategy::default(),
            parallel: true,
        }
    }
}

/// Panel models evaluated when no catalogue is configured.
pub fn default_catalogue() -> Vec<PanelFootprint> {
    vec![
        PanelFootprint::new("Sharp_NQ-256AF", 1.318, 0.990),
        PanelFootprint::new("Standard_A", 1.65, 0.99),
        PanelFootprint::new("Standard_B", 1.50, 0.80),
    ]
}

impl LayoutConfig {
    /// Parses a YAML document; missing fields take their defaults.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| LayoutError::Config(e.to_string()))
    }

    /// Parses a JSON document; missing fields take their defaults.
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| LayoutError::Config(e.to_string()))
    }

    /// Rejects parameters the engine cannot work with. Nothing is clamped.
    pub fn validate(&self) -> Result<()> {
        check_gsd(self.gsd)?;

        check_non_negative("Margin", self.margin_m)?;
        check_non_negative("Panel spacing", self.spacing_m)?;
        check_non_negative("Panel rating", self.panel_rating_kw)?;

        if self.catalogue.is_empty() {
            return Err(LayoutError::InvalidParameter(
                "At least one panel footprint must be provided".to_string(),
            ));
        }

        let mut names = HashSet::new();
        for footprint in &self.catalogue {
            if !(footprint.length_m > 0.0 && footprint.width_m > 0.0)
                || !footprint.length_m.is_finite()
                || !footprint.width_m.is_finite()
            {
                return Err(LayoutError::InvalidParameter(format!(
                    "Panel '{}' has non-positive dimensions {}x{}",
                    footprint.name, footprint.length_m, footprint.width_m
                )));
            }
            if !names.insert(footprint.name.as_str()) {
                return Err(LayoutError::InvalidParameter(format!(
                    "Panel '{}' appears more than once in the catalogue",
                    footprint.name
                )));
            }
        }

        Ok(())
    }
}

fn check_non_negative(what: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(LayoutError::InvalidParameter(format!(
            "{} must be non-negative, got {}",
            what, value
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = LayoutConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.catalogue.len(), 3);
        assert_eq!(config.catalogue[0].name, "Sharp_NQ-256AF");
    }

    #[test]
    fn test_yaml_fills_missing_fields() {
        let config = LayoutConfig::from_yaml_str(
            r#"
gsd: 0.1
catalogue:
  - name: standard
    length_m: 1.65
    width_m: 1.0
scan_strategy: naive
"#,
        )
        .unwrap();

        assert_eq!(config.gsd, 0.1);
        assert_eq!(config.margin_m, 0.3);
        assert_eq!(config.scan_strategy, ScanStrategy::Naive);
        assert_eq!(config.catalogue, vec![PanelFootprint::new("standard", 1.65, 1.0)]);
        assert!(config.parallel);
    }

    #[test]
    fn test_json_keeps_catalogue_order() {
        let config = LayoutConfig::from_json_str(
            r#"{
                "margin_m": 0.0,
                "catalogue": [
                    {"name": "b", "length_m": 1.0, "width_m": 1.0},
                    {"name": "a", "length_m": 2.0, "width_m": 1.0}
                ]
            }"#,
        )
        .unwrap();

        let names: Vec<_> = config.catalogue.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
        assert_eq!(config.margin_m, 0.0);
    }

    #[test]
    fn test_malformed_config_is_reported() {
        assert!(matches!(
            LayoutConfig::from_json_str("{\"gsd\": \"fast\"}"),
            Err(LayoutError::Config(_))
        ));
    }

    #[test]
    fn test_validate_rejects_bad_parameters() {
        let bad = [
            LayoutConfig {
                gsd: 0.0,
                ..LayoutConfig::default()
            },
            LayoutConfig {
                margin_m: -0.1,
                ..LayoutConfig::default()
            },
            LayoutConfig {
                spacing_m: f64::NAN,
                ..LayoutConfig::default()
            },
            LayoutConfig {
                catalogue: Vec::new(),
                ..LayoutConfig::default()
            },
            LayoutConfig {
                catalogue: vec![PanelFootprint::new("zero", 0.0, 1.0)],
                ..LayoutConfig::default()
            },
            LayoutConfig {
                catalogue: vec![
                    PanelFootprint::new("twin", 1.0, 1.0),
                    PanelFootprint::new("twin", 2.0, 1.0),
                ],
                ..LayoutConfig::default()
            },
        ];

        for config in bad {
            assert!(
                matches!(config.validate(), Err(LayoutError::InvalidParameter(_))),
                "{:?} should be rejected",
                config
            );
        }
    }
}
