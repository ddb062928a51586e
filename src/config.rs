use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ConfigError;
use crate::factors::EmissionFactorTable;

/// Constants driving the estimator.
///
/// The EV efficiency and tree absorption figures are rough approximations,
/// kept here so deployments can override them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    pub emission_factors: EmissionFactorTable,
    /// Average EV energy use, kWh per mile.
    pub ev_kwh_per_mile: f64,
    /// CO2 absorbed by one tree in a year, kg.
    pub tree_absorption_kg_per_year: f64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        EstimatorConfig {
            emission_factors: EmissionFactorTable::default(),
            ev_kwh_per_mile: 0.3,
            tree_absorption_kg_per_year: 21.77,
        }
    }
}

impl EstimatorConfig {
    /// Parse and validate a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: EstimatorConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&raw)?;
        debug!(path = %path.display(), "loaded estimator config");
        Ok(config)
    }

    /// Factors must be finite and >= 0, the tree constant finite and > 0.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (fuel, factor) in self.emission_factors.entries() {
            if !factor.is_finite() || factor < 0.0 {
                return Err(invalid(format!(
                    "emission factor for {fuel} must be finite and >= 0, got {factor}"
                )));
            }
        }
        check_constants(self.ev_kwh_per_mile, self.tree_absorption_kg_per_year)
    }
}

/// Range rules shared by config validation and `Estimator::with_model`.
pub(crate) fn check_constants(
    ev_kwh_per_mile: f64,
    tree_absorption_kg_per_year: f64,
) -> Result<(), ConfigError> {
    if !ev_kwh_per_mile.is_finite() || ev_kwh_per_mile < 0.0 {
        return Err(invalid(format!(
            "ev_kwh_per_mile must be finite and >= 0, got {ev_kwh_per_mile}"
        )));
    }
    if !tree_absorption_kg_per_year.is_finite() || tree_absorption_kg_per_year <= 0.0 {
        return Err(invalid(format!(
            "tree_absorption_kg_per_year must be finite and > 0, got {tree_absorption_kg_per_year}"
        )));
    }
    Ok(())
}

fn invalid(msg: String) -> ConfigError {
    warn!(%msg, "rejected estimator config");
    ConfigError::Invalid(msg)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let cfg = EstimatorConfig::default();
        assert_eq!(cfg.ev_kwh_per_mile, 0.3);
        assert_eq!(cfg.tree_absorption_kg_per_year, 21.77);
        assert_eq!(cfg.emission_factors.gasoline, 8.89);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_empty_document_is_default() {
        let cfg = EstimatorConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, EstimatorConfig::default());
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let cfg = EstimatorConfig::from_toml_str(
            r#"
            tree_absorption_kg_per_year = 25.0

            [emission_factors]
            electric = 0.4
            "#,
        )
        .unwrap();
        assert_eq!(cfg.tree_absorption_kg_per_year, 25.0);
        assert_eq!(cfg.ev_kwh_per_mile, 0.3);
        assert_eq!(cfg.emission_factors.electric, 0.4);
        assert_eq!(cfg.emission_factors.diesel, 10.16);
    }

    #[test]
    fn test_rejects_non_positive_tree_absorption() {
        let err = EstimatorConfig::from_toml_str("tree_absorption_kg_per_year = 0.0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_negative_factor() {
        let err = EstimatorConfig::from_toml_str("[emission_factors]\ndiesel = -1.0").unwrap_err();
        match err {
            ConfigError::Invalid(msg) => assert!(msg.contains("Diesel")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let err = EstimatorConfig::from_toml_str("ev_kwh_per_mile = \"lots\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "ev_kwh_per_mile = 0.25").unwrap();
        let cfg = EstimatorConfig::load(file.path()).unwrap();
        assert_eq!(cfg.ev_kwh_per_mile, 0.25);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = EstimatorConfig::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
