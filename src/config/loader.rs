//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading simulation
//! defaults from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{PlanTier, SimulationParameters};

use super::types::{
    DeductionConfig, LoanConfig, PlansConfig, SimulationConfig, SimulationMetadata,
};

/// Loads and provides access to simulation defaults.
///
/// The `ConfigLoader` reads YAML configuration files from a directory
/// and provides the default parameters a fresh proposal starts from.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/standard/
/// ├── simulation.yaml   # Configuration metadata
/// ├── loan.yaml         # Interest rate, term and fee rates
/// ├── deduction.yaml    # Mortgage deduction rate, period and cap
/// └── plans.yaml        # Land price, owner cash and plan tiers
/// ```
///
/// # Example
///
/// ```no_run
/// use home_plan_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/standard").unwrap();
///
/// let tier = loader.get_tier("standard").unwrap();
/// println!("Standard building price: {} 万円", tier.building_price);
///
/// let params = loader.defaults();
/// println!("Default rate: {}%", params.loan.interest_rate_percent);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: SimulationConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/standard")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - The reference tier is not among the configured tiers
    /// - The configured defaults fall outside the accepted ranges
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<SimulationMetadata>(&path.join("simulation.yaml"))?;
        let loan = Self::load_yaml::<LoanConfig>(&path.join("loan.yaml"))?;
        let deduction = Self::load_yaml::<DeductionConfig>(&path.join("deduction.yaml"))?;
        let plans = Self::load_yaml::<PlansConfig>(&path.join("plans.yaml"))?;

        let config = SimulationConfig::new(metadata, loan, deduction, plans);
        config.defaults().validate()?;

        debug!(
            code = %config.metadata().code,
            version = %config.metadata().version,
            tiers = config.tiers().len(),
            "Simulation configuration loaded"
        );

        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying simulation configuration.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Returns the configuration metadata.
    pub fn metadata(&self) -> &SimulationMetadata {
        self.config.metadata()
    }

    /// Returns the default proposal parameters.
    pub fn defaults(&self) -> SimulationParameters {
        self.config.defaults()
    }

    /// Gets a configured tier by its id.
    ///
    /// # Returns
    ///
    /// Returns the tier if found, or `PlanNotFound` error.
    pub fn get_tier(&self, id: &str) -> EngineResult<&PlanTier> {
        self.config
            .tiers()
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| EngineError::PlanNotFound {
                tier_id: id.to_string(),
            })
    }

    /// Returns the configured reference tier.
    pub fn reference_tier(&self) -> EngineResult<&PlanTier> {
        self.get_tier(self.config.reference_tier())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn config_path() -> &'static str {
        "./config/standard"
    }

    /// Copies the standard configuration into a scratch directory so a test
    /// can replace one file.
    fn scratch_config(test_name: &str, file: &str, content: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "home-plan-engine-{}-{}",
            test_name,
            std::process::id()
        ));
        fs::create_dir_all(&dir).unwrap();
        for name in ["simulation.yaml", "loan.yaml", "deduction.yaml", "plans.yaml"] {
            fs::copy(Path::new(config_path()).join(name), dir.join(name)).unwrap();
        }
        fs::write(dir.join(file), content).unwrap();
        dir
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.metadata().code, "standard");
        assert_eq!(loader.metadata().version, "2026-04-01");
    }

    #[test]
    fn test_defaults_match_sales_form() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let params = loader.defaults();

        assert_eq!(params.customer.household_income, 600.0);
        assert_eq!(params.land_price, 1500.0);
        assert_eq!(params.owner_cash, 200.0);
        assert_eq!(params.loan.interest_rate_percent, 1.5);
        assert_eq!(params.loan.term_years, 35);
        assert_eq!(params.fees.fee_rate_percent, 7.0);
        assert_eq!(params.fees.variable_fee_rate, 0.03);
        assert_eq!(params.deduction.rate_percent, 0.7);
        assert_eq!(params.deduction.years, 13);
        assert_eq!(params.deduction.cap, 4500.0);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_tiers_loaded_in_order() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let ids: Vec<&str> = loader
            .config()
            .tiers()
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(ids, vec!["budget", "standard", "premium"]);
    }

    #[test]
    fn test_get_tier() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let tier = loader.get_tier("premium").unwrap();
        assert_eq!(tier.building_price, 3000.0);
        assert_eq!(loader.reference_tier().unwrap().id, "standard");
    }

    #[test]
    fn test_get_tier_unknown_returns_error() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        match loader.get_tier("deluxe") {
            Err(EngineError::PlanNotFound { tier_id }) => assert_eq!(tier_id, "deluxe"),
            _ => panic!("Expected PlanNotFound error"),
        }
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("simulation.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_invalid_yaml_returns_parse_error() {
        let dir = scratch_config("bad-yaml", "loan.yaml", "loan: [unterminated");

        match ConfigLoader::load(&dir) {
            Err(EngineError::ConfigParseError { path, .. }) => {
                assert!(path.contains("loan.yaml"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_unknown_reference_tier_rejected() {
        let dir = scratch_config(
            "bad-reference",
            "plans.yaml",
            r#"
customer:
  name: ""
  household_income: 600
land_price: 1500
owner_cash: 200
reference_tier: deluxe
tiers:
  - id: standard
    name: Standard Plan
    building_price: 2500
"#,
        );

        match ConfigLoader::load(&dir) {
            Err(EngineError::PlanNotFound { tier_id }) => assert_eq!(tier_id, "deluxe"),
            other => panic!("Expected PlanNotFound, got {:?}", other),
        }
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_out_of_range_default_rejected() {
        let dir = scratch_config(
            "bad-rate",
            "loan.yaml",
            "loan:\n  interest_rate_percent: 7.5\n  term_years: 35\nfees:\n  fee_rate_percent: 7.0\n",
        );

        match ConfigLoader::load(&dir) {
            Err(EngineError::Validation { field, .. }) => {
                assert_eq!(field, "loan.interest_rate_percent");
            }
            other => panic!("Expected Validation error, got {:?}", other),
        }
        fs::remove_dir_all(dir).ok();
    }
}
