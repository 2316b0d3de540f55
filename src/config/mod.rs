//! Configuration loading and management for the Home Plan Engine.
//!
//! This module provides functionality to load simulation defaults from YAML
//! files: loan conditions, fee rates, deduction settings and plan tiers.
//!
//! # Example
//!
//! ```no_run
//! use home_plan_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/standard").unwrap();
//! println!("Loaded configuration: {}", config.metadata().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{DeductionConfig, LoanConfig, PlansConfig, SimulationConfig, SimulationMetadata};
