//! Error types for the Home Plan Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while composing a financing proposal.

use thiserror::Error;

/// The main error type for the Home Plan Engine.
///
/// All fallible operations in the engine return this error type, making it easy
/// to handle errors consistently from the calculators up to the HTTP layer.
///
/// # Example
///
/// ```
/// use home_plan_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/file.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/file.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A plan tier id was not found among the configured tiers.
    #[error("Plan tier not found: {tier_id}")]
    PlanNotFound {
        /// The tier id that was not found.
        tier_id: String,
    },

    /// The interest rate cannot be used to amortize a loan.
    #[error("Invalid interest rate {rate_percent}%: {message}")]
    InvalidRate {
        /// The offending annual rate in percent.
        rate_percent: f64,
        /// A description of why the rate was rejected.
        message: String,
    },

    /// An input value was outside its permitted domain.
    #[error("Invalid value for '{field}': {message}")]
    Validation {
        /// The name of the invalid field.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

impl EngineError {
    /// Builds a [`EngineError::Validation`] for the given field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
