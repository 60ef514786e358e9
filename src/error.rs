//! Error types for the Payroll Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the engine and its surrounding layers can report.
//! Configuration errors are fatal at startup, validation errors reject a
//! single request, and computation errors are absorbed by the engines.

use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the Payroll Engine.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/contribution.yaml".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Configuration file not found: /missing/contribution.yaml"
/// );
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

    /// A bracket table violated one of its structural invariants.
    #[error("Invalid bracket table '{table}': {message}")]
    InvalidBracketTable {
        /// The name of the offending table.
        table: String,
        /// Which invariant was violated.
        message: String,
    },

    /// A configured constant was outside its accepted domain.
    #[error("Invalid configuration value '{field}': {message}")]
    InvalidConfigValue {
        /// The configuration field.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// A request parameter failed validation.
    #[error("Invalid field '{field}': {message}")]
    Validation {
        /// The request field that was rejected.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// No bracket of a table contains the given amount.
    #[error("No bracket in table '{table}' contains amount {amount}")]
    NoBracketFound {
        /// The table that was searched.
        table: String,
        /// The amount that fell outside every bracket.
        amount: Decimal,
    },
}

impl EngineError {
    /// Returns `true` for errors that stem from the loaded configuration.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            EngineError::ConfigNotFound { .. }
                | EngineError::ConfigParseError { .. }
                | EngineError::InvalidBracketTable { .. }
                | EngineError::InvalidConfigValue { .. }
        )
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/file.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/file.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_bracket_table_displays_table_and_message() {
        let error = EngineError::InvalidBracketTable {
            table: "INSS".to_string(),
            message: "gap between range 1 and range 2".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid bracket table 'INSS': gap between range 1 and range 2"
        );
    }

    #[test]
    fn test_validation_displays_field_and_message() {
        let error = EngineError::Validation {
            field: "numberOfDependents".to_string(),
            message: "must not be negative".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid field 'numberOfDependents': must not be negative"
        );
    }

    #[test]
    fn test_no_bracket_found_displays_amount() {
        let error = EngineError::NoBracketFound {
            table: "IRRF".to_string(),
            amount: Decimal::from_str("-12.50").unwrap(),
        };
        assert_eq!(
            error.to_string(),
            "No bracket in table 'IRRF' contains amount -12.50"
        );
    }

    #[test]
    fn test_is_configuration_classifies_variants() {
        assert!(
            EngineError::InvalidConfigValue {
                field: "ceiling".to_string(),
                message: "negative".to_string(),
            }
            .is_configuration()
        );
        assert!(
            !EngineError::Validation {
                field: "grossPay".to_string(),
                message: "too low".to_string(),
            }
            .is_configuration()
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_config_not_found() -> EngineResult<()> {
            Err(EngineError::ConfigNotFound {
                path: "/test".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_config_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
