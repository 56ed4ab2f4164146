//! Formula error types.
//!
//! This module provides structured error handling for formula
//! construction and parameter override operations.

use thiserror::Error;

/// Formula-related errors.
///
/// # Variants
/// - `InvalidDomain`: Domain bounds are non-finite or not increasing
/// - `EmptyName`: Formula name is blank
/// - `UnknownParameter`: Override targets a parameter the shape does not have
/// - `NonFiniteParameter`: Override value is NaN or infinite
///
/// # Examples
/// ```
/// use payoff_core::types::FormulaError;
///
/// let err = FormulaError::UnknownParameter { name: "gearing".to_string() };
/// assert!(format!("{}", err).contains("gearing"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormulaError {
    /// Domain bounds are non-finite or `min >= max`.
    #[error("Invalid domain: [{min}, {max}]")]
    InvalidDomain {
        /// Lower bound
        min: f64,
        /// Upper bound
        max: f64,
    },

    /// Formula name is empty or whitespace.
    #[error("Formula name must not be empty")]
    EmptyName,

    /// Parameter name not present on the shape.
    #[error("Unknown parameter: {name}")]
    UnknownParameter {
        /// The requested parameter name
        name: String,
    },

    /// Parameter value is NaN or infinite.
    #[error("Non-finite value for parameter {name}: {value}")]
    NonFiniteParameter {
        /// The parameter name
        name: String,
        /// The rejected value
        value: f64,
    },
}
