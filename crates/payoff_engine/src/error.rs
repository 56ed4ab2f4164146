//! Engine error types.

use payoff_models::catalog::CatalogError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors raised by the engine and sampler.
///
/// Unresolvable names are not errors; they come back as
/// [`payoff_models::resolver::Resolution::NotChartable`].
///
/// # Examples
/// ```
/// use payoff_engine::EngineError;
///
/// let err = EngineError::InvalidPointCount { point_count: 0 };
/// assert_eq!(format!("{}", err), "Invalid point count: 0. Must be at least 1");
/// ```
#[derive(Error, Debug)]
pub enum EngineError {
    /// The sampler needs at least one interval.
    #[error("Invalid point count: {point_count}. Must be at least 1")]
    InvalidPointCount {
        /// The rejected count
        point_count: usize,
    },

    /// Configuration failed validation.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The catalog could not be built.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}
