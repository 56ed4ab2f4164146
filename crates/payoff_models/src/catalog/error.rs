//! Catalog error types.

use payoff_core::types::FormulaError;
use thiserror::Error;

/// Catalog construction errors.
///
/// # Examples
/// ```
/// use payoff_models::catalog::CatalogError;
///
/// let err = CatalogError::DuplicateKey { name: "Long Call".to_string() };
/// assert_eq!(format!("{}", err), "Duplicate catalog key: Long Call");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// Two formulas share the same canonical name.
    #[error("Duplicate catalog key: {name}")]
    DuplicateKey {
        /// The repeated name
        name: String,
    },

    /// A formula in the static table failed validation.
    #[error("Invalid catalog entry: {0}")]
    Formula(#[from] FormulaError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_formula_error() {
        let err: CatalogError = FormulaError::EmptyName.into();
        assert_eq!(
            format!("{}", err),
            "Invalid catalog entry: Formula name must not be empty"
        );
    }
}
