//! Level domains, sample points, and error types.
//!
//! This module provides:
//! - `domain`: Inclusive level intervals and plotted points
//! - `error`: Structured error types for formula construction and overrides
//!
//! # Re-exports
//!
//! - [`Domain`], [`Point`] from `domain`
//! - [`FormulaError`] from `error`

pub mod domain;
pub mod error;

pub use domain::{Domain, Point};
pub use error::FormulaError;
