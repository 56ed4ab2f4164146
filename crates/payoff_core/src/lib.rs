//! # payoff_core: Payoff Foundation
//!
//! ## Layer 1 (Foundation) Role
//!
//! payoff_core is the bottom layer of the payoff workspace, providing:
//! - Terminal payoff shapes for structured notes and options (`shape`)
//! - Payoff formulas with display metadata and comparator info (`formula`)
//! - Level domains, sample points, and error types (`types`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other payoff_* crates:
//! - thiserror: Structured error types
//! - serde: Serialisation support (optional)
//!
//! ## Units
//!
//! Every shape works on the terminal level expressed in percent of the
//! initial level (100 = unchanged). Structured-note shapes return the
//! redemption amount in percent of notional; option shapes return the net
//! profit in percent of the initial level.
//!
//! ## Usage Examples
//!
//! ```rust
//! use payoff_core::formula::{CatalogKind, Family, PayoffFormula, ProductInfo};
//! use payoff_core::shape::PayoffShape;
//!
//! let note = PayoffFormula::builder(
//!     "Capital Protected Note",
//!     PayoffShape::LinearWithFloor {
//!         strike: 100.0,
//!         floor: 100.0,
//!         participation: 0.8,
//!         cap: None,
//!     },
//! )
//! .info(ProductInfo::new(Family::CapitalProtection, CatalogKind::StructuredNote, 1))
//! .build()
//! .unwrap();
//!
//! assert!((note.evaluate(120.0, 100.0, None) - 116.0).abs() < 1e-12);
//! assert_eq!(note.evaluate(90.0, 100.0, None), 100.0);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for formulas, shapes and points

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod formula;
pub mod shape;
pub mod types;

/// Reference level of the underlying at inception (percent units).
pub const BASE_LEVEL: f64 = 100.0;

/// Normalise an absolute level to percent of the initial level.
///
/// A non-finite or non-positive `initial_level` falls back to [`BASE_LEVEL`]
/// so that evaluation stays total.
#[inline]
pub fn normalise_level(level: f64, initial_level: f64) -> f64 {
    if initial_level.is_finite() && initial_level > 0.0 {
        level / initial_level * BASE_LEVEL
    } else {
        level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalise_identity_at_base() {
        assert_eq!(normalise_level(120.0, BASE_LEVEL), 120.0);
    }

    #[test]
    fn test_normalise_scales_to_percent() {
        assert_eq!(normalise_level(250.0, 200.0), 125.0);
    }

    #[test]
    fn test_normalise_bad_initial_falls_back() {
        assert_eq!(normalise_level(80.0, f64::NAN), 80.0);
        assert_eq!(normalise_level(80.0, 0.0), 80.0);
        assert_eq!(normalise_level(80.0, -5.0), 80.0);
    }
}
