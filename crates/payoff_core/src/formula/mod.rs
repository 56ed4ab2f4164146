//! Payoff formulas.
//!
//! A [`PayoffFormula`] couples one [`PayoffShape`] with the metadata a chart
//! or comparator needs: level domain, suggested y-range, reference lines,
//! shaded zones, curve variant, reference curves and product info.
//!
//! Formulas are plain values. Cloning one yields a fully independent copy,
//! so overriding parameters on a clone never affects the original.
//!
//! # Examples
//!
//! ```
//! use payoff_core::formula::{Annotation, PayoffFormula, Tone};
//! use payoff_core::shape::{Leg, PayoffShape};
//!
//! let spread = PayoffFormula::builder(
//!     "Bull Call Spread",
//!     PayoffShape::Strategy {
//!         legs: vec![Leg::long_call(100.0), Leg::short_call(120.0)],
//!         premium: 6.0,
//!     },
//! )
//! .domain(60.0, 160.0)
//! .annotation(Annotation::vertical(100.0, "Long strike", Tone::Strike))
//! .build()
//! .unwrap();
//!
//! assert_eq!(spread.evaluate(110.0, 100.0, None), 4.0);
//! ```

mod display;
mod info;

pub use display::{Annotation, Axis, CurveVariant, ReferenceCurve, Tone, Zone};
pub use info::{CatalogKind, Family, ProductInfo};

use crate::normalise_level;
use crate::shape::{Parameter, PayoffShape};
use crate::types::{Domain, FormulaError};

/// One product's payoff plus presentation metadata.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PayoffFormula {
    name: String,
    domain: Domain,
    display_range: Domain,
    shape: PayoffShape,
    annotations: Vec<Annotation>,
    zones: Vec<Zone>,
    variant: CurveVariant,
    reference_curves: Vec<ReferenceCurve>,
    info: ProductInfo,
}

impl PayoffFormula {
    /// Starts a builder with default domain `[0, 200]` and no metadata.
    pub fn builder(name: impl Into<String>, shape: PayoffShape) -> PayoffFormulaBuilder {
        PayoffFormulaBuilder::new(name, shape)
    }

    /// Evaluate the payoff.
    ///
    /// `level` is normalised against `initial_level` before the shape is
    /// applied. The domain is not enforced here.
    ///
    /// # Arguments
    /// * `level` - Terminal level of the underlying
    /// * `initial_level` - Level at inception (100 for percent inputs)
    /// * `elapsed_years` - Observation years for memory products
    #[inline]
    pub fn evaluate(&self, level: f64, initial_level: f64, elapsed_years: Option<f64>) -> f64 {
        self.shape
            .evaluate(normalise_level(level, initial_level), elapsed_years)
    }

    /// Canonical display name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sampled level domain.
    #[inline]
    pub fn domain(&self) -> Domain {
        self.domain
    }

    /// Suggested y-axis bounds.
    #[inline]
    pub fn display_range(&self) -> Domain {
        self.display_range
    }

    /// Payoff shape.
    #[inline]
    pub fn shape(&self) -> &PayoffShape {
        &self.shape
    }

    /// Reference lines.
    #[inline]
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Shaded zones.
    #[inline]
    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    /// Curve variant.
    #[inline]
    pub fn variant(&self) -> &CurveVariant {
        &self.variant
    }

    /// Extra curves drawn beside the product.
    #[inline]
    pub fn reference_curves(&self) -> &[ReferenceCurve] {
        &self.reference_curves
    }

    /// Comparator metadata.
    #[inline]
    pub fn info(&self) -> &ProductInfo {
        &self.info
    }

    /// Named numeric constants of the shape.
    pub fn parameters(&self) -> Vec<Parameter> {
        self.shape.parameters()
    }

    /// Override one named parameter on this copy.
    ///
    /// # Errors
    /// See [`PayoffShape::set_parameter`].
    pub fn set_parameter(&mut self, name: &str, value: f64) -> Result<(), FormulaError> {
        self.shape.set_parameter(name, value)
    }

    /// Replace the shape on this copy, e.g. to turn a call spread into a put spread.
    pub fn replace_shape(&mut self, shape: PayoffShape) {
        self.shape = shape;
    }

    /// Rename this copy.
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Mutable access to the reference lines of this copy.
    pub fn annotations_mut(&mut self) -> &mut Vec<Annotation> {
        &mut self.annotations
    }
}

/// Builder for [`PayoffFormula`].
///
/// Domain bounds are validated in [`PayoffFormulaBuilder::build`].
#[derive(Debug, Clone)]
pub struct PayoffFormulaBuilder {
    name: String,
    shape: PayoffShape,
    domain: (f64, f64),
    display_range: Option<(f64, f64)>,
    annotations: Vec<Annotation>,
    zones: Vec<Zone>,
    variant: CurveVariant,
    reference_curves: Vec<ReferenceCurve>,
    info: ProductInfo,
}

impl PayoffFormulaBuilder {
    fn new(name: impl Into<String>, shape: PayoffShape) -> Self {
        let default = Domain::default();
        Self {
            name: name.into(),
            shape,
            domain: (default.min(), default.max()),
            display_range: None,
            annotations: Vec::new(),
            zones: Vec::new(),
            variant: CurveVariant::Single,
            reference_curves: Vec::new(),
            info: ProductInfo::default(),
        }
    }

    /// Sets the level domain.
    pub fn domain(mut self, min: f64, max: f64) -> Self {
        self.domain = (min, max);
        self
    }

    /// Sets the suggested y-axis range (defaults to the level domain).
    pub fn display_range(mut self, min: f64, max: f64) -> Self {
        self.display_range = Some((min, max));
        self
    }

    /// Appends a reference line.
    pub fn annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Appends a shaded zone.
    pub fn zone(mut self, zone: Zone) -> Self {
        self.zones.push(zone);
        self
    }

    /// Produce one curve per representative elapsed year.
    pub fn per_year(mut self, years: Vec<u32>) -> Self {
        self.variant = CurveVariant::PerYear { years };
        self
    }

    /// Appends a reference curve.
    pub fn reference_curve(mut self, curve: ReferenceCurve) -> Self {
        self.reference_curves.push(curve);
        self
    }

    /// Sets the comparator metadata.
    pub fn info(mut self, info: ProductInfo) -> Self {
        self.info = info;
        self
    }

    /// Validates and builds the formula.
    ///
    /// # Errors
    /// - `FormulaError::EmptyName` for a blank name
    /// - `FormulaError::InvalidDomain` for bad domain or display bounds
    pub fn build(self) -> Result<PayoffFormula, FormulaError> {
        if self.name.trim().is_empty() {
            return Err(FormulaError::EmptyName);
        }
        let domain = Domain::new(self.domain.0, self.domain.1)?;
        let display_range = match self.display_range {
            Some((min, max)) => Domain::new(min, max)?,
            None => domain,
        };
        Ok(PayoffFormula {
            name: self.name,
            domain,
            display_range,
            shape: self.shape,
            annotations: self.annotations,
            zones: self.zones,
            variant: self.variant,
            reference_curves: self.reference_curves,
            info: self.info,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::Leg;
    use approx::assert_relative_eq;

    fn protected_note() -> PayoffFormula {
        PayoffFormula::builder(
            "Capital Protected Note",
            PayoffShape::LinearWithFloor {
                strike: 100.0,
                floor: 100.0,
                participation: 0.8,
                cap: None,
            },
        )
        .domain(50.0, 150.0)
        .display_range(80.0, 150.0)
        .annotation(Annotation::horizontal(100.0, "Floor", Tone::Floor))
        .reference_curve(ReferenceCurve::direct_investment())
        .info(ProductInfo::new(Family::CapitalProtection, CatalogKind::StructuredNote, 1).protected())
        .build()
        .unwrap()
    }

    #[test]
    fn test_evaluate_known_values() {
        let note = protected_note();
        assert_relative_eq!(note.evaluate(120.0, 100.0, None), 116.0, epsilon = 1e-12);
        assert_eq!(note.evaluate(90.0, 100.0, None), 100.0);
    }

    #[test]
    fn test_evaluate_rescales_initial_level() {
        let note = protected_note();
        // 240 on an initial level of 200 is +20%
        assert_relative_eq!(note.evaluate(240.0, 200.0, None), 116.0, epsilon = 1e-12);
    }

    #[test]
    fn test_builder_defaults() {
        let formula = PayoffFormula::builder("Locked", PayoffShape::Locked { value: 5.0 })
            .build()
            .unwrap();
        assert_eq!(formula.domain(), Domain::default());
        assert_eq!(formula.display_range(), formula.domain());
        assert_eq!(formula.variant(), &CurveVariant::Single);
        assert!(formula.annotations().is_empty());
        assert!(formula.reference_curves().is_empty());
    }

    #[test]
    fn test_builder_rejects_blank_name() {
        let result = PayoffFormula::builder("  ", PayoffShape::Underlying).build();
        assert_eq!(result, Err(FormulaError::EmptyName));
    }

    #[test]
    fn test_builder_rejects_bad_domain() {
        let result = PayoffFormula::builder("Bad", PayoffShape::Underlying)
            .domain(150.0, 50.0)
            .build();
        assert!(matches!(result, Err(FormulaError::InvalidDomain { .. })));
    }

    #[test]
    fn test_clone_is_independent() {
        let original = protected_note();
        let mut copy = original.clone();
        copy.set_parameter("participation", 1.5).unwrap();
        copy.annotations_mut().clear();
        copy.rename("Custom note");

        assert_relative_eq!(original.evaluate(120.0, 100.0, None), 116.0, epsilon = 1e-12);
        assert_eq!(original.annotations().len(), 1);
        assert_eq!(original.name(), "Capital Protected Note");
        assert_relative_eq!(copy.evaluate(120.0, 100.0, None), 130.0, epsilon = 1e-12);
    }

    #[test]
    fn test_replace_shape_turns_call_spread_into_put_spread() {
        let mut formula = PayoffFormula::builder(
            "Bull Call Spread",
            PayoffShape::Strategy {
                legs: vec![Leg::long_call(100.0), Leg::short_call(120.0)],
                premium: 6.0,
            },
        )
        .build()
        .unwrap();

        formula.replace_shape(PayoffShape::Strategy {
            legs: vec![Leg::long_put(100.0), Leg::short_put(80.0)],
            premium: 6.0,
        });
        formula.rename("Bear Put Spread");

        assert_eq!(formula.evaluate(70.0, 100.0, None), 14.0);
        assert_eq!(formula.evaluate(120.0, 100.0, None), -6.0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serialises_shape_tag() {
        let json = serde_json::to_value(protected_note()).unwrap();
        assert_eq!(json["shape"]["shape"], "linear_with_floor");
        assert_eq!(json["info"]["family"], "capital-protection");
    }
}
