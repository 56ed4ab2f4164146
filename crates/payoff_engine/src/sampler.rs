//! Array sampling of payoff formulas.
//!
//! The sampler evaluates a formula at `point_count + 1` evenly spaced levels
//! covering its domain, both endpoints included. Every call materialises
//! fresh vectors; nothing is cached.
//!
//! Malformed numeric input never reaches the output: a non-finite or
//! non-positive initial level is replaced by the sampler's default, and any
//! non-finite payoff is written as `0.0`.

use payoff_core::formula::{CurveVariant, PayoffFormula};
use payoff_core::normalise_level;
use payoff_core::shape::PayoffShape;
use payoff_core::types::{Domain, Point};
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::EngineError;

/// One curve for one representative elapsed year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearCurve {
    /// Elapsed years used for evaluation
    pub year: u32,
    /// Sampled points
    pub points: Vec<Point>,
}

/// One labelled curve of a multi-curve chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedCurve {
    /// Legend label
    pub label: String,
    /// Sampled points
    pub points: Vec<Point>,
}

/// Sampled output, tagged by how many curves the formula produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "curves", rename_all = "snake_case")]
pub enum SampledCurve {
    /// A single curve
    Standard(Vec<Point>),
    /// One curve per representative year (memory products)
    MultiYear(Vec<YearCurve>),
    /// The product curve first, then each reference curve
    MultiCurve(Vec<NamedCurve>),
}

impl SampledCurve {
    /// The product's own curve: the single curve, the first year, or the
    /// first named curve.
    pub fn primary(&self) -> &[Point] {
        match self {
            SampledCurve::Standard(points) => points,
            SampledCurve::MultiYear(curves) => curves.first().map_or(&[][..], |c| c.points.as_slice()),
            SampledCurve::MultiCurve(curves) => curves.first().map_or(&[][..], |c| c.points.as_slice()),
        }
    }

    /// Number of curves.
    pub fn curve_count(&self) -> usize {
        match self {
            SampledCurve::Standard(_) => 1,
            SampledCurve::MultiYear(curves) => curves.len(),
            SampledCurve::MultiCurve(curves) => curves.len(),
        }
    }

    /// Every point of every curve.
    pub fn all_points(&self) -> Box<dyn Iterator<Item = &Point> + '_> {
        match self {
            SampledCurve::Standard(points) => Box::new(points.iter()),
            SampledCurve::MultiYear(curves) => Box::new(curves.iter().flat_map(|c| c.points.iter())),
            SampledCurve::MultiCurve(curves) => Box::new(curves.iter().flat_map(|c| c.points.iter())),
        }
    }
}

/// Evenly spaced grid over `domain` with `intervals + 1` points, the last
/// pinned to `domain.max()`.
pub fn grid(domain: Domain, intervals: usize) -> Vec<f64> {
    let step = domain.width() / intervals as f64;
    let mut xs: Vec<f64> = (0..=intervals)
        .map(|i| domain.min() + step * i as f64)
        .collect();
    if let Some(last) = xs.last_mut() {
        *last = domain.max();
    }
    xs
}

fn finite_or_zero(y: f64, x: f64) -> f64 {
    if y.is_finite() {
        y
    } else {
        debug!(x, y, "Non-finite payoff replaced by zero");
        0.0
    }
}

/// Samples formulas into point arrays.
///
/// # Examples
/// ```
/// use payoff_core::formula::PayoffFormula;
/// use payoff_core::shape::PayoffShape;
/// use payoff_engine::sampler::{ArraySampler, SampledCurve};
///
/// let formula = PayoffFormula::builder("Underlying", PayoffShape::Underlying)
///     .domain(0.0, 200.0)
///     .build()
///     .unwrap();
///
/// let curve = ArraySampler::default().sample(&formula, 100.0, 4).unwrap();
/// let xs: Vec<f64> = curve.primary().iter().map(|p| p.x).collect();
/// assert_eq!(xs, vec![0.0, 50.0, 100.0, 150.0, 200.0]);
/// assert!(matches!(curve, SampledCurve::Standard(_)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ArraySampler {
    phoenix_years: Vec<u32>,
    default_initial_level: f64,
}

impl Default for ArraySampler {
    fn default() -> Self {
        Self {
            phoenix_years: (1..=6).collect(),
            default_initial_level: payoff_core::BASE_LEVEL,
        }
    }
}

impl ArraySampler {
    /// Creates a sampler.
    ///
    /// An empty `phoenix_years` falls back to years 1 through 6; a malformed
    /// `default_initial_level` falls back to 100.
    pub fn new(phoenix_years: Vec<u32>, default_initial_level: f64) -> Self {
        let fallback = Self::default();
        Self {
            phoenix_years: if phoenix_years.is_empty() {
                fallback.phoenix_years
            } else {
                phoenix_years
            },
            default_initial_level: if default_initial_level.is_finite() && default_initial_level > 0.0 {
                default_initial_level
            } else {
                fallback.default_initial_level
            },
        }
    }

    /// Representative years used when a formula lists none.
    pub fn phoenix_years(&self) -> &[u32] {
        &self.phoenix_years
    }

    /// Substitute for malformed initial levels.
    pub fn default_initial_level(&self) -> f64 {
        self.default_initial_level
    }

    /// Samples `formula` over its domain.
    ///
    /// Returns [`SampledCurve::MultiYear`] for per-year formulas,
    /// [`SampledCurve::MultiCurve`] when the formula carries reference curves,
    /// and [`SampledCurve::Standard`] otherwise.
    ///
    /// The x grid always spans the formula's domain in raw levels; only the
    /// evaluation is rescaled by `initial_level`. With an initial level other
    /// than 100 the same grid therefore shows a different part of the payoff:
    /// at 200, a 20..160 domain covers 10% to 80% of the initial level.
    ///
    /// # Errors
    /// `EngineError::InvalidPointCount` when `point_count` is zero.
    pub fn sample(
        &self,
        formula: &PayoffFormula,
        initial_level: f64,
        point_count: usize,
    ) -> Result<SampledCurve, EngineError> {
        if point_count == 0 {
            return Err(EngineError::InvalidPointCount { point_count });
        }
        let initial_level = self.checked_initial_level(initial_level);
        let xs = grid(formula.domain(), point_count);

        if let CurveVariant::PerYear { years } = formula.variant() {
            let years = if years.is_empty() {
                &self.phoenix_years
            } else {
                years
            };
            let curves = years
                .iter()
                .map(|&year| YearCurve {
                    year,
                    points: self.points(&xs, |x| {
                        formula.evaluate(x, initial_level, Some(f64::from(year)))
                    }),
                })
                .collect();
            return Ok(SampledCurve::MultiYear(curves));
        }

        let main = self.points(&xs, |x| formula.evaluate(x, initial_level, None));
        if formula.reference_curves().is_empty() {
            return Ok(SampledCurve::Standard(main));
        }

        let mut curves = Vec::with_capacity(formula.reference_curves().len() + 1);
        curves.push(NamedCurve {
            label: formula.name().to_string(),
            points: main,
        });
        for reference in formula.reference_curves() {
            curves.push(NamedCurve {
                label: reference.label.clone(),
                points: self.points(&xs, |x| {
                    evaluate_shape(&reference.shape, x, initial_level)
                }),
            });
        }
        Ok(SampledCurve::MultiCurve(curves))
    }

    fn checked_initial_level(&self, initial_level: f64) -> f64 {
        if initial_level.is_finite() && initial_level > 0.0 {
            initial_level
        } else {
            warn!(
                initial_level,
                substitute = self.default_initial_level,
                "Malformed initial level replaced"
            );
            self.default_initial_level
        }
    }

    fn points<F>(&self, xs: &[f64], eval: F) -> Vec<Point>
    where
        F: Fn(f64) -> f64,
    {
        xs.iter()
            .map(|&x| Point::new(x, finite_or_zero(eval(x), x)))
            .collect()
    }
}

fn evaluate_shape(shape: &PayoffShape, level: f64, initial_level: f64) -> f64 {
    shape.evaluate(normalise_level(level, initial_level), None)
}
