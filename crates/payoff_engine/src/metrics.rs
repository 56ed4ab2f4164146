//! Comparison metrics over sampled curves.
//!
//! These back the side-by-side comparator: payoff range, payoff at the
//! initial level and the levels where the payoff crosses its breakeven
//! reference (100 for notes, 0 for options).

use payoff_core::formula::CatalogKind;
use payoff_core::types::Point;
use serde::Serialize;

use crate::sampler::SampledCurve;

/// Summary of one sampled payoff curve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayoffSummary {
    /// Lowest sampled payoff
    pub min_payoff: f64,
    /// Highest sampled payoff
    pub max_payoff: f64,
    /// Payoff at the initial level, interpolated; `None` if outside the domain
    pub payoff_at_initial: Option<f64>,
    /// Breakeven reference used for crossings
    pub reference: f64,
    /// Levels where the payoff crosses the reference, ascending
    pub breakevens: Vec<f64>,
}

impl PayoffSummary {
    /// Computes the summary of a curve.
    ///
    /// Returns `None` for an empty curve.
    ///
    /// # Examples
    /// ```
    /// use payoff_core::types::Point;
    /// use payoff_engine::metrics::PayoffSummary;
    ///
    /// let points = [Point::new(80.0, -6.0), Point::new(100.0, -6.0), Point::new(120.0, 14.0)];
    /// let summary = PayoffSummary::from_points(&points, 0.0, 100.0).unwrap();
    /// assert_eq!(summary.breakevens, vec![106.0]);
    /// assert_eq!(summary.payoff_at_initial, Some(-6.0));
    /// ```
    pub fn from_points(points: &[Point], reference: f64, initial_level: f64) -> Option<Self> {
        let first = points.first()?;
        let (min_payoff, max_payoff) = points
            .iter()
            .fold((first.y, first.y), |(lo, hi), p| (lo.min(p.y), hi.max(p.y)));

        Some(Self {
            min_payoff,
            max_payoff,
            payoff_at_initial: interpolate(points, initial_level),
            reference,
            breakevens: crossings(points, reference),
        })
    }

    /// Summary of the product's own curve, against the breakeven
    /// reference of its catalog kind.
    pub fn from_curve(curve: &SampledCurve, kind: CatalogKind, initial_level: f64) -> Option<Self> {
        Self::from_points(curve.primary(), kind.breakeven_reference(), initial_level)
    }

    /// Highest gain over the reference (never negative).
    pub fn max_gain(&self) -> f64 {
        (self.max_payoff - self.reference).max(0.0)
    }

    /// Deepest loss below the reference (never negative).
    pub fn max_loss(&self) -> f64 {
        (self.reference - self.min_payoff).max(0.0)
    }
}

/// Linear interpolation of `y` at `x`, assuming ascending x.
pub fn interpolate(points: &[Point], x: f64) -> Option<f64> {
    points.windows(2).find_map(|w| {
        let (a, b) = (w[0], w[1]);
        if x < a.x || x > b.x {
            return None;
        }
        if b.x == a.x {
            return Some(a.y);
        }
        Some(a.y + (b.y - a.y) * (x - a.x) / (b.x - a.x))
    })
    .or_else(|| match points {
        [only] if only.x == x => Some(only.y),
        _ => None,
    })
}

fn crossings(points: &[Point], reference: f64) -> Vec<f64> {
    let mut out: Vec<f64> = Vec::new();
    for w in points.windows(2) {
        let (a, b) = (w[0], w[1]);
        let (da, db) = (a.y - reference, b.y - reference);
        let x = if da * db < 0.0 {
            a.x + (reference - a.y) * (b.x - a.x) / (b.y - a.y)
        } else if db == 0.0 && da != 0.0 {
            b.x
        } else {
            continue;
        };
        if out.last().map_or(true, |&last| (x - last).abs() > 1e-9) {
            out.push(x);
        }
    }
    out
}
