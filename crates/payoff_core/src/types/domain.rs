//! Level domains and plotted points.

use super::error::FormulaError;

/// Inclusive interval `[min, max]` over terminal levels (percent of initial).
///
/// Also used for suggested y-axis bounds, where it has no functional effect.
///
/// # Examples
/// ```
/// use payoff_core::types::Domain;
///
/// let domain = Domain::new(0.0, 200.0).unwrap();
/// assert_eq!(domain.width(), 200.0);
/// assert!(domain.contains(100.0));
/// assert!(Domain::new(150.0, 50.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Domain {
    min: f64,
    max: f64,
}

impl Domain {
    /// Creates a validated domain.
    ///
    /// # Errors
    /// `FormulaError::InvalidDomain` if a bound is non-finite or `min >= max`.
    pub fn new(min: f64, max: f64) -> Result<Self, FormulaError> {
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(FormulaError::InvalidDomain { min, max });
        }
        Ok(Self { min, max })
    }

    /// Lower bound.
    #[inline]
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound.
    #[inline]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Interval width.
    #[inline]
    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    /// Whether `x` lies within the closed interval.
    #[inline]
    pub fn contains(&self, x: f64) -> bool {
        x >= self.min && x <= self.max
    }
}

impl Default for Domain {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 200.0,
        }
    }
}

/// A single plotted `(x, y)` pair.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// Terminal level of the underlying
    pub x: f64,
    /// Payoff at that level
    pub y: f64,
}

impl Point {
    /// Creates a point.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}
