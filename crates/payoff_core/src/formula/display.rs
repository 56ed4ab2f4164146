//! Display-only metadata: reference lines, shaded zones, and curve variants.

use crate::shape::PayoffShape;

/// Axis a reference line is drawn against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Axis {
    /// Vertical line at an underlying level
    X,
    /// Horizontal line at a payoff value
    Y,
}

/// Colour role of an annotation or zone.
///
/// Renderers map roles to their own palette; [`Tone::hex`] gives the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Tone {
    /// Strikes and initial level
    Strike,
    /// Knock-in / knock-out barriers
    Barrier,
    /// Caps and upper limits
    Cap,
    /// Floors and protection levels
    Floor,
    /// Coupons and bonus levels
    Coupon,
    /// Autocall triggers
    Trigger,
    /// Gain zones
    Gain,
    /// Loss zones
    Loss,
    /// Neutral zones
    Neutral,
}

impl Tone {
    /// Default hex colour for the role.
    pub fn hex(&self) -> &'static str {
        match self {
            Tone::Strike => "#6b7280",
            Tone::Barrier => "#ef4444",
            Tone::Cap => "#f59e0b",
            Tone::Floor => "#10b981",
            Tone::Coupon => "#3b82f6",
            Tone::Trigger => "#8b5cf6",
            Tone::Gain => "#dcfce7",
            Tone::Loss => "#fee2e2",
            Tone::Neutral => "#f3f4f6",
        }
    }
}

/// Reference line drawn on the chart.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Annotation {
    /// Axis the line is perpendicular to
    pub axis: Axis,
    /// Position on that axis
    pub value: f64,
    /// Label shown next to the line
    pub label: String,
    /// Colour role
    pub tone: Tone,
}

impl Annotation {
    /// Vertical line at an underlying level.
    pub fn vertical(value: f64, label: impl Into<String>, tone: Tone) -> Self {
        Self {
            axis: Axis::X,
            value,
            label: label.into(),
            tone,
        }
    }

    /// Horizontal line at a payoff value.
    pub fn horizontal(value: f64, label: impl Into<String>, tone: Tone) -> Self {
        Self {
            axis: Axis::Y,
            value,
            label: label.into(),
            tone,
        }
    }
}

/// Shaded x-axis interval.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Zone {
    /// Start level
    pub from: f64,
    /// End level
    pub to: f64,
    /// Legend label
    pub label: String,
    /// Colour role
    pub tone: Tone,
}

impl Zone {
    /// Creates a zone.
    pub fn new(from: f64, to: f64, label: impl Into<String>, tone: Tone) -> Self {
        Self {
            from,
            to,
            label: label.into(),
            tone,
        }
    }
}

/// How many curves a formula produces.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum CurveVariant {
    /// One curve evaluated with the default elapsed years
    #[default]
    Single,
    /// One curve per representative elapsed year (memory/phoenix products).
    /// An empty list defers to the sampler's configured years.
    PerYear {
        /// Representative years
        years: Vec<u32>,
    },
}

impl CurveVariant {
    /// Whether the sampler must produce one curve per year.
    #[inline]
    pub fn is_per_year(&self) -> bool {
        matches!(self, CurveVariant::PerYear { .. })
    }
}

/// Extra labelled curve drawn beside the product (e.g. direct investment).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReferenceCurve {
    /// Legend label
    pub label: String,
    /// Shape evaluated on the same grid
    pub shape: PayoffShape,
}

impl ReferenceCurve {
    /// The underlying held directly.
    pub fn direct_investment() -> Self {
        Self {
            label: "Direct investment".to_string(),
            shape: PayoffShape::Underlying,
        }
    }
}
