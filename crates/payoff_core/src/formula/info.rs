//! Comparator metadata: product family, catalog kind, and risk level.

use std::fmt;

use crate::BASE_LEVEL;

/// Broad product family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Family {
    /// Capital-protected notes
    CapitalProtection,
    /// Coupon-paying notes (autocalls, reverse convertibles)
    Income,
    /// Participation certificates (bonus, discount, twin win)
    Participation,
    /// Leverage products (turbos, outperformance)
    Leverage,
    /// Barrier options
    Barrier,
    /// Asian and lookback options
    PathDependent,
    /// Straddles, strangles, butterflies, condors, calendars
    Volatility,
    /// Vertical spreads and hedged equity positions
    Spread,
    /// Single vanilla options
    Vanilla,
    /// Digital options
    Digital,
    /// Currency-linked structures
    FxStructured,
    /// Locked-in payoffs (box, conversion, reversal)
    Arbitrage,
}

impl Family {
    /// All families in display order.
    pub const ALL: [Family; 12] = [
        Family::CapitalProtection,
        Family::Income,
        Family::Participation,
        Family::Leverage,
        Family::Barrier,
        Family::PathDependent,
        Family::Volatility,
        Family::Spread,
        Family::Vanilla,
        Family::Digital,
        Family::FxStructured,
        Family::Arbitrage,
    ];

    /// Kebab-case identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Family::CapitalProtection => "capital-protection",
            Family::Income => "income",
            Family::Participation => "participation",
            Family::Leverage => "leverage",
            Family::Barrier => "barrier",
            Family::PathDependent => "path-dependent",
            Family::Volatility => "volatility",
            Family::Spread => "spread",
            Family::Vanilla => "vanilla",
            Family::Digital => "digital",
            Family::FxStructured => "fx-structured",
            Family::Arbitrage => "arbitrage",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Family {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        Family::ALL
            .iter()
            .copied()
            .find(|family| family.as_str() == wanted)
            .ok_or_else(|| format!("unknown family: {}", s))
    }
}

/// Which catalog a formula belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum CatalogKind {
    /// Payoff is a redemption amount in percent of notional
    StructuredNote,
    /// Payoff is net profit in percent of the initial level
    Option,
}

impl CatalogKind {
    /// Payoff level that separates gains from losses.
    #[inline]
    pub fn breakeven_reference(&self) -> f64 {
        match self {
            CatalogKind::StructuredNote => BASE_LEVEL,
            CatalogKind::Option => 0.0,
        }
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogKind::StructuredNote => write!(f, "structured-note"),
            CatalogKind::Option => write!(f, "option"),
        }
    }
}

/// Comparator metadata attached to each formula.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProductInfo {
    /// Product family
    pub family: Family,
    /// Catalog kind
    pub kind: CatalogKind,
    /// Risk level on a 1 (lowest) to 7 (highest) scale
    pub risk_level: u8,
    /// Whether capital is protected at maturity
    pub capital_protected: bool,
    /// One-line educational summary
    pub summary: String,
}

impl ProductInfo {
    /// Risk level bounds.
    pub const RISK_RANGE: std::ops::RangeInclusive<u8> = 1..=7;

    /// Creates metadata; the risk level is clamped into [`Self::RISK_RANGE`].
    pub fn new(family: Family, kind: CatalogKind, risk_level: u8) -> Self {
        Self {
            family,
            kind,
            risk_level: risk_level.clamp(*Self::RISK_RANGE.start(), *Self::RISK_RANGE.end()),
            capital_protected: false,
            summary: String::new(),
        }
    }

    /// Marks capital as protected.
    pub fn protected(mut self) -> Self {
        self.capital_protected = true;
        self
    }

    /// Attaches a one-line summary.
    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }
}

impl Default for ProductInfo {
    fn default() -> Self {
        Self::new(Family::Vanilla, CatalogKind::Option, 4)
    }
}
