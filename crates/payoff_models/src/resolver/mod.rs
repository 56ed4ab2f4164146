//! Free-text product-name resolution.
//!
//! [`NameResolver::resolve`] tries, in order:
//! 1. exact key match over structured notes, then options
//! 2. match on the normalised name (see [`normalize`])
//! 3. the ordered keyword rules in [`rules::RULES`]
//! 4. credit-linked markers, then unknown product
//!
//! Every successful resolution hands out an owned copy of the catalog entry.

mod normalize;
pub mod rules;

pub use normalize::normalize;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use payoff_core::formula::PayoffFormula;
use tracing::{debug, warn};

use crate::catalog::ProductCatalog;

/// Resolution step that produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MatchMethod {
    /// Raw string equality with a catalog key
    Exact,
    /// Equality after normalisation
    Normalized,
    /// Keyword rule
    Pattern,
}

impl MatchMethod {
    /// Lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchMethod::Exact => "exact",
            MatchMethod::Normalized => "normalized",
            MatchMethod::Pattern => "pattern",
        }
    }
}

impl fmt::Display for MatchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a name has no chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum NotChartableReason {
    /// Credit-linked instruments have no terminal payoff by nature
    CreditLinked,
    /// No catalog entry or rule matched
    UnknownProduct,
}

impl NotChartableReason {
    /// Kebab-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            NotChartableReason::CreditLinked => "credit-linked",
            NotChartableReason::UnknownProduct => "unknown-product",
        }
    }
}

impl fmt::Display for NotChartableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A formula copied out of the catalog by [`NameResolver::resolve`].
///
/// The copy is owned: customising it never affects the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedFormula {
    formula: PayoffFormula,
    matched_key: String,
    method: MatchMethod,
}

impl ResolvedFormula {
    fn new(source: &PayoffFormula, method: MatchMethod) -> Self {
        Self {
            formula: source.clone(),
            matched_key: source.name().to_string(),
            method,
        }
    }

    /// The owned formula.
    #[inline]
    pub fn formula(&self) -> &PayoffFormula {
        &self.formula
    }

    /// Mutable access for one-off variants.
    #[inline]
    pub fn formula_mut(&mut self) -> &mut PayoffFormula {
        &mut self.formula
    }

    /// Consumes the handle.
    pub fn into_formula(self) -> PayoffFormula {
        self.formula
    }

    /// Catalog key that matched.
    #[inline]
    pub fn matched_key(&self) -> &str {
        &self.matched_key
    }

    /// Resolution step that matched.
    #[inline]
    pub fn method(&self) -> MatchMethod {
        self.method
    }
}

/// Outcome of resolving a product name.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// A chartable formula
    Chart(ResolvedFormula),
    /// No chart for this name
    NotChartable(NotChartableReason),
}

impl Resolution {
    /// Whether a formula was found.
    pub fn is_chartable(&self) -> bool {
        matches!(self, Resolution::Chart(_))
    }

    /// The resolved handle, if any.
    pub fn resolved(&self) -> Option<&ResolvedFormula> {
        match self {
            Resolution::Chart(resolved) => Some(resolved),
            Resolution::NotChartable(_) => None,
        }
    }

    /// Consumes the outcome, keeping the handle.
    pub fn into_resolved(self) -> Option<ResolvedFormula> {
        match self {
            Resolution::Chart(resolved) => Some(resolved),
            Resolution::NotChartable(_) => None,
        }
    }

    /// The not-chartable reason, if any.
    pub fn reason(&self) -> Option<NotChartableReason> {
        match self {
            Resolution::Chart(_) => None,
            Resolution::NotChartable(reason) => Some(*reason),
        }
    }
}

/// Resolves free-text names against an injected catalog.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use payoff_models::catalog::ProductCatalog;
/// use payoff_models::resolver::{MatchMethod, NameResolver, NotChartableReason, Resolution};
///
/// let resolver = NameResolver::new(Arc::new(ProductCatalog::standard().unwrap()));
///
/// let resolved = resolver.resolve("condor de fer").into_resolved().unwrap();
/// assert_eq!(resolved.matched_key(), "Iron Condor");
/// assert_eq!(resolved.method(), MatchMethod::Pattern);
///
/// assert_eq!(
///     resolver.resolve("Credit Linked Note"),
///     Resolution::NotChartable(NotChartableReason::CreditLinked)
/// );
/// ```
#[derive(Debug, Clone)]
pub struct NameResolver {
    catalog: Arc<ProductCatalog>,
    normalized_index: HashMap<String, String>,
}

impl NameResolver {
    /// Builds the normalised-key index over `catalog`.
    ///
    /// When two keys normalise identically the structured note wins.
    pub fn new(catalog: Arc<ProductCatalog>) -> Self {
        let mut normalized_index = HashMap::with_capacity(catalog.len());
        for formula in catalog.iter() {
            let key = normalize(formula.name());
            if let Some(existing) = normalized_index.get(&key) {
                debug!(key = %key, kept = %existing, skipped = formula.name(), "Normalised key collision");
                continue;
            }
            normalized_index.insert(key, formula.name().to_string());
        }
        Self {
            catalog,
            normalized_index,
        }
    }

    /// The injected catalog.
    pub fn catalog(&self) -> &Arc<ProductCatalog> {
        &self.catalog
    }

    /// Resolves `name`. Never panics and never fails; unmatched names
    /// come back as [`Resolution::NotChartable`].
    pub fn resolve(&self, name: &str) -> Resolution {
        if let Some(formula) = self.catalog.get(name) {
            debug!(product = name, "Exact match");
            return Resolution::Chart(ResolvedFormula::new(formula, MatchMethod::Exact));
        }

        let normalized = normalize(name);
        if let Some(formula) = self
            .normalized_index
            .get(&normalized)
            .and_then(|key| self.catalog.get(key))
        {
            debug!(product = name, key = formula.name(), "Normalised match");
            return Resolution::Chart(ResolvedFormula::new(formula, MatchMethod::Normalized));
        }

        if let Some(rule) = rules::first_match(&normalized) {
            match self.catalog.get(rule.target) {
                Some(formula) => {
                    debug!(product = name, key = rule.target, "Keyword rule match");
                    return Resolution::Chart(ResolvedFormula::new(formula, MatchMethod::Pattern));
                }
                None => warn!(product = name, target = rule.target, "Rule target missing from catalog"),
            }
        }

        let reason = if rules::is_credit_linked(&normalized) {
            NotChartableReason::CreditLinked
        } else {
            NotChartableReason::UnknownProduct
        };
        debug!(product = name, reason = %reason, "Not chartable");
        Resolution::NotChartable(reason)
    }

    /// Rule targets absent from the injected catalog.
    pub fn missing_rule_targets(&self) -> Vec<&'static str> {
        rules::RULES
            .iter()
            .map(|rule| rule.target)
            .filter(|target| !self.catalog.contains(target))
            .collect()
    }
}
