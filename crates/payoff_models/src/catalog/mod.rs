//! Product catalogs.
//!
//! Two immutable tables are provided:
//! - [`structured_notes`]: capital protection, income, participation,
//!   leverage and FX-structured notes
//! - [`options`]: vanilla, spread, volatility, digital, barrier,
//!   path-dependent and arbitrage option positions
//!
//! A [`ProductCatalog`] owns both and answers keyed lookups. It is built once
//! and never mutated afterwards; share it behind an `Arc`.

mod error;
pub mod options;
pub mod structured_notes;

pub use error::CatalogError;

use std::collections::HashMap;

use payoff_core::formula::{CatalogKind, Family, PayoffFormula};
use tracing::info;

/// One keyed table of formulas, in declaration order.
#[derive(Debug, Clone)]
pub struct Catalog {
    kind: CatalogKind,
    entries: Vec<PayoffFormula>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Creates an empty catalog of the given kind.
    pub fn new(kind: CatalogKind) -> Self {
        Self {
            kind,
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Builds a catalog from formulas.
    ///
    /// # Errors
    /// `CatalogError::DuplicateKey` if two formulas share a name.
    pub fn from_formulas(
        kind: CatalogKind,
        formulas: impl IntoIterator<Item = PayoffFormula>,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::new(kind);
        for formula in formulas {
            catalog.insert(formula)?;
        }
        Ok(catalog)
    }

    fn insert(&mut self, formula: PayoffFormula) -> Result<(), CatalogError> {
        let name = formula.name().to_string();
        if self.index.contains_key(&name) {
            return Err(CatalogError::DuplicateKey { name });
        }
        self.index.insert(name, self.entries.len());
        self.entries.push(formula);
        Ok(())
    }

    /// Catalog kind.
    #[inline]
    pub fn kind(&self) -> CatalogKind {
        self.kind
    }

    /// Exact-key lookup.
    pub fn get(&self, name: &str) -> Option<&PayoffFormula> {
        self.index.get(name).map(|&i| &self.entries[i])
    }

    /// Whether the key exists.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Number of formulas.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Formulas in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &PayoffFormula> {
        self.entries.iter()
    }
}

/// The structured-notes and options catalogs as one search space.
///
/// # Examples
/// ```
/// use payoff_models::catalog::ProductCatalog;
///
/// let catalog = ProductCatalog::standard().unwrap();
/// assert!(catalog.get("Bull Call Spread").is_some());
/// assert!(catalog.get("Athena Autocall").is_some());
/// assert!(catalog.get("bull call spread").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct ProductCatalog {
    structured_notes: Catalog,
    options: Catalog,
}

impl ProductCatalog {
    /// Combines two catalogs. Lookups try structured notes first.
    pub fn new(structured_notes: Catalog, options: Catalog) -> Self {
        Self {
            structured_notes,
            options,
        }
    }

    /// Builds the standard structured-notes and options tables.
    ///
    /// # Errors
    /// Propagates formula validation and duplicate-key errors from the tables.
    pub fn standard() -> Result<Self, CatalogError> {
        let structured_notes = Catalog::from_formulas(
            CatalogKind::StructuredNote,
            structured_notes::formulas()?,
        )?;
        let options = Catalog::from_formulas(CatalogKind::Option, options::formulas()?)?;
        info!(
            structured_notes = structured_notes.len(),
            options = options.len(),
            "Product catalogs loaded"
        );
        Ok(Self::new(structured_notes, options))
    }

    /// Exact-key lookup across both catalogs.
    pub fn get(&self, name: &str) -> Option<&PayoffFormula> {
        self.structured_notes
            .get(name)
            .or_else(|| self.options.get(name))
    }

    /// Whether either catalog holds the key.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Structured-notes catalog.
    pub fn structured_notes(&self) -> &Catalog {
        &self.structured_notes
    }

    /// Options catalog.
    pub fn options(&self) -> &Catalog {
        &self.options
    }

    /// Total number of formulas.
    pub fn len(&self) -> usize {
        self.structured_notes.len() + self.options.len()
    }

    /// Whether both catalogs are empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All formulas, structured notes first.
    pub fn iter(&self) -> impl Iterator<Item = &PayoffFormula> {
        self.structured_notes.iter().chain(self.options.iter())
    }

    /// Sorted canonical names.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.iter().map(|f| f.name()).collect();
        names.sort_unstable();
        names
    }

    /// Formulas of one family.
    pub fn by_family(&self, family: Family) -> impl Iterator<Item = &PayoffFormula> {
        self.iter().filter(move |f| f.info().family == family)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use payoff_core::shape::PayoffShape;

    fn locked(name: &str) -> PayoffFormula {
        PayoffFormula::builder(name, PayoffShape::Locked { value: 1.0 })
            .build()
            .unwrap()
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let result = Catalog::from_formulas(
            CatalogKind::Option,
            vec![locked("Box Spread"), locked("Box Spread")],
        );
        assert_eq!(
            result.unwrap_err(),
            CatalogError::DuplicateKey {
                name: "Box Spread".to_string()
            }
        );
    }

    #[test]
    fn test_structured_notes_take_precedence() {
        let notes = Catalog::from_formulas(CatalogKind::StructuredNote, vec![locked("Shared")])
            .unwrap();
        let mut shadowed = locked("Shared");
        shadowed.set_parameter("value", 2.0).unwrap();
        let options = Catalog::from_formulas(CatalogKind::Option, vec![shadowed]).unwrap();

        let catalog = ProductCatalog::new(notes, options);
        let found = catalog.get("Shared").unwrap();
        assert_eq!(found.evaluate(100.0, 100.0, None), 1.0);
    }

    #[test]
    fn test_standard_catalog_keys_unique_across_tables() {
        let catalog = ProductCatalog::standard().unwrap();
        let mut names = catalog.names();
        let total = names.len();
        names.dedup();
        assert_eq!(names.len(), total);
        assert_eq!(total, catalog.len());
    }

    #[test]
    fn test_standard_catalog_kinds_consistent() {
        let catalog = ProductCatalog::standard().unwrap();
        assert!(catalog
            .structured_notes()
            .iter()
            .all(|f| f.info().kind == CatalogKind::StructuredNote));
        assert!(catalog
            .options()
            .iter()
            .all(|f| f.info().kind == CatalogKind::Option));
    }

    #[test]
    fn test_every_family_represented() {
        let catalog = ProductCatalog::standard().unwrap();
        for family in Family::ALL {
            assert!(
                catalog.by_family(family).next().is_some(),
                "no product in family {}",
                family
            );
        }
    }

    #[test]
    fn test_every_formula_finite_over_domain() {
        let catalog = ProductCatalog::standard().unwrap();
        for formula in catalog.iter() {
            let domain = formula.domain();
            for i in 0..=200 {
                let x = domain.min() + domain.width() * i as f64 / 200.0;
                for years in [None, Some(1.0), Some(6.0)] {
                    let y = formula.evaluate(x, 100.0, years);
                    assert!(y.is_finite(), "{} at {} is {}", formula.name(), x, y);
                }
            }
        }
    }
}
