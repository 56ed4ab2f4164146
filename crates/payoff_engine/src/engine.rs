//! The payoff engine facade.
//!
//! [`PayoffEngine`] owns a resolver over an injected catalog and a sampler
//! configured from [`EngineConfig`]. It exposes the two external operations,
//! `resolve` and `sample`, plus `plot` and `summarize` conveniences.

use std::sync::Arc;

use payoff_core::formula::PayoffFormula;
use payoff_models::catalog::ProductCatalog;
use payoff_models::resolver::{
    MatchMethod, NameResolver, NotChartableReason, Resolution, ResolvedFormula,
};
use serde::Serialize;
use tracing::info;

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::metrics::PayoffSummary;
use crate::sampler::{ArraySampler, SampledCurve};

/// A resolved and sampled product, ready for a chart renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    /// Catalog key that matched
    pub matched_key: String,
    /// Resolution step that matched
    pub method: MatchMethod,
    /// The formula with its display metadata
    pub formula: PayoffFormula,
    /// Sampled curves
    pub curve: SampledCurve,
}

/// Outcome of [`PayoffEngine::plot`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Plot {
    /// A chartable product
    Chart(Chart),
    /// Placeholder instead of a chart
    NotChartable {
        /// Why no chart is available
        reason: NotChartableReason,
    },
}

/// Resolution and sampling over one catalog.
#[derive(Debug, Clone)]
pub struct PayoffEngine {
    resolver: NameResolver,
    sampler: ArraySampler,
    config: EngineConfig,
}

impl PayoffEngine {
    /// Creates an engine over `catalog`.
    ///
    /// # Errors
    /// `EngineError::Config` if `config` fails validation.
    pub fn new(catalog: Arc<ProductCatalog>, config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let sampler = ArraySampler::new(config.phoenix_years.clone(), config.initial_level);
        Ok(Self {
            resolver: NameResolver::new(catalog),
            sampler,
            config,
        })
    }

    /// Creates an engine over the standard catalogs.
    ///
    /// # Errors
    /// Catalog construction or configuration errors.
    pub fn standard(config: EngineConfig) -> Result<Self, EngineError> {
        let catalog = Arc::new(ProductCatalog::standard()?);
        let engine = Self::new(catalog, config)?;
        info!(
            point_count = engine.config.point_count,
            initial_level = engine.config.initial_level,
            "Payoff engine ready"
        );
        Ok(engine)
    }

    /// Active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The shared catalog.
    pub fn catalog(&self) -> &Arc<ProductCatalog> {
        self.resolver.catalog()
    }

    /// The resolver.
    pub fn resolver(&self) -> &NameResolver {
        &self.resolver
    }

    /// The sampler.
    pub fn sampler(&self) -> &ArraySampler {
        &self.sampler
    }

    /// Resolves a free-text product name. Never fails.
    pub fn resolve(&self, name: &str) -> Resolution {
        self.resolver.resolve(name)
    }

    /// Samples a resolved formula.
    ///
    /// # Errors
    /// `EngineError::InvalidPointCount` when `point_count` is zero.
    pub fn sample(
        &self,
        handle: &ResolvedFormula,
        initial_level: f64,
        point_count: usize,
    ) -> Result<SampledCurve, EngineError> {
        self.sampler
            .sample(handle.formula(), initial_level, point_count)
    }

    /// Samples with the configured initial level and point count.
    ///
    /// # Errors
    /// None in practice: the configured point count is validated.
    pub fn sample_default(&self, handle: &ResolvedFormula) -> Result<SampledCurve, EngineError> {
        self.sample(handle, self.config.initial_level, self.config.point_count)
    }

    /// Resolves and samples `name` with the configured defaults.
    ///
    /// # Errors
    /// Propagates sampling errors.
    pub fn plot(&self, name: &str) -> Result<Plot, EngineError> {
        match self.resolve(name) {
            Resolution::Chart(resolved) => {
                let curve = self.sample_default(&resolved)?;
                let method = resolved.method();
                let matched_key = resolved.matched_key().to_string();
                Ok(Plot::Chart(Chart {
                    matched_key,
                    method,
                    formula: resolved.into_formula(),
                    curve,
                }))
            }
            Resolution::NotChartable(reason) => Ok(Plot::NotChartable { reason }),
        }
    }

    /// Comparison metrics for a resolved formula at the configured defaults.
    ///
    /// # Errors
    /// Propagates sampling errors.
    pub fn summarize(&self, handle: &ResolvedFormula) -> Result<Option<PayoffSummary>, EngineError> {
        let curve = self.sample_default(handle)?;
        Ok(PayoffSummary::from_curve(
            &curve,
            handle.formula().info().kind,
            self.config.initial_level,
        ))
    }
}
