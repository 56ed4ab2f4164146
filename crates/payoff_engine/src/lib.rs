//! # Payoff Engine (L3: Sampling and Facade)
//!
//! Turns resolved payoff formulas into plottable curves.
//!
//! This crate provides:
//! - [`sampler::ArraySampler`]: evenly spaced evaluation over a formula's domain,
//!   with one curve per representative year for memory products and extra
//!   reference curves where the formula declares them
//! - [`engine::PayoffEngine`]: the `resolve` / `sample` / `plot` facade over an
//!   injected catalog
//! - [`metrics::PayoffSummary`]: comparison metrics computed from a sampled curve
//! - [`config`]: engine configuration from defaults, TOML, environment and CLI
//!
//! ## Example
//!
//! ```
//! use payoff_engine::config::EngineConfig;
//! use payoff_engine::engine::PayoffEngine;
//! use payoff_engine::sampler::SampledCurve;
//!
//! let engine = PayoffEngine::standard(EngineConfig::default()).unwrap();
//! let handle = engine.resolve("Bull Call Spread").into_resolved().unwrap();
//!
//! match engine.sample(&handle, 100.0, 100).unwrap() {
//!     SampledCurve::Standard(points) => {
//!         assert_eq!(points.len(), 101);
//!         assert_eq!(points[0].x, 50.0);
//!         assert_eq!(points[100].x, 150.0);
//!     }
//!     other => panic!("unexpected curve: {:?}", other),
//! }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod config;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod sampler;

pub use engine::{Chart, PayoffEngine, Plot};
pub use error::EngineError;
