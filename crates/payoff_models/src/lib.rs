//! # Payoff Models (L2: Catalog and Resolution)
//!
//! Product catalogs and free-text name resolution.
//!
//! This crate provides:
//! - The structured-notes and options catalogs (`catalog`)
//! - Name resolution by exact key, normalised key, or ordered keyword
//!   rules (`resolver`)
//!
//! ## Design Principles
//!
//! - **Explicit registry**: catalogs are constructed once and injected into
//!   the resolver; there is no global state
//! - **Copy on read**: resolution hands out owned clones of catalog entries
//! - **Ordered rules**: keyword fallback is a single priority-ordered table
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use payoff_models::catalog::ProductCatalog;
//! use payoff_models::resolver::{NameResolver, Resolution};
//!
//! let catalog = Arc::new(ProductCatalog::standard().unwrap());
//! let resolver = NameResolver::new(catalog);
//!
//! match resolver.resolve("Papillon long") {
//!     Resolution::Chart(resolved) => assert_eq!(resolved.matched_key(), "Long Butterfly"),
//!     Resolution::NotChartable(reason) => panic!("unexpected: {}", reason),
//! }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod catalog;
pub mod resolver;
