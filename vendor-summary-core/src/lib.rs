// vendor-summary-core/src/lib.rs

#![allow(missing_docs)]
// Memory safety
#![deny(unsafe_code)]
// Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::perf)]

// --- HEXAGONAL MODULES ---

// 1. Ports: the store contract (Connector) the pipeline talks to.
pub mod ports;

// 2. Domain: facts, reconciliation, enrichment, derived metrics.
// Depends on nothing but itself.
pub mod domain;

// 3. Infrastructure: DuckDB / SQLite adapters, SQL templates, config files.
pub mod infrastructure;

// 4. Application: Aggregator -> Enricher -> Publisher orchestration.
pub mod application;

pub mod error;

// --- RE-EXPORTS ---
pub use error::SummaryError;
