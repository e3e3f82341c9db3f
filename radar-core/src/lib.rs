// radar-core/src/lib.rs

// 1. Documentation
#![allow(missing_docs)]

// 2. Memory safety
#![deny(unsafe_code)]
// 3. Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
// 4. Performance
#![warn(clippy::perf)]

// --- MODULES HEXAGONAUX ---

// 1. Ports (I/O contracts: Fetcher, Parser, Normalizer, Sink)
pub mod ports;

// 2. Domain (Series, Observations, Quality engine)
// Pure logic, depends on nothing else in the crate.
pub mod domain;

// 3. Infrastructure (Adapters: HTTP, CSV, Parquet, YAML config, reports)
// Depends on Domain and Ports.
pub mod infrastructure;

// 4. Application (Use Cases)
// Orchestration: fetch -> parse -> normalize -> quality -> write
pub mod application;

// --- GESTION DES ERREURS GLOBALE ---
pub mod error;

// --- RE-EXPORTS (FACADE) ---
pub use domain::quality::{QualityEngine, QualityProfile, QualityReport};
pub use domain::series::{Frequency, Observation, Provenance, Series};
pub use error::RadarError;
