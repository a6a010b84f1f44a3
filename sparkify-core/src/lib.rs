// sparkify-core/src/lib.rs

// 1. Mandatory documentation for production code
#![allow(missing_docs)]

// 2. Memory safety
#![deny(unsafe_code)]
// 3. Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
// 4. Performance
#![warn(clippy::perf)]

// --- MODULES HEXAGONAUX ---

// 1. Ports (Interfaces / Traits)
// Contract of the relational store (DDL + bulk insert).
pub mod ports;

// 2. Domain (Cœur du métier)
// Records, star rows, calendar decomposition, table catalogue.
// Depends on nothing else in the crate.
pub mod domain;

// 3. Infrastructure (Adapters)
// Filesystem record source, glob matching, DuckDB, YAML config.
pub mod infrastructure;

// 4. Application (Use Cases)
// Collector -> Transformer -> Loader orchestration.
pub mod application;

// --- GESTION DES ERREURS GLOBALE ---
pub mod error;

// --- RE-EXPORTS (FACADE) ---
// use sparkify_core::SparkifyError;
pub use error::SparkifyError;
