//! `orgmatch-resolve` — business-entity deduplication engine.
//!
//! Pure engine crate: receives loaded records, normalizes their noisy
//! attributes into canonical forms, and clusters them per country with a
//! tiered fuzzy-match policy. No CLI dependencies.

pub mod block;
pub mod cluster;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod normalize;
pub mod similarity;

pub use config::ResolveConfig;
pub use engine::{load_csv_records, run, write_csv_records};
pub use error::ResolveError;
pub use model::{Record, ResolveResult};
