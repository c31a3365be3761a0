//! Aggregation engine.
//!
//! Pure functions over the loaded records: per-date totals, per-entity
//! rollups, cumulative capital-raised series and summary statistics. All
//! arithmetic is full precision; rounding belongs to the payload builders in
//! [`crate::metrics`].

mod aggregation_engine;
mod aggregation_model;

pub use aggregation_engine::*;
pub use aggregation_model::*;
