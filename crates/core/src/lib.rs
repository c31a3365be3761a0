//! Prunus Core - P&L aggregation for the wealth dashboard.
//!
//! This crate loads the client daily-value table and the inflow event log,
//! derives totals, per-client and per-banker rollups and cumulative
//! capital-raised series, and shapes them into dashboard payloads. It is
//! synchronous and knows nothing about HTTP; `prunus-server` exposes it.

pub mod aggregation;
pub mod constants;
pub mod dates;
pub mod errors;
pub mod metrics;
pub mod records;
pub mod utils;

// Re-export the façade types the server wires up
pub use metrics::{MetricsService, MetricsServiceTrait, MetricsSettings};
pub use records::{FileRecordStore, RecordStoreTrait};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
