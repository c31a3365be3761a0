//! Record store loading.
//!
//! Reads the daily-value table, the inflow event log and the client profile
//! table into in-memory structures. Every call re-reads the files; nothing is
//! cached between calls.

mod records_loader;
mod records_model;
mod records_traits;

pub use records_loader::*;
pub use records_model::*;
pub use records_traits::*;
