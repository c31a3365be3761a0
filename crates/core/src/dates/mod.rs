//! Date-domain resolution.
//!
//! The daily-value table has no schema: a key is treated as a date purely by
//! its shape. That heuristic lives in [`is_date_key`] and nowhere else.

mod date_domain;

pub use date_domain::*;
