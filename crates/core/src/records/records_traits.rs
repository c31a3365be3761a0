//! Record store traits.

use super::records_model::{ClientProfile, ClientRecord, InflowEvent};
use crate::errors::Result;

/// Read-only access to the three source datasets.
///
/// Implementations must re-read their backing storage on every call so that a
/// file replaced by the extraction job is picked up by the next request.
pub trait RecordStoreTrait: Send + Sync {
    /// Loads the daily-value table, one record per row, in file order.
    fn load_client_records(&self) -> Result<Vec<ClientRecord>>;

    /// Loads the inflow event log in file order.
    fn load_inflow_events(&self) -> Result<Vec<InflowEvent>>;

    /// Loads the client profile table in file order.
    fn load_client_profiles(&self) -> Result<Vec<ClientProfile>>;
}
