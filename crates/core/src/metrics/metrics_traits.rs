use super::metrics_model::{
    BankerCapital, BankerEvolution, CapitalEvolution, ClientEvolution, ClientLatest,
    DashboardSummary, DatedValue, MetricsEnvelope, StatsPayload, TopBanker,
};
use crate::errors::Result;

/// Trait for the dashboard metrics operations.
///
/// Every call reads the record store afresh. A store that cannot be read, or
/// that holds no client records, yields `Error::NoData`; records without any
/// date key yield `Error::NoDates`.
pub trait MetricsServiceTrait: Send + Sync {
    /// Daily firm-wide total from the start of the tracked period.
    fn get_total_series(&self) -> Result<MetricsEnvelope<Vec<DatedValue>>>;

    fn get_stats(&self) -> Result<MetricsEnvelope<StatsPayload>>;

    /// Clients with a value on the last known date.
    ///
    /// A client whose last-date cell is an explicit null is left out, not
    /// reported with a zero value.
    fn get_clients_latest(&self) -> Result<MetricsEnvelope<Vec<ClientLatest>>>;

    fn get_clients_evolution(&self) -> Result<MetricsEnvelope<Vec<ClientEvolution>>>;

    fn get_bankers_evolution(&self) -> Result<MetricsEnvelope<Vec<BankerEvolution>>>;

    /// Cumulative capital raised per banker, sorted by banker name.
    fn get_bankers_capital(&self) -> Result<MetricsEnvelope<Vec<BankerCapital>>>;

    fn get_capital_evolution(&self) -> Result<MetricsEnvelope<CapitalEvolution>>;

    /// Bankers with the most capital raised, best first.
    fn get_top_bankers(&self) -> Result<MetricsEnvelope<Vec<TopBanker>>>;

    fn get_dashboard_summary(&self) -> Result<MetricsEnvelope<DashboardSummary>>;
}
