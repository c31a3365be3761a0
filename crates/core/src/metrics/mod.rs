//! Metrics façade: named dashboard payloads built from the aggregation engine.

mod metrics_model;
mod metrics_service;
mod metrics_traits;

pub use metrics_model::{
    BankerCapital, BankerEvolution, CapitalEvolution, ClientEvolution, ClientLatest,
    DashboardSummary, DatedValue, MetricsEnvelope, MetricsSettings, StatsPayload, TopBanker,
};
pub use metrics_service::MetricsService;
pub use metrics_traits::MetricsServiceTrait;

#[cfg(test)]
mod metrics_service_tests;
