//! Response payloads produced by the metrics façade.
//!
//! Every monetary amount in this file has already been rounded for display.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::aggregation::{CapitalSeries, EntitySeries, SeriesPoint, SummaryStats};
use crate::constants::{DEFAULT_PERIOD_START, DEFAULT_TOP_BANKERS};
use crate::utils::round_display;

/// Settings the façade needs besides the record store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsSettings {
    /// First date of the tracked period (`YYYY-MM-DD`).
    pub period_start: String,
    /// Size of the top-bankers ranking.
    pub top_n: usize,
    /// Case-insensitive banker name fragments left out of the dashboard
    /// capital figures.
    pub excluded_bankers: Vec<String>,
}

impl Default for MetricsSettings {
    fn default() -> Self {
        Self {
            period_start: DEFAULT_PERIOD_START.to_string(),
            top_n: DEFAULT_TOP_BANKERS,
            excluded_bankers: Vec::new(),
        }
    }
}

impl MetricsSettings {
    /// True when `banker` matches one of the excluded fragments.
    pub fn is_excluded_banker(&self, banker: &str) -> bool {
        let banker = banker.to_lowercase();
        self.excluded_bankers
            .iter()
            .filter(|fragment| !fragment.is_empty())
            .any(|fragment| banker.contains(&fragment.to_lowercase()))
    }
}

/// Uniform wrapper around every façade payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsEnvelope<T> {
    pub success: bool,
    pub data: T,
    /// First date of the series actually returned.
    pub start_date: Option<String>,
    /// Last date of the series actually returned.
    pub end_date: Option<String>,
    pub count: usize,
}

impl<T> MetricsEnvelope<T> {
    pub fn new(
        data: T,
        start_date: Option<&str>,
        end_date: Option<&str>,
        count: usize,
    ) -> Self {
        Self {
            success: true,
            data,
            start_date: start_date.map(str::to_string),
            end_date: end_date.map(str::to_string),
            count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatedValue {
    pub date: String,
    pub value: Decimal,
}

impl From<&SeriesPoint> for DatedValue {
    fn from(point: &SeriesPoint) -> Self {
        Self {
            date: point.date.clone(),
            value: round_display(point.value),
        }
    }
}

pub(crate) fn dated_values(points: &[SeriesPoint]) -> Vec<DatedValue> {
    points.iter().map(DatedValue::from).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsPayload {
    pub max: Decimal,
    pub min: Decimal,
    pub average: Decimal,
    pub total_clients: usize,
    pub total_days: usize,
}

impl From<&SummaryStats> for StatsPayload {
    fn from(stats: &SummaryStats) -> Self {
        Self {
            max: round_display(stats.max),
            min: round_display(stats.min),
            average: round_display(stats.average),
            total_clients: stats.total_clients,
            total_days: stats.total_days,
        }
    }
}

/// Latest value of one client, with its identity and contact details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientLatest {
    pub name: String,
    pub tax_id: String,
    /// Empty when the client has no banker.
    pub banker: String,
    /// Empty when the profile table has no email for the client.
    pub email: String,
    pub value: Decimal,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientEvolution {
    pub name: String,
    pub tax_id: String,
    pub banker: String,
    pub email: String,
    pub evolution: Vec<DatedValue>,
    pub initial_value: Decimal,
    pub final_value: Decimal,
    pub variation: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankerEvolution {
    pub name: String,
    pub client_count: usize,
    pub evolution: Vec<DatedValue>,
    pub initial_value: Decimal,
    pub final_value: Decimal,
    pub variation: Decimal,
}

impl From<&EntitySeries> for BankerEvolution {
    fn from(entity: &EntitySeries) -> Self {
        Self {
            name: entity.key.clone(),
            client_count: entity.member_names.len(),
            evolution: dated_values(&entity.points),
            initial_value: round_display(entity.first_value),
            final_value: round_display(entity.last_value),
            variation: round_display(entity.variation),
        }
    }
}

/// Cumulative capital raised by one banker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankerCapital {
    pub name: String,
    pub evolution: Vec<DatedValue>,
    pub total: Decimal,
    pub initial_value: Decimal,
    pub final_value: Decimal,
}

impl From<&CapitalSeries> for BankerCapital {
    fn from(series: &CapitalSeries) -> Self {
        Self {
            name: series.key.clone(),
            evolution: dated_values(&series.points),
            total: round_display(series.total),
            initial_value: round_display(series.initial_value()),
            final_value: round_display(series.final_value()),
        }
    }
}

/// Firm-wide cumulative capital raised.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapitalEvolution {
    pub evolution: Vec<DatedValue>,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopBanker {
    pub name: String,
    pub capital_raised: Decimal,
}

impl From<&CapitalSeries> for TopBanker {
    fn from(series: &CapitalSeries) -> Self {
        Self {
            name: series.key.clone(),
            capital_raised: round_display(series.total),
        }
    }
}

/// Headline figures of the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// Clients with a value on the last date.
    pub total_clients: usize,
    /// Clients with a value on the last date but not on the first.
    pub new_clients: usize,
    pub pl_total: Decimal,
    /// Percent change of the total between the first and last date.
    pub pl_variation_pct: Decimal,
    pub capital_raised: Decimal,
    pub top_bankers: Vec<TopBanker>,
    pub period_start: String,
    pub period_end: String,
}
