use log::{debug, warn};
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use super::metrics_model::{
    dated_values, BankerCapital, BankerEvolution, CapitalEvolution, ClientEvolution,
    ClientLatest, DashboardSummary, DatedValue, MetricsEnvelope, MetricsSettings, StatsPayload,
    TopBanker,
};
use super::metrics_traits::MetricsServiceTrait;
use crate::aggregation::{
    cumulative_capital, distinct_client_count, entity_rollup, summary_stats, top_by_capital,
    total_by_date, tracked_total_series, CapitalSeries, GroupBy, SeriesPoint,
};
use crate::constants::ALL_GROUP_KEY;
use crate::dates::{resolve_date_domain, DateDomain};
use crate::errors::{Error, Result};
use crate::records::{ClientProfile, ClientRecord, InflowEvent, RecordStoreTrait};
use crate::utils::round_display;

/// Client records of one request, with everything derived from them up front.
struct Snapshot {
    records: Vec<ClientRecord>,
    domain: DateDomain,
    emails: HashMap<String, String>,
}

impl Snapshot {
    fn email_of(&self, name: &str) -> String {
        self.emails.get(name).cloned().unwrap_or_default()
    }

    /// First record carrying `name`; identity fields of a client rollup come from it.
    fn record_named(&self, name: &str) -> Option<&ClientRecord> {
        self.records.iter().find(|record| record.name == name)
    }
}

/// Smallest first date and largest last date over a set of series.
fn span<'a, I>(ranges: I) -> (Option<&'a str>, Option<&'a str>)
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    ranges
        .into_iter()
        .fold((None, None), |(start, end), (first, last)| {
            (
                Some(start.map_or(first, |s: &str| s.min(first))),
                Some(end.map_or(last, |e: &str| e.max(last))),
            )
        })
}

fn points_span(points: &[SeriesPoint]) -> Option<(&str, &str)> {
    Some((points.first()?.date.as_str(), points.last()?.date.as_str()))
}

/// Fills in a missing banker from the profile table. The last profile row
/// for a name wins.
fn apply_banker_fallback(records: &mut [ClientRecord], profiles: &[ClientProfile]) {
    let bankers: HashMap<&str, &str> = profiles
        .iter()
        .filter_map(|p| p.banker_name.as_deref().map(|b| (p.name.as_str(), b)))
        .collect();

    for record in records.iter_mut().filter(|r| r.banker_name.is_none()) {
        if let Some(banker) = bankers.get(record.name.as_str()) {
            debug!(
                "Using profile banker '{}' for client '{}'",
                banker, record.name
            );
            record.banker_name = Some(banker.to_string());
        }
    }
}

/// Service computing the dashboard metrics from a record store.
pub struct MetricsService {
    store: Arc<dyn RecordStoreTrait>,
    settings: MetricsSettings,
}

impl MetricsService {
    pub fn new(store: Arc<dyn RecordStoreTrait>, settings: MetricsSettings) -> Self {
        MetricsService { store, settings }
    }

    pub fn settings(&self) -> &MetricsSettings {
        &self.settings
    }

    fn load_records(&self) -> Result<Vec<ClientRecord>> {
        let records = self.store.load_client_records().map_err(|e| {
            warn!("Client records unavailable: {}", e);
            Error::NoData
        })?;
        if records.is_empty() {
            return Err(Error::NoData);
        }
        Ok(records)
    }

    /// A missing profile table only costs the emails and banker fallback.
    fn load_profiles(&self) -> Vec<ClientProfile> {
        self.store.load_client_profiles().unwrap_or_else(|e| {
            warn!("Client profiles unavailable, continuing without them: {}", e);
            Vec::new()
        })
    }

    fn load_inflows(&self) -> Result<Vec<InflowEvent>> {
        self.store.load_inflow_events().map_err(|e| {
            warn!("Inflow events unavailable: {}", e);
            Error::NoData
        })
    }

    fn load_snapshot(&self) -> Result<Snapshot> {
        let mut records = self.load_records()?;
        let profiles = self.load_profiles();
        apply_banker_fallback(&mut records, &profiles);

        let domain = resolve_date_domain(&records);
        if domain.is_empty() {
            return Err(Error::NoDates);
        }

        let emails = profiles
            .into_iter()
            .filter_map(|p| p.email.map(|email| (p.name, email)))
            .collect();

        Ok(Snapshot {
            records,
            domain,
            emails,
        })
    }

    fn banker_capital(&self, snapshot: &Snapshot) -> Result<Vec<CapitalSeries>> {
        let events = self.load_inflows()?;
        Ok(cumulative_capital(
            &snapshot.records,
            &events,
            GroupBy::Banker,
            &self.settings.period_start,
        ))
    }

    /// Capital figures for the dashboard: total raised and the top ranking,
    /// without the excluded bankers. An unreadable inflow log reports zero.
    fn dashboard_capital(&self, snapshot: &Snapshot) -> (Decimal, Vec<TopBanker>) {
        let events = match self.store.load_inflow_events() {
            Ok(events) => events,
            Err(e) => {
                warn!("Inflow events unavailable, capital reported as zero: {}", e);
                return (Decimal::ZERO, Vec::new());
            }
        };

        let included: Vec<ClientRecord> = snapshot
            .records
            .iter()
            .filter(|record| !self.settings.is_excluded_banker(record.banker_key()))
            .cloned()
            .collect();

        let capital = cumulative_capital(
            &included,
            &events,
            GroupBy::Banker,
            &self.settings.period_start,
        );
        let total: Decimal = capital.iter().map(|series| series.total).sum();
        let top = top_by_capital(&capital, self.settings.top_n)
            .iter()
            .map(TopBanker::from)
            .collect();

        (round_display(total), top)
    }
}

impl MetricsServiceTrait for MetricsService {
    fn get_total_series(&self) -> Result<MetricsEnvelope<Vec<DatedValue>>> {
        let snapshot = self.load_snapshot()?;
        let tracked = tracked_total_series(
            &total_by_date(&snapshot.records),
            &self.settings.period_start,
        );

        let (start, end) = span(points_span(&tracked));
        Ok(MetricsEnvelope::new(
            dated_values(&tracked),
            start,
            end,
            tracked.len(),
        ))
    }

    fn get_stats(&self) -> Result<MetricsEnvelope<StatsPayload>> {
        let snapshot = self.load_snapshot()?;
        let tracked = tracked_total_series(
            &total_by_date(&snapshot.records),
            &self.settings.period_start,
        );
        let stats = summary_stats(&tracked, distinct_client_count(&snapshot.records))?;

        let (start, end) = span(points_span(&tracked));
        Ok(MetricsEnvelope::new(
            StatsPayload::from(&stats),
            start,
            end,
            stats.total_days,
        ))
    }

    fn get_clients_latest(&self) -> Result<MetricsEnvelope<Vec<ClientLatest>>> {
        let snapshot = self.load_snapshot()?;
        let (_, last_date) = snapshot.domain.bounds()?;

        let clients: Vec<ClientLatest> = snapshot
            .records
            .iter()
            .filter_map(|record| {
                let value = record.value_on(last_date)?;
                Some(ClientLatest {
                    name: record.name.clone(),
                    tax_id: record.tax_id.clone(),
                    banker: record.banker_name.clone().unwrap_or_default(),
                    email: snapshot.email_of(&record.name),
                    value: round_display(value),
                    date: last_date.to_string(),
                })
            })
            .collect();

        let count = clients.len();
        Ok(MetricsEnvelope::new(
            clients,
            Some(last_date),
            Some(last_date),
            count,
        ))
    }

    fn get_clients_evolution(&self) -> Result<MetricsEnvelope<Vec<ClientEvolution>>> {
        let snapshot = self.load_snapshot()?;
        let rollup = entity_rollup(&snapshot.records, GroupBy::Client);

        let clients: Vec<ClientEvolution> = rollup
            .iter()
            .map(|entity| {
                let record = snapshot.record_named(&entity.key);
                ClientEvolution {
                    name: entity.key.clone(),
                    tax_id: record.map(|r| r.tax_id.clone()).unwrap_or_default(),
                    banker: record
                        .and_then(|r| r.banker_name.clone())
                        .unwrap_or_default(),
                    email: snapshot.email_of(&entity.key),
                    evolution: dated_values(&entity.points),
                    initial_value: round_display(entity.first_value),
                    final_value: round_display(entity.last_value),
                    variation: round_display(entity.variation),
                }
            })
            .collect();

        let (start, end) = span(rollup.iter().filter_map(|e| points_span(&e.points)));
        let count = clients.len();
        Ok(MetricsEnvelope::new(clients, start, end, count))
    }

    fn get_bankers_evolution(&self) -> Result<MetricsEnvelope<Vec<BankerEvolution>>> {
        let snapshot = self.load_snapshot()?;
        let rollup = entity_rollup(&snapshot.records, GroupBy::Banker);

        let bankers: Vec<BankerEvolution> = rollup.iter().map(BankerEvolution::from).collect();

        let (start, end) = span(rollup.iter().filter_map(|e| points_span(&e.points)));
        let count = bankers.len();
        Ok(MetricsEnvelope::new(bankers, start, end, count))
    }

    fn get_bankers_capital(&self) -> Result<MetricsEnvelope<Vec<BankerCapital>>> {
        let snapshot = self.load_snapshot()?;
        let mut capital = self.banker_capital(&snapshot)?;
        capital.sort_by(|a, b| a.key.cmp(&b.key));

        let bankers: Vec<BankerCapital> = capital.iter().map(BankerCapital::from).collect();

        let (start, end) = span(capital.iter().filter_map(|s| points_span(&s.points)));
        let count = bankers.len();
        Ok(MetricsEnvelope::new(bankers, start, end, count))
    }

    fn get_capital_evolution(&self) -> Result<MetricsEnvelope<CapitalEvolution>> {
        let snapshot = self.load_snapshot()?;
        let events = self.load_inflows()?;

        let firm = cumulative_capital(
            &snapshot.records,
            &events,
            GroupBy::All,
            &self.settings.period_start,
        )
        .into_iter()
        .next()
        .unwrap_or_else(|| CapitalSeries {
            key: ALL_GROUP_KEY.to_string(),
            points: snapshot
                .domain
                .iter()
                .map(|date| SeriesPoint::new(date, Decimal::ZERO))
                .collect(),
            total: Decimal::ZERO,
        });

        let (start, end) = span(points_span(&firm.points));
        let count = firm.points.len();
        Ok(MetricsEnvelope::new(
            CapitalEvolution {
                evolution: dated_values(&firm.points),
                total: round_display(firm.total),
            },
            start,
            end,
            count,
        ))
    }

    fn get_top_bankers(&self) -> Result<MetricsEnvelope<Vec<TopBanker>>> {
        let snapshot = self.load_snapshot()?;
        let capital = self.banker_capital(&snapshot)?;
        let top = top_by_capital(&capital, self.settings.top_n);

        let (start, end) = span(top.iter().filter_map(|s| points_span(&s.points)));
        let bankers: Vec<TopBanker> = top.iter().map(TopBanker::from).collect();
        let count = bankers.len();
        Ok(MetricsEnvelope::new(bankers, start, end, count))
    }

    fn get_dashboard_summary(&self) -> Result<MetricsEnvelope<DashboardSummary>> {
        let snapshot = self.load_snapshot()?;
        let (first_date, last_date) = snapshot.domain.bounds()?;

        let mut first_clients: HashSet<&str> = HashSet::new();
        let mut last_clients: HashSet<&str> = HashSet::new();
        let mut first_total = Decimal::ZERO;
        let mut last_total = Decimal::ZERO;

        for record in &snapshot.records {
            if let Some(value) = record.value_on(first_date) {
                first_clients.insert(record.name.as_str());
                first_total += value;
            }
            if let Some(value) = record.value_on(last_date) {
                last_clients.insert(record.name.as_str());
                last_total += value;
            }
        }

        let new_clients = last_clients.difference(&first_clients).count();
        let pl_variation_pct = if first_total.is_zero() {
            Decimal::ZERO
        } else {
            (last_total - first_total)
                .checked_div(first_total)
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
                .unwrap_or_else(|| {
                    warn!(
                        "P&L variation out of range ({} -> {}), reporting 0",
                        first_total, last_total
                    );
                    Decimal::ZERO
                })
        };

        let (capital_raised, top_bankers) = self.dashboard_capital(&snapshot);

        let summary = DashboardSummary {
            total_clients: last_clients.len(),
            new_clients,
            pl_total: round_display(last_total),
            pl_variation_pct: round_display(pl_variation_pct),
            capital_raised,
            top_bankers,
            period_start: first_date.to_string(),
            period_end: last_date.to_string(),
        };

        let count = summary.total_clients;
        Ok(MetricsEnvelope::new(
            summary,
            Some(first_date),
            Some(last_date),
            count,
        ))
    }
}
