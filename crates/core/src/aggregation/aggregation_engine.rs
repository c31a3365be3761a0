use log::debug;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use super::aggregation_model::{CapitalSeries, EntitySeries, GroupBy, SeriesPoint, SummaryStats};
use crate::dates::{is_date_key, resolve_date_domain};
use crate::errors::{Error, Result};
use crate::records::{ClientRecord, DailyValue, InflowEvent};

/// Sums every numeric value per date across all clients.
///
/// Nulls and absent keys contribute nothing. A non-numeric placeholder adds
/// nothing either, but still gives its date an entry (zero if nothing else
/// lands there).
pub fn total_by_date(records: &[ClientRecord]) -> BTreeMap<String, Decimal> {
    let mut totals: BTreeMap<String, Decimal> = BTreeMap::new();

    for record in records {
        for (date, cell) in record
            .daily_values
            .iter()
            .filter(|(key, _)| is_date_key(key))
        {
            match cell {
                DailyValue::Amount(amount) => {
                    *totals.entry(date.clone()).or_insert(Decimal::ZERO) += *amount;
                }
                DailyValue::Unparseable(raw) => {
                    totals.entry(date.clone()).or_insert(Decimal::ZERO);
                    debug!(
                        "Skipping non-numeric value {} for client '{}' on {}",
                        raw, record.name, date
                    );
                }
                DailyValue::Missing => {}
            }
        }
    }

    totals
}

/// The externally reported total series: dates on or after `period_start`.
pub fn tracked_total_series(
    totals: &BTreeMap<String, Decimal>,
    period_start: &str,
) -> Vec<SeriesPoint> {
    totals
        .range(period_start.to_string()..)
        .map(|(date, value)| SeriesPoint::new(date.clone(), *value))
        .collect()
}

/// Groups records by `key_fn`, keeping first-appearance order of the keys.
fn group_records<'a, F>(records: &'a [ClientRecord], key_fn: F) -> Vec<(String, Vec<&'a ClientRecord>)>
where
    F: Fn(&'a ClientRecord) -> &'a str,
{
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<&ClientRecord>)> = Vec::new();

    for record in records {
        let key = key_fn(record);
        match index.get(key) {
            Some(&position) => groups[position].1.push(record),
            None => {
                index.insert(key, groups.len());
                groups.push((key.to_string(), vec![record]));
            }
        }
    }

    groups
}

/// Per-entity rollup over the full date domain.
///
/// For each group and each domain date, sums the members' numeric values.
/// Groups without a single numeric value are left out.
pub fn entity_rollup(records: &[ClientRecord], group_by: GroupBy) -> Vec<EntitySeries> {
    let domain = resolve_date_domain(records);

    group_records(records, |record| group_by.key_of(record))
        .into_iter()
        .filter_map(|(key, members)| {
            let points: Vec<SeriesPoint> = domain
                .iter()
                .filter_map(|date| {
                    members
                        .iter()
                        .filter_map(|member| member.value_on(date))
                        .reduce(|acc, value| acc + value)
                        .map(|total| SeriesPoint::new(date, total))
                })
                .collect();

            let member_names = members.iter().map(|m| m.name.clone()).collect();
            let entity = EntitySeries::from_points(key, member_names, points);
            if entity.is_none() {
                debug!("Entity has no populated dates, excluded from rollup");
            }
            entity
        })
        .collect()
}

/// The first date on which a client has a numeric value, with that value.
pub fn first_present_value(record: &ClientRecord) -> Option<(&str, Decimal)> {
    record
        .daily_values
        .iter()
        .filter(|(key, _)| is_date_key(key))
        .find_map(|(date, cell)| cell.amount().map(|value| (date.as_str(), value)))
}

/// Per-group contributions by date, in first-contribution order.
#[derive(Default)]
struct Contributions {
    index: HashMap<String, usize>,
    groups: Vec<(String, BTreeMap<String, Decimal>)>,
}

impl Contributions {
    fn add(&mut self, group: &str, date: &str, amount: Decimal) {
        let position = match self.index.get(group) {
            Some(&position) => position,
            None => {
                self.index.insert(group.to_string(), self.groups.len());
                self.groups.push((group.to_string(), BTreeMap::new()));
                self.groups.len() - 1
            }
        };
        *self.groups[position]
            .1
            .entry(date.to_string())
            .or_insert(Decimal::ZERO) += amount;
    }
}

/// Cumulative capital raised ("captação") per group.
///
/// Each group's accumulator starts at zero and grows by
/// - the positive inflow events of the group's clients (non-positive events
///   are ignored, never subtracted), and
/// - once per client record, the client's first present value when that value
///   appears strictly after `period_start`; clients already observed on the
///   period start are pre-existing balances, not new capital.
///
/// The accumulator is emitted on every date of the union of the value domain
/// and the group's contribution dates. Events for unknown clients are dropped.
/// When a client name appears on several records, the last record decides
/// which group its events belong to.
pub fn cumulative_capital(
    records: &[ClientRecord],
    events: &[InflowEvent],
    group_by: GroupBy,
    period_start: &str,
) -> Vec<CapitalSeries> {
    let domain = resolve_date_domain(records);
    let client_groups: HashMap<&str, &str> = records
        .iter()
        .map(|record| (record.name.as_str(), group_by.key_of(record)))
        .collect();

    let mut contributions = Contributions::default();

    for event in events {
        let Some(group) = client_groups.get(event.client_name.as_str()) else {
            debug!(
                "Dropping inflow event for unknown client '{}' on {}",
                event.client_name, event.date
            );
            continue;
        };
        if event.amount_usd > Decimal::ZERO {
            contributions.add(group, &event.date, event.amount_usd);
        }
    }

    for record in records {
        if let Some((date, value)) = first_present_value(record) {
            if date > period_start {
                contributions.add(group_by.key_of(record), date, value);
            }
        }
    }

    contributions
        .groups
        .into_iter()
        .map(|(key, by_date)| {
            let axis: BTreeSet<&str> = domain
                .iter()
                .chain(by_date.keys().map(String::as_str))
                .collect();

            let mut accumulated = Decimal::ZERO;
            let points = axis
                .into_iter()
                .map(|date| {
                    if let Some(amount) = by_date.get(date) {
                        accumulated += *amount;
                    }
                    SeriesPoint::new(date, accumulated)
                })
                .collect();

            CapitalSeries {
                key,
                points,
                total: accumulated,
            }
        })
        .collect()
}

/// The `n` series with the largest totals, descending. Ties keep their input order.
pub fn top_by_capital(series: &[CapitalSeries], n: usize) -> Vec<CapitalSeries> {
    let mut ranked = series.to_vec();
    ranked.sort_by(|a, b| b.total.cmp(&a.total));
    ranked.truncate(n);
    ranked
}

/// Number of distinct client names in the source.
pub fn distinct_client_count(records: &[ClientRecord]) -> usize {
    records
        .iter()
        .map(|record| record.name.as_str())
        .collect::<HashSet<_>>()
        .len()
}

/// Max, min and mean of a total series, plus client and day counts.
pub fn summary_stats(series: &[SeriesPoint], total_clients: usize) -> Result<SummaryStats> {
    let values: Vec<Decimal> = series.iter().map(|point| point.value).collect();
    let (Some(max), Some(min)) = (values.iter().max(), values.iter().min()) else {
        return Err(Error::NoData);
    };
    let sum: Decimal = values.iter().sum();

    Ok(SummaryStats {
        max: *max,
        min: *min,
        average: sum / Decimal::from(values.len()),
        total_clients,
        total_days: values.len(),
    })
}
