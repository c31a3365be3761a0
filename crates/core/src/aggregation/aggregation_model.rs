//! Aggregated series models.

use rust_decimal::Decimal;

use crate::constants::ALL_GROUP_KEY;
use crate::records::ClientRecord;

/// Grouping dimension for rollups and capital series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupBy {
    /// One group per client name.
    Client,
    /// One group per banker, with the "no banker" sentinel.
    Banker,
    /// A single firm-wide group.
    All,
}

impl GroupBy {
    /// The group a record belongs to.
    pub fn key_of<'a>(&self, record: &'a ClientRecord) -> &'a str {
        match self {
            GroupBy::Client => record.name.as_str(),
            GroupBy::Banker => record.banker_key(),
            GroupBy::All => ALL_GROUP_KEY,
        }
    }
}

/// One `(date, value)` pair of a series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesPoint {
    pub date: String,
    pub value: Decimal,
}

impl SeriesPoint {
    pub fn new(date: impl Into<String>, value: Decimal) -> Self {
        Self {
            date: date.into(),
            value,
        }
    }
}

/// Rollup of one client or banker over the date domain.
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySeries {
    pub key: String,
    /// Names of the records folded into this entity, in record order.
    pub member_names: Vec<String>,
    /// Dates on which at least one member had a numeric value. Never empty.
    pub points: Vec<SeriesPoint>,
    /// Value of the first point.
    pub first_value: Decimal,
    /// Value of the last point.
    pub last_value: Decimal,
    /// `last_value - first_value`, signed.
    pub variation: Decimal,
}

impl EntitySeries {
    /// Builds an entity from its points; `None` when there are no points.
    pub fn from_points(
        key: impl Into<String>,
        member_names: Vec<String>,
        points: Vec<SeriesPoint>,
    ) -> Option<Self> {
        let first_value = points.first()?.value;
        let last_value = points.last()?.value;
        Some(Self {
            key: key.into(),
            member_names,
            points,
            first_value,
            last_value,
            variation: last_value - first_value,
        })
    }

    pub fn first_date(&self) -> Option<&str> {
        self.points.first().map(|p| p.date.as_str())
    }

    pub fn last_date(&self) -> Option<&str> {
        self.points.last().map(|p| p.date.as_str())
    }
}

/// Cumulative capital raised by one group.
#[derive(Debug, Clone, PartialEq)]
pub struct CapitalSeries {
    pub key: String,
    /// Accumulator value on every date of the group's axis, ascending.
    pub points: Vec<SeriesPoint>,
    /// Final accumulator value.
    pub total: Decimal,
}

impl CapitalSeries {
    pub fn initial_value(&self) -> Decimal {
        self.points.first().map(|p| p.value).unwrap_or(Decimal::ZERO)
    }

    pub fn final_value(&self) -> Decimal {
        self.points.last().map(|p| p.value).unwrap_or(Decimal::ZERO)
    }
}

/// Statistics over the tracked total series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryStats {
    pub max: Decimal,
    pub min: Decimal,
    pub average: Decimal,
    pub total_clients: usize,
    pub total_days: usize,
}
