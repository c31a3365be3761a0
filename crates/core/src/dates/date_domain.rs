use std::collections::BTreeSet;

use crate::constants::RESERVED_KEYS;
use crate::errors::{Error, Result};
use crate::records::ClientRecord;

/// Returns true when `key` has the shape of an ISO `YYYY-MM-DD` date.
///
/// Only the length and the hyphens at positions 4 and 7 are checked, so a
/// key like `"abcd-ef-gh"` is accepted as a date. Identity keys never are.
pub fn is_date_key(key: &str) -> bool {
    if RESERVED_KEYS.contains(&key) {
        return false;
    }
    let bytes = key.as_bytes();
    bytes.len() == 10 && bytes[4] == b'-' && bytes[7] == b'-'
}

/// The ordered set of date keys present in any client record.
///
/// Zero-padded ISO dates sort lexicographically in chronological order, so
/// the string ordering of the underlying set is the calendar ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateDomain {
    dates: BTreeSet<String>,
}

impl DateDomain {
    pub fn from_dates<I, S>(dates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            dates: dates.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn first(&self) -> Option<&str> {
        self.dates.first().map(String::as_str)
    }

    pub fn last(&self) -> Option<&str> {
        self.dates.last().map(String::as_str)
    }

    pub fn contains(&self, date: &str) -> bool {
        self.dates.contains(date)
    }

    /// Dates in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.dates.iter().map(String::as_str)
    }

    /// First and last date, or `NoDates` for an empty domain.
    pub fn bounds(&self) -> Result<(&str, &str)> {
        match (self.first(), self.last()) {
            (Some(first), Some(last)) => Ok((first, last)),
            _ => Err(Error::NoDates),
        }
    }
}

/// Collects every date key of every record.
///
/// Keys holding `null` still belong to the domain; they only stop
/// contributing once values are aggregated.
pub fn resolve_date_domain(records: &[ClientRecord]) -> DateDomain {
    DateDomain {
        dates: records
            .iter()
            .flat_map(|record| record.daily_values.keys())
            .filter(|key| is_date_key(key))
            .cloned()
            .collect(),
    }
}
