//! Source record models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::constants::{BANKER_KEY, CLIENT_NAME_KEY, NO_BANKER, RESERVED_KEYS, TAX_ID_KEY};
use crate::utils::coerce_decimal;

/// One cell of the daily-value table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DailyValue {
    /// Explicit `null`. Aggregates exactly like an absent key.
    Missing,
    /// A numeric observation.
    Amount(Decimal),
    /// A non-numeric placeholder from the upstream extract, kept verbatim for logs.
    Unparseable(String),
}

impl DailyValue {
    /// Classifies a raw JSON cell.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => DailyValue::Missing,
            other => match coerce_decimal(other) {
                Some(amount) => DailyValue::Amount(amount),
                None => DailyValue::Unparseable(other.to_string()),
            },
        }
    }

    /// The numeric observation, if there is one.
    pub fn amount(&self) -> Option<Decimal> {
        match self {
            DailyValue::Amount(amount) => Some(*amount),
            _ => None,
        }
    }
}

/// One client row of the daily-value table.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientRecord {
    /// Client name, the join key for inflow events and profiles.
    pub name: String,
    /// Tax id (CPF). Informational only.
    pub tax_id: String,
    /// Assigned banker; `None` when absent, null or blank.
    pub banker_name: Option<String>,
    /// Every non-identity key of the row. Which of these are dates is decided
    /// by [`crate::dates::is_date_key`], not here.
    pub daily_values: BTreeMap<String, DailyValue>,
}

impl ClientRecord {
    /// Builds a record from one JSON object of the daily-value table.
    ///
    /// Identity fields are read leniently: numbers are stringified and
    /// absent fields become empty strings.
    pub fn from_row(row: &Map<String, Value>) -> Self {
        let name = identity_field(row.get(CLIENT_NAME_KEY));
        let tax_id = identity_field(row.get(TAX_ID_KEY));
        let banker_name = Some(identity_field(row.get(BANKER_KEY)))
            .map(|b| b.trim().to_string())
            .filter(|b| !b.is_empty());

        let daily_values = row
            .iter()
            .filter(|(key, _)| !RESERVED_KEYS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), DailyValue::from_json(value)))
            .collect();

        Self {
            name,
            tax_id,
            banker_name,
            daily_values,
        }
    }

    /// Numeric value observed on `date`. `None` for absent keys, nulls and
    /// non-numeric placeholders alike.
    pub fn value_on(&self, date: &str) -> Option<Decimal> {
        self.daily_values.get(date).and_then(DailyValue::amount)
    }

    /// The banker grouping key, with the "no banker" sentinel.
    pub fn banker_key(&self) -> &str {
        self.banker_name.as_deref().unwrap_or(NO_BANKER)
    }
}

fn identity_field(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

/// One recorded fund movement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InflowEvent {
    pub client_name: String,
    pub date: String,
    /// Signed amount: positive is an inflow, negative an outflow.
    pub amount_usd: Decimal,
}

/// One row of the client profile table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ClientProfile {
    pub name: String,
    pub banker_name: Option<String>,
    pub email: Option<String>,
}
