//! File-backed record store and the parsers behind it.

use csv::{ReaderBuilder, Trim};
use log::{debug, warn};
use serde_json::{Map, Value};
use std::io::Read;
use std::path::{Path, PathBuf};

use super::records_model::{ClientProfile, ClientRecord, InflowEvent};
use super::records_traits::RecordStoreTrait;
use crate::constants::{INFLOW_AMOUNT_KEY, INFLOW_CLIENT_KEY, INFLOW_DATE_KEY};
use crate::dates::is_date_key;
use crate::errors::{LoadError, Result};
use crate::utils::coerce_decimal;

/// Record store reading the JSON and CSV files produced by the extraction jobs.
#[derive(Debug, Clone)]
pub struct FileRecordStore {
    daily_values_path: PathBuf,
    inflows_path: PathBuf,
    profiles_path: PathBuf,
}

impl FileRecordStore {
    pub fn new(
        daily_values_path: impl Into<PathBuf>,
        inflows_path: impl Into<PathBuf>,
        profiles_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            daily_values_path: daily_values_path.into(),
            inflows_path: inflows_path.into(),
            profiles_path: profiles_path.into(),
        }
    }

    pub fn daily_values_path(&self) -> &Path {
        &self.daily_values_path
    }

    pub fn inflows_path(&self) -> &Path {
        &self.inflows_path
    }

    pub fn profiles_path(&self) -> &Path {
        &self.profiles_path
    }
}

impl RecordStoreTrait for FileRecordStore {
    fn load_client_records(&self) -> Result<Vec<ClientRecord>> {
        let contents = read_source(&self.daily_values_path)?;
        parse_client_records(&contents, &self.daily_values_path.display().to_string())
    }

    fn load_inflow_events(&self) -> Result<Vec<InflowEvent>> {
        let contents = read_source(&self.inflows_path)?;
        parse_inflow_events(&contents, &self.inflows_path.display().to_string())
    }

    fn load_client_profiles(&self) -> Result<Vec<ClientProfile>> {
        let contents = read_source(&self.profiles_path)?;
        parse_client_profiles(
            contents.as_bytes(),
            &self.profiles_path.display().to_string(),
        )
    }
}

fn read_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        LoadError::Unreadable {
            path: path.display().to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}

/// Parses a top-level JSON array of flat objects.
fn parse_rows(contents: &str, source: &str) -> Result<Vec<Value>> {
    let parsed: Value = serde_json::from_str(contents).map_err(|e| LoadError::MalformedJson {
        path: source.to_string(),
        reason: e.to_string(),
    })?;
    match parsed {
        Value::Array(rows) => Ok(rows),
        _ => Err(LoadError::NotAnArray {
            path: source.to_string(),
        }
        .into()),
    }
}

/// Parses the daily-value table. Rows that are not JSON objects are skipped.
pub fn parse_client_records(contents: &str, source: &str) -> Result<Vec<ClientRecord>> {
    let rows = parse_rows(contents, source)?;
    let total = rows.len();

    let records: Vec<ClientRecord> = rows
        .iter()
        .enumerate()
        .filter_map(|(index, row)| match row.as_object() {
            Some(object) => Some(ClientRecord::from_row(object)),
            None => {
                warn!("Skipping row {} of {}: not a JSON object", index, source);
                None
            }
        })
        .collect();

    debug!(
        "Loaded {} client records from {} ({} rows)",
        records.len(),
        source,
        total
    );
    Ok(records)
}

/// Parses the inflow event log.
///
/// Events without a client name, with a date that does not look like a date,
/// or with a non-numeric amount are skipped.
pub fn parse_inflow_events(contents: &str, source: &str) -> Result<Vec<InflowEvent>> {
    let rows = parse_rows(contents, source)?;

    let events: Vec<InflowEvent> = rows
        .iter()
        .enumerate()
        .filter_map(|(index, row)| {
            let event = row.as_object().and_then(inflow_from_row);
            if event.is_none() {
                debug!("Skipping inflow row {} of {}: {}", index, source, row);
            }
            event
        })
        .collect();

    debug!("Loaded {} inflow events from {}", events.len(), source);
    Ok(events)
}

fn inflow_from_row(row: &Map<String, Value>) -> Option<InflowEvent> {
    let client_name = row.get(INFLOW_CLIENT_KEY)?.as_str()?.to_string();
    let date = row.get(INFLOW_DATE_KEY)?.as_str()?.to_string();
    if !is_date_key(&date) {
        return None;
    }
    let amount_usd = coerce_decimal(row.get(INFLOW_AMOUNT_KEY)?)?;
    Some(InflowEvent {
        client_name,
        date,
        amount_usd,
    })
}

/// Parses the client profile table: a header line, then
/// `client name, banker name[, email]` rows.
pub fn parse_client_profiles<R: Read>(reader: R, source: &str) -> Result<Vec<ClientProfile>> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut profiles = Vec::new();
    for (index, row) in csv_reader.records().enumerate() {
        let row = row.map_err(|e| LoadError::MalformedTable {
            path: source.to_string(),
            reason: e.to_string(),
        })?;
        if row.len() < 2 {
            debug!("Skipping profile row {} of {}: too few fields", index, source);
            continue;
        }
        let non_empty = |field: Option<&str>| {
            field
                .map(str::to_string)
                .filter(|value| !value.is_empty())
        };
        profiles.push(ClientProfile {
            name: row.get(0).unwrap_or_default().to_string(),
            banker_name: non_empty(row.get(1)),
            email: non_empty(row.get(2)),
        });
    }

    debug!("Loaded {} client profiles from {}", profiles.len(), source);
    Ok(profiles)
}
