use std::{net::SocketAddr, path::PathBuf, time::Duration};

use anyhow::Context;
use chrono::NaiveDate;
use prunus_core::{
    constants::{DEFAULT_PERIOD_START, DEFAULT_TOP_BANKERS},
    errors::Error as CoreError,
    MetricsSettings,
};

pub struct Config {
    pub listen_addr: SocketAddr,
    pub data_dir: PathBuf,
    pub daily_values_path: PathBuf,
    pub inflows_path: PathBuf,
    pub client_profiles_path: PathBuf,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub log_format: String,
    pub metrics: MetricsSettings,
}

impl Config {
    /// Reads `PRUNUS_*` variables, after loading `.env` when present.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let listen_addr: SocketAddr = var("PRUNUS_LISTEN_ADDR", "0.0.0.0:5000")
            .parse()
            .context("Invalid PRUNUS_LISTEN_ADDR")?;

        let data_dir = PathBuf::from(var("PRUNUS_DATA_DIR", "./data"));
        let daily_values_path = lookup("PRUNUS_DAILY_VALUES_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join("PL/json/evolucao_pl_diaria.json"));
        let inflows_path = lookup("PRUNUS_INFLOWS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join("NetInflow/json/net_inflow_raw.json"));
        let client_profiles_path = lookup("PRUNUS_CLIENT_PROFILES_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join("cliente_perfil.txt"));

        let cors_allow = split_list(&var("PRUNUS_CORS_ALLOW_ORIGINS", "*"));
        let timeout_ms: u64 = var("PRUNUS_REQUEST_TIMEOUT_MS", "30000")
            .parse()
            .unwrap_or(30000);
        let log_format = var("PRUNUS_LOG_FORMAT", "text");

        let period_start = parse_period_start(&var("PRUNUS_PERIOD_START", DEFAULT_PERIOD_START))?;
        let top_n: usize = match lookup("PRUNUS_TOP_BANKERS") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| CoreError::Validation(format!("PRUNUS_TOP_BANKERS={}", raw)))?,
            None => DEFAULT_TOP_BANKERS,
        };
        let excluded_bankers = split_list(&var("PRUNUS_CAPITAL_EXCLUDED_BANKERS", ""));

        Ok(Self {
            listen_addr,
            data_dir,
            daily_values_path,
            inflows_path,
            client_profiles_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            log_format,
            metrics: MetricsSettings {
                period_start,
                top_n,
                excluded_bankers,
            },
        })
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Normalises the period start to zero-padded `YYYY-MM-DD` so it compares
/// correctly against date keys.
fn parse_period_start(raw: &str) -> Result<String, CoreError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map(|date| date.format("%Y-%m-%d").to_string())
        .map_err(|e| CoreError::Validation(format!("PRUNUS_PERIOD_START={} ({})", raw, e)))
}
