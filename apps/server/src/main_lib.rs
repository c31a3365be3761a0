use std::sync::Arc;

use crate::config::Config;
use prunus_core::{FileRecordStore, MetricsService, MetricsServiceTrait, RecordStoreTrait};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub metrics_service: Arc<dyn MetricsServiceTrait>,
}

/// Installs the global subscriber. Core `log` records are forwarded through
/// the `tracing-log` bridge.
pub fn init_tracing(log_format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let store = FileRecordStore::new(
        &config.daily_values_path,
        &config.inflows_path,
        &config.client_profiles_path,
    );
    for path in [
        store.daily_values_path(),
        store.inflows_path(),
        store.profiles_path(),
    ] {
        if path.exists() {
            tracing::info!("Data source: {}", path.display());
        } else {
            tracing::warn!("Data source not found yet: {}", path.display());
        }
    }

    let store: Arc<dyn RecordStoreTrait> = Arc::new(store);
    let metrics_service = Arc::new(MetricsService::new(store, config.metrics.clone()));
    tracing::info!(
        "Tracked period starts {}, top {} bankers",
        config.metrics.period_start,
        config.metrics.top_n
    );

    Ok(Arc::new(AppState { metrics_service }))
}
