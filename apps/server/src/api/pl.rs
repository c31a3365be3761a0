use std::sync::Arc;

use crate::{api::shared::run_blocking, error::ApiResult, main_lib::AppState};
use axum::{extract::State, routing::get, Json, Router};
use prunus_core::metrics::{DatedValue, MetricsEnvelope, StatsPayload};

async fn get_total(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<MetricsEnvelope<Vec<DatedValue>>>> {
    let service = state.metrics_service.clone();
    let envelope = run_blocking(move || service.get_total_series()).await?;
    Ok(Json(envelope))
}

async fn get_stats(State(state): State<Arc<AppState>>) -> ApiResult<Json<MetricsEnvelope<StatsPayload>>> {
    let service = state.metrics_service.clone();
    let envelope = run_blocking(move || service.get_stats()).await?;
    Ok(Json(envelope))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/pl/total", get(get_total))
        .route("/pl/stats", get(get_stats))
}
