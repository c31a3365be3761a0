use std::sync::Arc;

use crate::{api::shared::run_blocking, error::ApiResult, main_lib::AppState};
use axum::{extract::State, routing::get, Json, Router};
use prunus_core::metrics::{DashboardSummary, MetricsEnvelope};

/// Headline dashboard figures.
async fn get_dashboard_summary(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<MetricsEnvelope<DashboardSummary>>> {
    let service = state.metrics_service.clone();
    let envelope = run_blocking(move || service.get_dashboard_summary()).await?;
    Ok(Json(envelope))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/metrics", get(get_dashboard_summary))
}
