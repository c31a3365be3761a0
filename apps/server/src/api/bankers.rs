use std::sync::Arc;

use crate::{api::shared::run_blocking, error::ApiResult, main_lib::AppState};
use axum::{extract::State, routing::get, Json, Router};
use prunus_core::metrics::{BankerCapital, BankerEvolution, MetricsEnvelope, TopBanker};

async fn get_bankers_evolution(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<MetricsEnvelope<Vec<BankerEvolution>>>> {
    let service = state.metrics_service.clone();
    let envelope = run_blocking(move || service.get_bankers_evolution()).await?;
    Ok(Json(envelope))
}

/// Cumulative capital raised per banker.
async fn get_bankers_capital(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<MetricsEnvelope<Vec<BankerCapital>>>> {
    let service = state.metrics_service.clone();
    let envelope = run_blocking(move || service.get_bankers_capital()).await?;
    Ok(Json(envelope))
}

async fn get_top_bankers(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<MetricsEnvelope<Vec<TopBanker>>>> {
    let service = state.metrics_service.clone();
    let envelope = run_blocking(move || service.get_top_bankers()).await?;
    Ok(Json(envelope))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/bankers/evolution", get(get_bankers_evolution))
        .route("/bankers/captacao", get(get_bankers_capital))
        .route("/bankers/top", get(get_top_bankers))
}
