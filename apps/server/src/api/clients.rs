use std::sync::Arc;

use crate::{api::shared::run_blocking, error::ApiResult, main_lib::AppState};
use axum::{extract::State, routing::get, Json, Router};
use prunus_core::metrics::{ClientEvolution, ClientLatest, MetricsEnvelope};

/// Latest value of every client with data on the last date.
async fn get_clients_pl(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<MetricsEnvelope<Vec<ClientLatest>>>> {
    let service = state.metrics_service.clone();
    let envelope = run_blocking(move || service.get_clients_latest()).await?;
    Ok(Json(envelope))
}

async fn get_clients_evolution(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<MetricsEnvelope<Vec<ClientEvolution>>>> {
    let service = state.metrics_service.clone();
    let envelope = run_blocking(move || service.get_clients_evolution()).await?;
    Ok(Json(envelope))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/clients/pl", get(get_clients_pl))
        .route("/clients/evolution", get(get_clients_evolution))
}
