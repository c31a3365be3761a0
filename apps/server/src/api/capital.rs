use std::sync::Arc;

use crate::{api::shared::run_blocking, error::ApiResult, main_lib::AppState};
use axum::{extract::State, routing::get, Json, Router};
use prunus_core::metrics::{CapitalEvolution, MetricsEnvelope};

async fn get_capital_evolution(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<MetricsEnvelope<CapitalEvolution>>> {
    let service = state.metrics_service.clone();
    let envelope = run_blocking(move || service.get_capital_evolution()).await?;
    Ok(Json(envelope))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/captacao/evolucao", get(get_capital_evolution))
}
