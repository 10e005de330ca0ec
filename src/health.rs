use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::app_state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub api_host: String,
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    debug!("Health check");
    Json(HealthResponse {
        status: "OK".to_string(),
        api_host: state.pipeline.config().api_host().to_string(),
    })
}
