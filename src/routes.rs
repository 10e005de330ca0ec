use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::{app_state::AppState, health::health_check, messages::handlers::post_message};

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/v1/messages", post(post_message))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
