use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::{
    app_state::AppState,
    delivery::{Deliverer, RecordingSender},
    messages::dtos::{ErrorResponse, PostMessageRequest, PostMessageResponse},
};

/// Run one chat message through the pipeline and answer with the reply
/// sequence it produced.
pub async fn post_message(
    State(state): State<AppState>,
    Json(payload): Json<PostMessageRequest>,
) -> Response {
    if let Err(error) = payload.validate() {
        return (StatusCode::BAD_REQUEST, Json(ErrorResponse { error })).into_response();
    }

    let message = payload.into_message();
    let sender = Arc::new(RecordingSender::new());
    let deliverer = Deliverer::new(
        sender.clone(),
        None,
        message.channel_id.clone(),
        state.pipeline.log(),
    );

    let outcome = state.pipeline.handle(&message, &deliverer).await;

    (
        StatusCode::OK,
        Json(PostMessageResponse::from_outcome(outcome, sender.items())),
    )
        .into_response()
}
