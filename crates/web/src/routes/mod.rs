use axum::{Json, Router, routing::get};
use serde_json::{Value, json};

use crate::features::{characters, image_proxy, roster};
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/characters", characters::routes::routes())
        .merge(roster::routes::routes())
        .merge(image_proxy::routes::routes())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
