use axum::{
    Router,
    routing::{get, put},
};

use super::handlers::{get_character, list_characters, update_elo};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_characters))
        .route("/:id", get(get_character))
        .route("/:id/elo", put(update_elo))
}
