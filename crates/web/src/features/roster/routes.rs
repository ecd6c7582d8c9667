use axum::{Router, routing::post};

use super::handlers::{scrape_characters, update_character_images};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/scrape-characters", post(scrape_characters))
        .route("/update-character-images", post(update_character_images))
}
