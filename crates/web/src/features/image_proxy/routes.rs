use axum::{Router, routing::get};

use super::handlers::proxy_image;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/image-proxy", get(proxy_image))
}
