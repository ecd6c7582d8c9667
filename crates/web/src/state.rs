use std::sync::Arc;

use axum::extract::FromRef;
use importer::WikiSource;
use storage::Database;

use crate::features::image_proxy::ImageProxy;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub wiki: Arc<WikiSource>,
    pub image_proxy: Arc<ImageProxy>,
    pub backfill_delay_ms: u64,
}

impl FromRef<AppState> for Database {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}
