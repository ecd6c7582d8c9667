use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use importer::FixedDelay;
use storage::dto::roster::{BackfillParams, BackfillSummary, SyncResponse};
use validator::Validate;

use crate::{
    error::{WebError, WebResult},
    state::AppState,
};

use super::services;

#[utoipa::path(
    post,
    path = "/scrape-characters",
    responses(
        (status = 200, description = "Roster synchronized", body = SyncResponse),
        (status = 500, description = "Listing could not be fetched or stored")
    ),
    tag = "roster"
)]
pub async fn scrape_characters(State(state): State<AppState>) -> WebResult<Response> {
    let outcome = services::sync_roster(state.db.pool(), &state.wiki).await?;

    let message = if outcome.applied == 0 {
        "No characters found; roster left unchanged".to_string()
    } else {
        format!("Roster replaced with {} characters", outcome.applied)
    };

    Ok(Json(SyncResponse {
        message,
        count: outcome.applied,
        timestamp: outcome.completed_at,
    })
    .into_response())
}

#[utoipa::path(
    post,
    path = "/update-character-images",
    params(BackfillParams),
    responses(
        (status = 200, description = "Backfill finished", body = BackfillSummary),
        (status = 400, description = "Invalid delay"),
        (status = 500, description = "Roster could not be read")
    ),
    tag = "roster"
)]
pub async fn update_character_images(
    State(state): State<AppState>,
    Query(params): Query<BackfillParams>,
) -> WebResult<Response> {
    params.validate()?;

    let limiter = FixedDelay::from_millis(params.delay.unwrap_or(state.backfill_delay_ms));

    // Detached so a dropped connection does not cut the batch short
    let AppState { db, wiki, .. } = state;
    let summary = tokio::spawn(async move {
        services::backfill_images(db.pool(), &wiki, limiter).await
    })
    .await
    .map_err(|e| WebError::InternalServerError(format!("Backfill task failed: {}", e)))??;

    Ok(Json(summary).into_response())
}
