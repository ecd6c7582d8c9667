use axum::{
    Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use serde_json::Value;
use storage::{
    Database,
    dto::character::{EloUpdateRequest, ListCharactersQuery},
    models::Character,
};
use uuid::Uuid;

use crate::error::WebResult;

use super::services;

#[utoipa::path(
    get,
    path = "/characters",
    params(ListCharactersQuery),
    responses(
        (status = 200, description = "List all characters successfully", body = Vec<Character>)
    ),
    tag = "characters"
)]
pub async fn list_characters(
    State(db): State<Database>,
    Query(query): Query<ListCharactersQuery>,
) -> WebResult<Response> {
    let characters = services::list_characters(db.pool(), query.sort).await?;

    Ok(Json(characters).into_response())
}

#[utoipa::path(
    get,
    path = "/characters/{id}",
    params(
        ("id" = Uuid, Path, description = "Character id")
    ),
    responses(
        (status = 200, description = "Matching character, or an empty list", body = Vec<Character>)
    ),
    tag = "characters"
)]
pub async fn get_character(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> WebResult<Response> {
    let character = services::get_character(db.pool(), id).await?;

    Ok(Json(character.into_iter().collect::<Vec<_>>()).into_response())
}

#[utoipa::path(
    put,
    path = "/characters/{id}/elo",
    params(
        ("id" = Uuid, Path, description = "Character id")
    ),
    request_body = EloUpdateRequest,
    responses(
        (status = 200, description = "Rating updated", body = Character),
        (status = 400, description = "Missing, unexpected or non-numeric fields"),
        (status = 404, description = "Character not found"),
        (status = 409, description = "Update would make wins or losses negative")
    ),
    tag = "characters"
)]
pub async fn update_elo(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Json(body): Json<Value>,
) -> WebResult<Response> {
    let request = EloUpdateRequest::from_value(&body)?;

    let updated = services::apply_elo_update(db.pool(), id, &request).await?;

    Ok(Json(updated).into_response())
}
