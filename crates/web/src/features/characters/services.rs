use sqlx::PgPool;
use storage::{
    dto::character::{EloUpdateRequest, RosterOrder},
    error::Result,
    models::Character,
    repository::{RosterStore, character::CharacterRepository},
    services::RatingLedger,
};
use uuid::Uuid;

/// List all characters
pub async fn list_characters(pool: &PgPool, order: RosterOrder) -> Result<Vec<Character>> {
    let repo = CharacterRepository::new(pool);
    repo.list(order).await
}

/// Get character by id
pub async fn get_character(pool: &PgPool, id: Uuid) -> Result<Option<Character>> {
    let repo = CharacterRepository::new(pool);
    repo.find_by_id(id).await
}

/// Apply rating deltas to a character
pub async fn apply_elo_update(
    pool: &PgPool,
    id: Uuid,
    request: &EloUpdateRequest,
) -> Result<Character> {
    let repo = CharacterRepository::new(pool);
    RatingLedger::new(&repo).apply(id, request).await
}
