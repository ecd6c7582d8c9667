use tracing::debug;
use uuid::Uuid;

use crate::dto::character::EloUpdateRequest;
use crate::error::Result;
use crate::models::Character;
use crate::repository::{EloUpdate, RosterStore};

use super::trend::merge_trend;

/// Applies externally computed rating deltas to roster entries.
pub struct RatingLedger<'a, S: RosterStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: RosterStore + ?Sized> RatingLedger<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub async fn apply(&self, id: Uuid, request: &EloUpdateRequest) -> Result<Character> {
        let update = EloUpdate {
            wins_delta: request.wins_change,
            losses_delta: request.losses_change,
            elo_delta: request.elo_change,
            recent_change: merge_trend(request.elo_change, request.recent_change),
        };

        let character = self.store.apply_elo_update(id, update).await?;
        debug!(
            %id,
            elo = character.elo,
            recent_change = character.recent_change,
            "Applied elo update"
        );

        Ok(character)
    }
}
