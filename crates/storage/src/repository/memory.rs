//! In-process `RosterStore` used by tests that should not need Postgres.

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{EloUpdate, RosterStore};
use crate::dto::character::RosterOrder;
use crate::error::{Result, StorageError};
use crate::models::{Character, NewCharacter};

#[derive(Default)]
pub struct InMemoryRoster {
    characters: Mutex<Vec<Character>>,
    fail_writes: bool,
}

impl InMemoryRoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: &[NewCharacter]) -> Self {
        Self {
            characters: Mutex::new(entries.iter().map(materialize).collect()),
            fail_writes: false,
        }
    }

    /// Makes every mutating call fail with a storage error.
    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub async fn snapshot(&self) -> Vec<Character> {
        self.characters.lock().await.clone()
    }

    fn check_writable(&self) -> Result<()> {
        if self.fail_writes {
            return Err(StorageError::Database(sqlx::Error::PoolClosed));
        }
        Ok(())
    }
}

fn materialize(entry: &NewCharacter) -> Character {
    Character {
        id: Uuid::new_v4(),
        first_name: entry.first_name.clone(),
        last_name: entry.last_name.clone(),
        title: entry.title.clone(),
        image_path: entry.image_path.clone(),
        elo: entry.elo,
        recent_change: entry.recent_change,
        wins: entry.wins,
        losses: entry.losses,
        created_at: chrono::Utc::now().naive_utc(),
    }
}

/// Integer columns reject overflow instead of wrapping.
fn checked(current: i32, delta: i32) -> Result<i32> {
    current.checked_add(delta).ok_or_else(|| {
        StorageError::Database(sqlx::Error::Protocol("integer out of range".to_string()))
    })
}

fn by_name(a: &Character, b: &Character) -> std::cmp::Ordering {
    (&a.first_name, &a.last_name).cmp(&(&b.first_name, &b.last_name))
}

#[async_trait]
impl RosterStore for InMemoryRoster {
    async fn list(&self, order: RosterOrder) -> Result<Vec<Character>> {
        let mut characters = self.characters.lock().await.clone();
        match order {
            RosterOrder::Rating => {
                characters.sort_by(|a, b| b.elo.cmp(&a.elo).then_with(|| by_name(a, b)))
            }
            RosterOrder::Name => characters.sort_by(by_name),
        }
        Ok(characters)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Character>> {
        let characters = self.characters.lock().await;
        Ok(characters.iter().find(|c| c.id == id).cloned())
    }

    async fn count(&self) -> Result<i64> {
        Ok(self.characters.lock().await.len() as i64)
    }

    async fn apply_elo_update(&self, id: Uuid, update: EloUpdate) -> Result<Character> {
        self.check_writable()?;

        let mut characters = self.characters.lock().await;
        let character = characters
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(StorageError::NotFound)?;

        let wins = checked(character.wins, update.wins_delta)?;
        let losses = checked(character.losses, update.losses_delta)?;
        let elo = checked(character.elo, update.elo_delta)?;
        if wins < 0 || losses < 0 {
            return Err(StorageError::ConstraintViolation(
                "characters_wins_non_negative violated".to_string(),
            ));
        }

        character.wins = wins;
        character.losses = losses;
        character.elo = elo;
        character.recent_change = update.recent_change;

        Ok(character.clone())
    }

    async fn replace_all(&self, entries: &[NewCharacter]) -> Result<u64> {
        self.check_writable()?;

        if !entries.iter().all(NewCharacter::fits_columns) {
            return Err(StorageError::Database(sqlx::Error::Protocol(
                "value too long for type character varying(100)".to_string(),
            )));
        }

        let mut characters = self.characters.lock().await;
        *characters = entries.iter().map(materialize).collect();
        Ok(characters.len() as u64)
    }

    async fn update_image_path(&self, id: Uuid, image_path: &str) -> Result<()> {
        self.check_writable()?;

        let mut characters = self.characters.lock().await;
        let character = characters
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(StorageError::NotFound)?;
        character.image_path = Some(image_path.to_string());
        Ok(())
    }
}
