use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{EloUpdate, RosterStore};
use crate::dto::character::RosterOrder;
use crate::error::{Result, StorageError};
use crate::models::{Character, NewCharacter};

const CHARACTER_COLUMNS: &str = "id, first_name, last_name, title, image_path, \
     elo, recent_change, wins, losses, created_at";

pub struct CharacterRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CharacterRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RosterStore for CharacterRepository<'_> {
    /// List every character in the requested order
    async fn list(&self, order: RosterOrder) -> Result<Vec<Character>> {
        let sql = format!(
            "SELECT {} FROM characters ORDER BY {}",
            CHARACTER_COLUMNS,
            order.as_order_by()
        );

        let characters = sqlx::query_as::<_, Character>(&sql)
            .fetch_all(self.pool)
            .await?;

        Ok(characters)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Character>> {
        let sql = format!("SELECT {} FROM characters WHERE id = $1", CHARACTER_COLUMNS);

        let character = sqlx::query_as::<_, Character>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(character)
    }

    async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM characters")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    /// Relative update in one statement, so concurrent callers never lose
    /// each other's increments.
    async fn apply_elo_update(&self, id: Uuid, update: EloUpdate) -> Result<Character> {
        let sql = format!(
            r#"
            UPDATE characters
            SET wins = wins + $2,
                losses = losses + $3,
                elo = elo + $4,
                recent_change = $5
            WHERE id = $1
            RETURNING {}
            "#,
            CHARACTER_COLUMNS
        );

        let character = sqlx::query_as::<_, Character>(&sql)
            .bind(id)
            .bind(update.wins_delta)
            .bind(update.losses_delta)
            .bind(update.elo_delta)
            .bind(update.recent_change)
            .fetch_optional(self.pool)
            .await
            .map_err(|e| StorageError::from(e).classify())?
            .ok_or(StorageError::NotFound)?;

        Ok(character)
    }

    async fn replace_all(&self, entries: &[NewCharacter]) -> Result<u64> {
        let mut tx = self.pool.begin().await?;

        let removed = sqlx::query("DELETE FROM characters")
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let mut inserted = 0;
        for entry in entries {
            sqlx::query(
                r#"
                INSERT INTO characters (id, first_name, last_name, title, image_path, elo, recent_change, wins, losses)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(&entry.first_name)
            .bind(&entry.last_name)
            .bind(&entry.title)
            .bind(&entry.image_path)
            .bind(entry.elo)
            .bind(entry.recent_change)
            .bind(entry.wins)
            .bind(entry.losses)
            .execute(&mut *tx)
            .await
            .map_err(|e| StorageError::from(e).classify())?;

            inserted += 1;
        }

        tx.commit().await?;

        tracing::debug!(removed, inserted, "Roster replaced");
        Ok(inserted)
    }

    async fn update_image_path(&self, id: Uuid, image_path: &str) -> Result<()> {
        let result = sqlx::query("UPDATE characters SET image_path = $2 WHERE id = $1")
            .bind(id)
            .bind(image_path)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
