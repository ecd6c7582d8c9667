pub mod character;
#[cfg(any(test, feature = "test-utils"))]
pub mod memory;

use async_trait::async_trait;
use uuid::Uuid;

use crate::dto::character::RosterOrder;
use crate::error::Result;
use crate::models::{Character, NewCharacter};

/// Relative update applied to one character in a single storage operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EloUpdate {
    pub wins_delta: i32,
    pub losses_delta: i32,
    pub elo_delta: i32,
    /// Already merged trend; stored as-is.
    pub recent_change: i32,
}

/// Persistence operations the roster pipelines and the rating ledger rely on.
#[async_trait]
pub trait RosterStore: Send + Sync {
    async fn list(&self, order: RosterOrder) -> Result<Vec<Character>>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Character>>;

    async fn count(&self) -> Result<i64>;

    /// Applies `update` atomically; a missing row yields `StorageError::NotFound`.
    async fn apply_elo_update(&self, id: Uuid, update: EloUpdate) -> Result<Character>;

    /// Drops the whole roster and inserts `entries` with fresh identifiers.
    /// Either every entry lands or the previous roster stays untouched.
    async fn replace_all(&self, entries: &[NewCharacter]) -> Result<u64>;

    async fn update_image_path(&self, id: Uuid, image_path: &str) -> Result<()>;
}
