use chrono::{DateTime, Utc};
use storage::repository::RosterStore;
use tracing::{info, warn};

use crate::{Result, RosterSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncOutcome {
    /// Number of characters written; 0 when the scrape came back empty.
    pub applied: usize,
    pub completed_at: DateTime<Utc>,
}

/// Replaces the stored roster with a fresh scrape.
pub struct RosterSynchronizer<'a, S: RosterSource + ?Sized> {
    source: &'a S,
}

impl<'a, S: RosterSource + ?Sized> RosterSynchronizer<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// An empty scrape leaves storage untouched: a broken page must not wipe
    /// the roster. Otherwise every existing record is dropped and the scraped
    /// entries are inserted with new identifiers, as one transaction.
    pub async fn sync<St: RosterStore + ?Sized>(&self, store: &St) -> Result<SyncOutcome> {
        info!("Synchronizing roster from {}", self.source.name());

        let entries = self.source.fetch_roster().await?;

        if entries.is_empty() {
            warn!("No characters scraped, keeping the current roster");
            return Ok(SyncOutcome {
                applied: 0,
                completed_at: Utc::now(),
            });
        }

        let inserted = store.replace_all(&entries).await?;
        info!("Roster replaced with {} characters", inserted);

        Ok(SyncOutcome {
            applied: entries.len(),
            completed_at: Utc::now(),
        })
    }
}
