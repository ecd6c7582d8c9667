use importer::{FixedDelay, ImageBackfiller, Result, RosterSynchronizer, SyncOutcome, WikiSource};
use sqlx::PgPool;
use storage::{dto::roster::BackfillSummary, repository::character::CharacterRepository};

/// Replace the roster with a fresh scrape of the listing page
pub async fn sync_roster(pool: &PgPool, source: &WikiSource) -> Result<SyncOutcome> {
    let repo = CharacterRepository::new(pool);
    RosterSynchronizer::new(source).sync(&repo).await
}

/// Fetch every character article and store its portrait
pub async fn backfill_images(
    pool: &PgPool,
    source: &WikiSource,
    limiter: FixedDelay,
) -> Result<BackfillSummary> {
    let repo = CharacterRepository::new(pool);
    ImageBackfiller::new(source, limiter).backfill(&repo).await
}
