use chrono::Utc;
use storage::{dto::character::RosterOrder, dto::roster::BackfillSummary, repository::RosterStore};
use tracing::{debug, info, warn};

use super::rate_limit::FixedDelay;
use crate::{ImageSource, Result};

/// Fills in `image_path` for every character, one article at a time.
pub struct ImageBackfiller<'a, S: ImageSource + ?Sized> {
    source: &'a S,
    limiter: FixedDelay,
}

impl<'a, S: ImageSource + ?Sized> ImageBackfiller<'a, S> {
    pub fn new(source: &'a S, limiter: FixedDelay) -> Self {
        Self { source, limiter }
    }

    /// Runs over the whole roster in name order. A failure on one character is
    /// counted and logged; it never stops the batch.
    pub async fn backfill<St: RosterStore + ?Sized>(&self, store: &St) -> Result<BackfillSummary> {
        let characters = store.list(RosterOrder::Name).await?;
        let total = characters.len();

        info!(
            total,
            delay_ms = self.limiter.delay().as_millis() as u64,
            "Starting image backfill"
        );

        let (mut updated, mut skipped, mut failed) = (0, 0, 0);

        for (idx, character) in characters.iter().enumerate() {
            self.limiter.wait().await;

            let name = character.name();
            match self.source.find_image(&name).await {
                Ok(Some(image_path)) => {
                    match store.update_image_path(character.id, &image_path).await {
                        Ok(()) => {
                            updated += 1;
                            debug!("[{}/{}] {}: {}", idx + 1, total, name, image_path);
                        }
                        Err(e) => {
                            failed += 1;
                            warn!("[{}/{}] {}: failed to store image: {}", idx + 1, total, name, e);
                        }
                    }
                }
                Ok(None) => {
                    skipped += 1;
                    debug!("[{}/{}] {}: no thumbnail", idx + 1, total, name);
                }
                Err(e) => {
                    failed += 1;
                    warn!("[{}/{}] {}: {}", idx + 1, total, name, e);
                }
            }
        }

        info!(
            "Image backfill finished: {} updated, {} skipped, {} failed",
            updated, skipped, failed
        );

        Ok(BackfillSummary {
            total,
            updated,
            skipped,
            failed,
            completed_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::ImporterError;
    use storage::{models::NewCharacter, repository::memory::InMemoryRoster};

    /// Maps a character name to its lookup result; unknown names fail.
    struct ScriptedImages(HashMap<&'static str, Option<&'static str>>);

    #[async_trait::async_trait]
    impl ImageSource for ScriptedImages {
        async fn find_image(&self, character_name: &str) -> Result<Option<String>> {
            match self.0.get(character_name) {
                Some(image) => Ok(image.map(str::to_string)),
                None => Err(ImporterError::InvalidUrl(character_name.to_string())),
            }
        }
    }

    fn roster() -> InMemoryRoster {
        InMemoryRoster::with_entries(&[
            NewCharacter::from_name("Satoru Gojo", None),
            NewCharacter::from_name("Mahito", Some("/old/mahito.png".to_string())),
            NewCharacter::from_name("Suguru Geto", None),
        ])
    }

    #[tokio::test]
    async fn test_classifies_each_character() {
        let store = roster();
        let source = ScriptedImages(HashMap::from([
            ("Satoru Gojo", Some("https://img.example/gojo.png")),
            ("Mahito", None),
        ]));

        let summary = ImageBackfiller::new(&source, FixedDelay::from_millis(0))
            .backfill(&store)
            .await
            .unwrap();

        assert_eq!(summary.total, 3);
        assert_eq!(summary.updated, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.total, summary.updated + summary.skipped + summary.failed);

        let roster = store.list(RosterOrder::Name).await.unwrap();
        let image_of = |name: &str| {
            roster
                .iter()
                .find(|c| c.name() == name)
                .and_then(|c| c.image_path.clone())
        };
        assert_eq!(image_of("Satoru Gojo").as_deref(), Some("https://img.example/gojo.png"));
        assert_eq!(image_of("Mahito").as_deref(), Some("/old/mahito.png"));
        assert_eq!(image_of("Suguru Geto"), None);
    }

    #[tokio::test]
    async fn test_storage_failure_counts_as_failed() {
        let store = roster().failing_writes();
        let source = ScriptedImages(HashMap::from([
            ("Satoru Gojo", Some("https://img.example/gojo.png")),
            ("Mahito", Some("https://img.example/mahito.png")),
            ("Suguru Geto", None),
        ]));

        let summary = ImageBackfiller::new(&source, FixedDelay::from_millis(0))
            .backfill(&store)
            .await
            .unwrap();

        assert_eq!(summary.updated, 0);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.failed, 2);
    }

    #[tokio::test]
    async fn test_empty_roster() {
        let store = InMemoryRoster::new();
        let source = ScriptedImages(HashMap::new());

        let summary = ImageBackfiller::new(&source, FixedDelay::default())
            .backfill(&store)
            .await
            .unwrap();

        assert_eq!(summary.total, 0);
        assert_eq!(summary.failed, 0);
    }
}
