use crate::Result;
use storage::models::NewCharacter;

/// Produces the current roster from an external listing.
#[async_trait::async_trait]
pub trait RosterSource: Send + Sync {
    /// Issues a fresh request on every call.
    async fn fetch_roster(&self) -> Result<Vec<NewCharacter>>;

    fn name(&self) -> &'static str;
}

/// Looks up the portrait of a single character.
#[async_trait::async_trait]
pub trait ImageSource: Send + Sync {
    /// `Ok(None)` means the page was fetched but carries no image.
    async fn find_image(&self, character_name: &str) -> Result<Option<String>>;
}
