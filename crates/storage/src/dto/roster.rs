use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Upper bound for the backfill pause between two page fetches.
pub const MAX_BACKFILL_DELAY_MS: u64 = 60_000;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SyncResponse {
    pub message: String,
    pub count: usize,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BackfillSummary {
    pub total: usize,
    pub updated: usize,
    pub skipped: usize,
    pub failed: usize,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize, Validate, IntoParams)]
pub struct BackfillParams {
    /// Milliseconds to wait before each page fetch; 0 disables the wait
    #[validate(range(max = MAX_BACKFILL_DELAY_MS, message = "delay must be at most 60000 ms"))]
    pub delay: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backfill_params_bounds() {
        assert!(BackfillParams { delay: None }.validate().is_ok());
        assert!(BackfillParams { delay: Some(0) }.validate().is_ok());
        assert!(
            BackfillParams {
                delay: Some(MAX_BACKFILL_DELAY_MS)
            }
            .validate()
            .is_ok()
        );
        assert!(
            BackfillParams {
                delay: Some(MAX_BACKFILL_DELAY_MS + 1)
            }
            .validate()
            .is_err()
        );
    }
}
