mod backfill;
mod rate_limit;
mod report;
mod synchronizer;

pub use backfill::ImageBackfiller;
pub use rate_limit::{DEFAULT_DELAY_MS, FixedDelay};
pub use report::to_pretty_json;
pub use synchronizer::{RosterSynchronizer, SyncOutcome};
