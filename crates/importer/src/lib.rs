pub mod error;
pub mod roster;
pub mod sources;
pub mod traits;

pub use error::{ImporterError, Result};
pub use roster::{FixedDelay, ImageBackfiller, RosterSynchronizer, SyncOutcome};
pub use sources::wiki::{WikiConfig, WikiSource};
pub use traits::{ImageSource, RosterSource};
