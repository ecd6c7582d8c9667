pub mod rating_ledger;
pub mod trend;

pub use rating_ledger::RatingLedger;
pub use trend::merge_trend;
