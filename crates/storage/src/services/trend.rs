/// Folds a new elo delta into the stored trend.
///
/// Deltas pointing the same way as the trend (zero counts as either way)
/// accumulate. A delta against the trend resets it to the delta alone.
pub fn merge_trend(elo_delta: i32, prior_trend: i32) -> i32 {
    let same_direction =
        (elo_delta >= 0 && prior_trend >= 0) || (elo_delta <= 0 && prior_trend <= 0);

    if same_direction {
        elo_delta.saturating_add(prior_trend)
    } else {
        elo_delta
    }
}
