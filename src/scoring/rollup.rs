//! Weighted rollup of sibling scores.

/// Weighted mean over the items actually present.
///
/// `aggregate = Σ(score * weight) / Σ(weight)`
///
/// Dividing by the sum of present weights tolerates partial assessments and
/// authored weight sets that do not sum to 1. Items with a non-finite score or
/// a negative/non-finite weight are skipped. Returns `None` when nothing with
/// positive weight remains; "no data" is never reported as zero.
pub fn rollup<I>(items: I) -> Option<f64>
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let mut weighted_sum = 0.0;
    let mut total_weight = 0.0;

    for (score, weight) in items {
        if !score.is_finite() {
            tracing::debug!("Skipping non-finite score {} in rollup", score);
            continue;
        }
        if !weight.is_finite() || weight < 0.0 {
            tracing::warn!("Skipping item with invalid weight {} in rollup", weight);
            continue;
        }
        weighted_sum += score * weight;
        total_weight += weight;
    }

    if total_weight > 0.0 {
        Some(weighted_sum / total_weight)
    } else {
        None
    }
}

/// Unweighted mean of the present scores, `None` when there are none.
pub fn mean<I>(scores: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    rollup(scores.into_iter().map(|s| (s, 1.0)))
}
