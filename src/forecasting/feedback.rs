use super::model::HistoricalRecord;

/// Feedback factor used when no usable history is available.
pub const DEFAULT_FEEDBACK_FACTOR: f64 = 1.0;

/// Mean consumption-to-footfall ratio over records with positive footfall.
///
/// Records with zero or negative footfall are skipped. Returns
/// [`DEFAULT_FEEDBACK_FACTOR`] when nothing remains to average.
pub fn feedback_factor(history: &[HistoricalRecord]) -> f64 {
    let (sum, count) = history
        .iter()
        .filter_map(HistoricalRecord::consumption_ratio)
        .fold((0.0_f64, 0_usize), |(sum, count), ratio| {
            (sum + ratio, count + 1)
        });

    if count == 0 {
        DEFAULT_FEEDBACK_FACTOR
    } else {
        sum / count as f64
    }
}
