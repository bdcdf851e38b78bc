//! Daily forecast summary.
//!
//! The forecast feed has one sample every three hours. The summary picks one
//! representative sample per calendar date, preferring the midday sample and
//! falling back to the earliest sample of a date when no midday sample is
//! available for enough dates.

use std::collections::HashSet;

use crate::types::ForecastSample;

/// Local time label of the preferred representative sample
pub const MIDDAY_LABEL: &str = "12:00:00";

/// Maximum number of days in a summary
pub const MAX_DAYS: usize = 5;

/// Where days found only by the fallback pass end up in the summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackOrdering {
    /// All representatives in ascending date order.
    #[default]
    MergeByDate,
    /// Fallback representatives after all midday ones. Can be out of date order.
    Append,
}

/// Collapse an ascending forecast feed into at most [`MAX_DAYS`] daily representatives.
pub fn aggregate_daily(samples: &[ForecastSample], ordering: FallbackOrdering) -> Vec<ForecastSample> {
    let mut chosen_dates = HashSet::new();
    let mut picked: Vec<&ForecastSample> = samples
        .iter()
        .filter(|s| s.local_time_label == MIDDAY_LABEL)
        .filter(|s| chosen_dates.insert(s.calendar_date))
        .collect();

    if picked.len() < MAX_DAYS {
        let midday_days = picked.len();
        picked.extend(
            samples
                .iter()
                .filter(|s| chosen_dates.insert(s.calendar_date)),
        );
        tracing::debug!(
            midday_days,
            fallback_days = picked.len() - midday_days,
            "Daily summary used fallback samples"
        );
    }

    if ordering == FallbackOrdering::MergeByDate {
        // dates are unique, so a stable sort is a merge
        picked.sort_by_key(|s| s.calendar_date);
    }

    picked.into_iter().take(MAX_DAYS).cloned().collect()
}
