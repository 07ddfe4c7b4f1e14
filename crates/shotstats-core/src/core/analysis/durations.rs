//! Shot Duration Analysis
//!
//! Statistics over the time between consecutive shot starts.
//! The boundary frames are included here, unlike every other analysis.

use serde::{Deserialize, Serialize};

use super::stats::StatSummary;
use crate::core::annotations::AnnotationRecord;
use crate::core::{is_non_decreasing, CoreError, CoreResult, TimeSec};

/// Duration statistics for a shot sequence
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DurationStats {
    /// Number of records the durations were derived from
    pub shot_count: usize,
    /// `times[i + 1] - times[i]` for every consecutive pair
    pub durations: Vec<TimeSec>,
    pub summary: StatSummary,
    /// False if any duration is negative
    pub monotonic: bool,
}

/// Computes the deltas between consecutive shot start times
///
/// Returns `n - 1` values for `n` times.
pub fn shot_durations(times: &[TimeSec]) -> Vec<TimeSec> {
    times.windows(2).map(|w| w[1] - w[0]).collect()
}

/// Analyzes shot durations over start times in screen order
pub fn analyze_shot_times(times: &[TimeSec]) -> CoreResult<DurationStats> {
    if times.len() < 2 {
        return Err(CoreError::insufficient("shot durations", 2, times.len()));
    }

    let durations = shot_durations(times);
    let summary = StatSummary::from_samples(&durations, "shot durations")?;

    Ok(DurationStats {
        shot_count: times.len(),
        durations,
        summary,
        monotonic: is_non_decreasing(times),
    })
}

/// Analyzes shot durations over a full record sequence
pub fn analyze_durations(records: &[AnnotationRecord]) -> CoreResult<DurationStats> {
    let times: Vec<TimeSec> = records.iter().map(|r| r.time_seconds).collect();
    analyze_shot_times(&times)
}
