//! Annotation Analysis
//!
//! Pure functions over borrowed annotation slices:
//! - Shot durations (whole sequence)
//! - Location recurrence (analysis slice)
//! - Category tallies (analysis slice)

pub mod durations;
pub mod recurrence;
pub mod stats;
pub mod tally;

pub use durations::{analyze_durations, analyze_shot_times, shot_durations, DurationStats};
pub use recurrence::{
    analyze_recurrence, occurrences_by_value, revisits_by_value, run_length_encode,
    RecurrenceStats, RunLengthGroup,
};
pub use stats::StatSummary;
pub use tally::{tally_category, CategoryTally};
