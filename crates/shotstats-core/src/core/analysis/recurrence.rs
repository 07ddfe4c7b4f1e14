//! Recurrence Analysis
//!
//! Run-length statistics for a categorical sequence in screen order.
//!
//! Three different questions are answered per value:
//!
//! - **occurrences**: how many shots carry the value, regardless of position
//! - **revisits**: how many times the film leaves the value and comes back
//! - **consecutive**: how long each uninterrupted run of the value lasts
//!
//! ```text
//! A A B A A B B
//! runs:        (A,2) (B,1) (A,2) (B,2)
//! occurrences: A=4 B=3
//! revisits:    A=1 B=1
//! consecutive: 2 1 2 2
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use tracing::debug;

use super::stats::StatSummary;
use crate::core::{CoreError, CoreResult};

// =============================================================================
// Run-Length Encoding
// =============================================================================

/// A maximal block of consecutive identical values
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunLengthGroup<T> {
    pub value: T,
    pub run_length: usize,
}

/// Groups values into maximal runs, keeping their original order
pub fn run_length_encode<T: PartialEq + Clone>(values: &[T]) -> Vec<RunLengthGroup<T>> {
    let mut runs: Vec<RunLengthGroup<T>> = Vec::new();

    for value in values {
        match runs.last_mut() {
            Some(run) if run.value == *value => run.run_length += 1,
            _ => runs.push(RunLengthGroup {
                value: value.clone(),
                run_length: 1,
            }),
        }
    }

    runs
}

/// Counts how many shots carry each value, independent of position
///
/// Sorts a copy of the values and groups equal neighbours, so the result
/// is ordered by value.
pub fn occurrences_by_value<T: Ord + Clone>(values: &[T]) -> Vec<(T, usize)> {
    let mut sorted = values.to_vec();
    sorted.sort();

    run_length_encode(&sorted)
        .into_iter()
        .map(|run| (run.value, run.run_length))
        .collect()
}

/// Counts how often each value is returned to after leaving it
///
/// The first run of a value is the initial visit, so a value seen in a
/// single contiguous block has zero revisits.
pub fn revisits_by_value<T: Ord + Clone>(runs: &[RunLengthGroup<T>]) -> Vec<(T, usize)> {
    let mut run_counts: BTreeMap<T, usize> = BTreeMap::new();
    for run in runs {
        *run_counts.entry(run.value.clone()).or_insert(0) += 1;
    }

    run_counts
        .into_iter()
        .map(|(value, count)| (value, count - 1))
        .collect()
}

// =============================================================================
// Recurrence Statistics
// =============================================================================

/// Cross-value aggregates for one categorical column
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrenceStats {
    /// Number of distinct values observed
    pub distinct_values: usize,
    /// Number of maximal runs
    pub run_count: usize,
    /// Revisits per distinct value
    pub revisits: StatSummary,
    /// Shots per distinct value
    pub occurrences: StatSummary,
    /// Length of every individual run
    pub consecutive: StatSummary,
}

/// Computes recurrence statistics over a categorical slice
///
/// Fails with [`CoreError::InsufficientData`] for an empty slice, since
/// no aggregate is defined there.
pub fn analyze_recurrence<T: Ord + Clone>(values: &[T]) -> CoreResult<RecurrenceStats> {
    if values.is_empty() {
        return Err(CoreError::insufficient("recurrence analysis", 1, 0));
    }

    let runs = run_length_encode(values);
    let occurrences = occurrences_by_value(values);
    let revisits = revisits_by_value(&runs);

    let occurrence_counts: Vec<usize> = occurrences.iter().map(|(_, n)| *n).collect();
    let revisit_counts: Vec<usize> = revisits.iter().map(|(_, n)| *n).collect();
    let run_lengths: Vec<usize> = runs.iter().map(|run| run.run_length).collect();

    debug!(
        "Recurrence over {} values: {} distinct, {} runs",
        values.len(),
        occurrences.len(),
        runs.len()
    );

    Ok(RecurrenceStats {
        distinct_values: occurrences.len(),
        run_count: runs.len(),
        revisits: StatSummary::from_counts(&revisit_counts, "revisits")?,
        occurrences: StatSummary::from_counts(&occurrence_counts, "occurrences")?,
        consecutive: StatSummary::from_counts(&run_lengths, "consecutive runs")?,
    })
}

// =============================================================================
// Tests
// =============================================================================
