//! Categorical Tally
//!
//! Frequency counts for the fixed-vocabulary columns.
//! Tokens outside the vocabulary are not errors: they are counted separately
//! and logged so the source table can be checked by hand.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::annotations::{Category, CategoryCode};

/// Counts per vocabulary code, plus diagnostics for everything else
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTally<T: Ord> {
    /// Column name in the source table
    pub column: String,
    /// One entry per vocabulary code, zero counts included
    pub counts: BTreeMap<T, usize>,
    /// Every distinct raw spelling observed, known or not
    pub observed: BTreeSet<String>,
    /// Tokens outside the vocabulary and how often they occur
    pub unrecognized: BTreeMap<String, usize>,
}

impl<T: CategoryCode> CategoryTally<T> {
    /// Count for a single code
    pub fn count(&self, code: T) -> usize {
        self.counts.get(&code).copied().unwrap_or(0)
    }

    /// Number of values that matched the vocabulary
    pub fn known_total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Number of values outside the vocabulary
    pub fn unrecognized_total(&self) -> usize {
        self.unrecognized.values().sum()
    }
}

/// Tallies a categorical column over the given values
pub fn tally_category<'a, T, I>(values: I) -> CategoryTally<T>
where
    T: CategoryCode,
    I: IntoIterator<Item = &'a Category<T>>,
{
    let mut counts: BTreeMap<T, usize> = T::ALL.iter().map(|code| (*code, 0)).collect();
    let mut observed = BTreeSet::new();
    let mut unrecognized: BTreeMap<String, usize> = BTreeMap::new();

    for value in values {
        observed.insert(value.as_token().to_string());
        match value.known() {
            Some(code) => *counts.entry(code).or_insert(0) += 1,
            None => *unrecognized.entry(value.as_token().to_string()).or_insert(0) += 1,
        }
    }

    for (raw, count) in &unrecognized {
        warn!(
            "Unexpected {} value '{}' ({} shot(s)), excluded from counts",
            T::COLUMN,
            raw,
            count
        );
    }

    CategoryTally {
        column: T::COLUMN.to_string(),
        counts,
        observed,
        unrecognized,
    }
}
