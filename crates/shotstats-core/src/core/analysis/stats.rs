//! Summary Statistics
//!
//! Mean, median, extremes and spread over a set of numeric observations.

use serde::{Deserialize, Serialize};

use crate::core::{CoreError, CoreResult};

/// Summary of a non-empty set of observations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatSummary {
    /// Number of observations
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    /// Middle value; the average of the two middle values for even counts
    pub median: f64,
    /// Population standard deviation
    pub std_dev: f64,
}

impl StatSummary {
    /// Creates a summary from samples
    ///
    /// `context` names the statistic in the error raised for an empty sample set.
    pub fn from_samples(samples: &[f64], context: &str) -> CoreResult<Self> {
        if samples.is_empty() {
            return Err(CoreError::insufficient(context, 1, 0));
        }

        let mut sorted = samples.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let count = sorted.len();
        let sum: f64 = sorted.iter().sum();
        let mean = sum / count as f64;

        let mid = count / 2;
        let median = if count % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        } else {
            sorted[mid]
        };

        let variance = sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count as f64;

        Ok(Self {
            count,
            mean,
            min: sorted[0],
            max: sorted[count - 1],
            median,
            std_dev: variance.sqrt(),
        })
    }

    /// Creates a summary from integer counts
    pub fn from_counts(counts: &[usize], context: &str) -> CoreResult<Self> {
        let samples: Vec<f64> = counts.iter().map(|&c| c as f64).collect();
        Self::from_samples(&samples, context)
    }
}
