//! shotstats Core Type Definitions
//!
//! Defines fundamental types used throughout the project.

// =============================================================================
// Time Types
// =============================================================================

/// Time in seconds (floating point)
pub type TimeSec = f64;

/// Frames per second used when a timecode carries no explicit rate
pub const DEFAULT_FPS: u32 = 25;

// =============================================================================
// Source Layout
// =============================================================================

/// Default location of the annotation table, relative to the working directory
pub const DEFAULT_ANNOTATIONS_PATH: &str = "data/structure.csv";

/// Returns true if the times never decrease
pub fn is_non_decreasing(times: &[TimeSec]) -> bool {
    times.windows(2).all(|w| w[0] <= w[1])
}
