//! shotstats Core Engine
//!
//! Core analysis module.
//! Handles timecode conversion, annotation loading, statistics, and report rendering.

pub mod analysis;
pub mod annotations;
pub mod report;
pub mod settings;
pub mod timecode;

// Re-export common types
mod types;
pub use types::*;

mod error;
pub use error::*;

#[cfg(test)]
mod tests_edge_cases;
