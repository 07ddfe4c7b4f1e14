//! Report Emitter
//!
//! Turns analysis results into named report lines.

pub mod descriptive;
pub mod entry;

pub use descriptive::{DescriptiveReport, LocationRecurrence};
pub use entry::{render_comment, render_entry, ReportEntry, ReportStyle, ReportValue, ValueFormat};
