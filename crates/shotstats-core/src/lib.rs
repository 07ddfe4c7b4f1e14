//! shotstats Core Library
//!
//! Descriptive statistics over film-shot annotations.
//! This library contains the annotation loader, the analysis engine
//! (durations, recurrence, category tallies), and the report emitter.
//!
//! ## Pipeline
//!
//! ```rust,ignore
//! use shotstats_core::core::annotations::load_annotations;
//! use shotstats_core::core::report::{DescriptiveReport, ReportStyle};
//!
//! let sequence = load_annotations("data/structure.csv", 25)?;
//! let report = DescriptiveReport::build(&sequence)?;
//! for line in report.render(ReportStyle::Tex)? {
//!     println!("{line}");
//! }
//! ```

pub mod core;
