//! Shot Annotations
//!
//! Typed per-shot annotation records and the table loader that produces them.

pub mod loader;
pub mod models;

pub use loader::{load_annotations, parse_annotations, REQUIRED_COLUMNS};
pub use models::*;
