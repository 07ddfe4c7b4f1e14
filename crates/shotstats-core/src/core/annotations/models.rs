//! Annotation Data Models
//!
//! Defines the per-shot annotation record and the categorical columns it carries.

use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::core::TimeSec;

// =============================================================================
// Category Codes
// =============================================================================

/// A categorical column with a small, fixed vocabulary
pub trait CategoryCode: Copy + Eq + Ord + Hash + fmt::Debug + 'static {
    /// Column name in the source table
    const COLUMN: &'static str;

    /// Every code in the vocabulary, in report order
    const ALL: &'static [Self];

    /// Parses a raw token from the source table
    fn from_token(token: &str) -> Option<Self>;

    /// Canonical token as written in the source table
    fn token(self) -> &'static str;

    /// CamelCase label used in report names
    fn label(self) -> &'static str;
}

/// A parsed category value: either a known code or the raw token that didn't match
///
/// Known codes keep their trimmed source spelling so that `Interior`, `INT`
/// and `int` stay distinguishable in diagnostics.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category<T> {
    Known { code: T, raw: String },
    Unrecognized(String),
}

impl<T: CategoryCode> Category<T> {
    /// Validates a raw token against the vocabulary of `T`
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match T::from_token(trimmed) {
            Some(code) => Category::Known {
                code,
                raw: trimmed.to_string(),
            },
            None => Category::Unrecognized(trimmed.to_string()),
        }
    }

    /// Returns the known code, if any
    pub fn known(&self) -> Option<T> {
        match self {
            Category::Known { code, .. } => Some(*code),
            Category::Unrecognized(_) => None,
        }
    }

    /// Returns the trimmed token as written in the source table
    pub fn as_token(&self) -> &str {
        match self {
            Category::Known { raw, .. } | Category::Unrecognized(raw) => raw,
        }
    }
}

/// Interior or exterior shot
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntExt {
    Interior,
    Exterior,
}

impl CategoryCode for IntExt {
    const COLUMN: &'static str = "int_or_ext";
    const ALL: &'static [Self] = &[IntExt::Interior, IntExt::Exterior];

    fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "int" | "interior" => Some(IntExt::Interior),
            "ext" | "exterior" => Some(IntExt::Exterior),
            _ => None,
        }
    }

    fn token(self) -> &'static str {
        match self {
            IntExt::Interior => "int",
            IntExt::Exterior => "ext",
        }
    }

    fn label(self) -> &'static str {
        match self {
            IntExt::Interior => "Interior",
            IntExt::Exterior => "Exterior",
        }
    }
}

/// Time of day shown in the shot
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    Day,
    Night,
}

impl CategoryCode for TimeOfDay {
    const COLUMN: &'static str = "time_of_day";
    const ALL: &'static [Self] = &[TimeOfDay::Day, TimeOfDay::Night];

    fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "day" => Some(TimeOfDay::Day),
            "night" => Some(TimeOfDay::Night),
            _ => None,
        }
    }

    fn token(self) -> &'static str {
        match self {
            TimeOfDay::Day => "day",
            TimeOfDay::Night => "night",
        }
    }

    fn label(self) -> &'static str {
        match self {
            TimeOfDay::Day => "Day",
            TimeOfDay::Night => "Night",
        }
    }
}

/// Narrative flow of time relative to the previous shot
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowOfTime {
    /// `0`: continuous
    None,
    /// `+`: small jump forward
    SmallJump,
    /// `++`: large jump forward
    LargeJump,
    /// `-`: jump back in time
    Flashback,
}

impl CategoryCode for FlowOfTime {
    const COLUMN: &'static str = "flow_of_time";
    const ALL: &'static [Self] = &[
        FlowOfTime::None,
        FlowOfTime::SmallJump,
        FlowOfTime::LargeJump,
        FlowOfTime::Flashback,
    ];

    fn from_token(token: &str) -> Option<Self> {
        match token {
            "0" => Some(FlowOfTime::None),
            "+" => Some(FlowOfTime::SmallJump),
            "++" => Some(FlowOfTime::LargeJump),
            "-" => Some(FlowOfTime::Flashback),
            _ => None,
        }
    }

    fn token(self) -> &'static str {
        match self {
            FlowOfTime::None => "0",
            FlowOfTime::SmallJump => "+",
            FlowOfTime::LargeJump => "++",
            FlowOfTime::Flashback => "-",
        }
    }

    fn label(self) -> &'static str {
        match self {
            FlowOfTime::None => "FlowNone",
            FlowOfTime::SmallJump => "SmallJump",
            FlowOfTime::LargeJump => "LargeJump",
            FlowOfTime::Flashback => "Flashback",
        }
    }
}

// =============================================================================
// Annotation Record
// =============================================================================

/// One annotated shot
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationRecord {
    /// Shot start time in seconds
    pub time_seconds: TimeSec,
    pub major_location: String,
    pub setting: String,
    pub locale: String,
    pub int_or_ext: Category<IntExt>,
    pub time_of_day: Category<TimeOfDay>,
    pub flow_of_time: Category<FlowOfTime>,
}

/// Free-form location columns analyzed for recurrence
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationColumn {
    MajorLocation,
    Setting,
    Locale,
}

impl LocationColumn {
    /// Returns all location columns in report order
    pub fn all() -> [LocationColumn; 3] {
        [
            LocationColumn::MajorLocation,
            LocationColumn::Setting,
            LocationColumn::Locale,
        ]
    }

    /// Column name in the source table
    pub fn column(self) -> &'static str {
        match self {
            LocationColumn::MajorLocation => "major_location",
            LocationColumn::Setting => "setting",
            LocationColumn::Locale => "locale",
        }
    }

    /// CamelCase label used in report names
    pub fn label(self) -> &'static str {
        match self {
            LocationColumn::MajorLocation => "MajorLocation",
            LocationColumn::Setting => "Setting",
            LocationColumn::Locale => "Locale",
        }
    }
}

impl AnnotationRecord {
    /// Returns the value of a free-form location column
    pub fn location(&self, column: LocationColumn) -> &str {
        match column {
            LocationColumn::MajorLocation => &self.major_location,
            LocationColumn::Setting => &self.setting,
            LocationColumn::Locale => &self.locale,
        }
    }
}

// =============================================================================
// Annotation Sequence
// =============================================================================

/// Shots in projection order
///
/// The first and last records are leading/trailing non-content frames:
/// they count toward durations but not toward location or category statistics.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationSequence {
    records: Vec<AnnotationRecord>,
}

impl AnnotationSequence {
    /// Creates a sequence from records in screen order
    pub fn new(records: Vec<AnnotationRecord>) -> Self {
        Self { records }
    }

    /// All records, including the boundary frames
    pub fn records(&self) -> &[AnnotationRecord] {
        &self.records
    }

    /// Records without the first and last one
    pub fn analysis_slice(&self) -> &[AnnotationRecord] {
        match self.records.len() {
            0..=2 => &[],
            n => &self.records[1..n - 1],
        }
    }

    /// Shot start times in screen order
    pub fn times(&self) -> Vec<TimeSec> {
        self.records.iter().map(|r| r.time_seconds).collect()
    }

    /// Returns the number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if there are no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn record(time: f64, location: &str) -> AnnotationRecord {
        AnnotationRecord {
            time_seconds: time,
            major_location: location.to_string(),
            setting: location.to_string(),
            locale: location.to_string(),
            int_or_ext: Category::parse("int"),
            time_of_day: Category::parse("day"),
            flow_of_time: Category::parse("0"),
        }
    }

    #[test]
    fn test_category_parse_known() {
        assert_eq!(Category::<IntExt>::parse("ext").known(), Some(IntExt::Exterior));
        assert_eq!(Category::<IntExt>::parse(" INT ").known(), Some(IntExt::Interior));
        assert_eq!(Category::<TimeOfDay>::parse("Night").known(), Some(TimeOfDay::Night));
        assert_eq!(Category::<FlowOfTime>::parse("++").known(), Some(FlowOfTime::LargeJump));
        assert_eq!(Category::<FlowOfTime>::parse("-").known(), Some(FlowOfTime::Flashback));
    }

    #[test]
    fn test_category_keeps_raw_spelling() {
        let value = Category::<IntExt>::parse(" Interior ");
        assert_eq!(
            value,
            Category::Known {
                code: IntExt::Interior,
                raw: "Interior".to_string(),
            }
        );
        assert_eq!(value.as_token(), "Interior");
        assert_eq!(Category::<IntExt>::parse("INT").as_token(), "INT");
    }

    #[test]
    fn test_category_parse_unrecognized() {
        let value = Category::<TimeOfDay>::parse(" dusk ");
        assert_eq!(value, Category::Unrecognized("dusk".to_string()));
        assert_eq!(value.known(), None);
        assert_eq!(value.as_token(), "dusk");
    }

    #[test]
    fn test_category_token_roundtrip() {
        for code in FlowOfTime::ALL {
            assert_eq!(FlowOfTime::from_token(code.token()), Some(*code));
        }
        for code in IntExt::ALL {
            assert_eq!(IntExt::from_token(code.token()), Some(*code));
        }
    }

    #[test]
    fn test_analysis_slice_excludes_boundaries() {
        let seq = AnnotationSequence::new(vec![
            record(0.0, "start"),
            record(1.0, "a"),
            record(2.0, "b"),
            record(3.0, "end"),
        ]);

        let slice = seq.analysis_slice();
        assert_eq!(slice.len(), 2);
        assert_eq!(slice[0].major_location, "a");
        assert_eq!(slice[1].major_location, "b");
    }

    #[test]
    fn test_analysis_slice_short_sequences() {
        assert!(AnnotationSequence::default().analysis_slice().is_empty());
        let seq = AnnotationSequence::new(vec![record(0.0, "a"), record(1.0, "b")]);
        assert!(seq.analysis_slice().is_empty());
        assert_eq!(seq.len(), 2);
    }

    #[test]
    fn test_location_accessor() {
        let mut rec = record(0.0, "city");
        rec.setting = "street".to_string();
        assert_eq!(rec.location(LocationColumn::MajorLocation), "city");
        assert_eq!(rec.location(LocationColumn::Setting), "street");
        assert_eq!(rec.location(LocationColumn::Locale), "city");
    }
}
