//! Annotation Table Loader
//!
//! Reads the comma-separated annotation table into an [`AnnotationSequence`].
//!
//! # Table Format
//!
//! ```text
//! time,major_location,setting,locale,int_or_ext,time_of_day,flow_of_time
//! 00:00:00:0,none,none,none,int,day,0
//! 00:00:41:11,farm,house,kitchen,int,day,0
//! ```
//!
//! Columns may come in any order and extra columns are ignored.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use super::models::{AnnotationRecord, AnnotationSequence, Category};
use crate::core::timecode::timecode_to_sec;
use crate::core::{CoreError, CoreResult};

/// Columns the loader requires, in canonical order
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "time",
    "major_location",
    "setting",
    "locale",
    "int_or_ext",
    "time_of_day",
    "flow_of_time",
];

// =============================================================================
// Header Mapping
// =============================================================================

/// Positions of the required columns within a row
#[derive(Clone, Debug, PartialEq, Eq)]
struct ColumnIndex {
    positions: [usize; 7],
    width: usize,
}

impl ColumnIndex {
    fn from_header(header: &str) -> CoreResult<Self> {
        let names: Vec<String> = split_row(header)
            .iter()
            .map(|name| name.trim().to_ascii_lowercase())
            .collect();

        let mut positions = [0usize; 7];
        for (slot, required) in positions.iter_mut().zip(REQUIRED_COLUMNS) {
            *slot = names
                .iter()
                .position(|name| name == required)
                .ok_or_else(|| CoreError::MissingColumn(required.to_string()))?;
        }

        let width = positions.iter().copied().max().unwrap_or(0) + 1;
        Ok(Self { positions, width })
    }

    fn field<'a>(&self, fields: &'a [String], column: usize) -> &'a str {
        fields[self.positions[column]].trim()
    }
}

/// Splits one row on commas, honoring double-quoted fields
fn split_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);

    fields
}

// =============================================================================
// Parsing
// =============================================================================

/// Parses annotation table content into a sequence
///
/// Row order is preserved: it is screen order and is never re-sorted.
pub fn parse_annotations(content: &str, fps: u32) -> CoreResult<AnnotationSequence> {
    let mut lines = content
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim_end_matches('\r')))
        .filter(|(_, line)| !line.trim().is_empty());

    let (_, header) = lines
        .next()
        .ok_or_else(|| CoreError::ValidationError("annotation table is empty".to_string()))?;
    let columns = ColumnIndex::from_header(header.trim_start_matches('\u{feff}'))?;

    let mut records = Vec::new();
    for (line_no, line) in lines {
        let record = parse_row(&columns, line, line_no, fps).map_err(|e| e.at_line(line_no))?;
        records.push(record);
    }

    warn_on_time_decrease(&records);
    debug!("Parsed {} annotation records", records.len());

    Ok(AnnotationSequence::new(records))
}

fn parse_row(
    columns: &ColumnIndex,
    line: &str,
    line_no: usize,
    fps: u32,
) -> CoreResult<AnnotationRecord> {
    let fields = split_row(line);
    if fields.len() < columns.width {
        return Err(CoreError::MalformedRow {
            line: line_no,
            reason: format!(
                "expected at least {} fields, found {}",
                columns.width,
                fields.len()
            ),
        });
    }

    Ok(AnnotationRecord {
        time_seconds: timecode_to_sec(columns.field(&fields, 0), fps)?,
        major_location: columns.field(&fields, 1).to_string(),
        setting: columns.field(&fields, 2).to_string(),
        locale: columns.field(&fields, 3).to_string(),
        int_or_ext: Category::parse(columns.field(&fields, 4)),
        time_of_day: Category::parse(columns.field(&fields, 5)),
        flow_of_time: Category::parse(columns.field(&fields, 6)),
    })
}

/// Logs every place where shot times go backwards
///
/// Decreasing times indicate malformed source data but are not fatal.
fn warn_on_time_decrease(records: &[AnnotationRecord]) {
    for (idx, pair) in records.windows(2).enumerate() {
        if pair[1].time_seconds < pair[0].time_seconds {
            warn!(
                "Shot {} starts before shot {} ({:.3}s < {:.3}s)",
                idx + 1,
                idx,
                pair[1].time_seconds,
                pair[0].time_seconds
            );
        }
    }
}

/// Loads the annotation table from disk
pub fn load_annotations<P: AsRef<Path>>(path: P, fps: u32) -> CoreResult<AnnotationSequence> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(CoreError::FileNotFound(path.to_string_lossy().to_string()));
    }

    let content = fs::read_to_string(path)?;
    let sequence = parse_annotations(&content, fps)?;
    debug!("Loaded {} shots from {}", sequence.len(), path.display());

    Ok(sequence)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::annotations::{FlowOfTime, IntExt, TimeOfDay};
    use std::io::Write;

    const SAMPLE: &str = "\
time,major_location,setting,locale,int_or_ext,time_of_day,flow_of_time
00:00:00:0,none,none,none,int,day,0
00:00:41:11,farm,house,kitchen,int,day,0
00:01:02:3,farm,yard,yard,ext,night,+
00:01:30:0,city,street,\"corner, north\",ext,day,++
00:02:00:0,none,none,none,int,day,-
";

    #[test]
    fn test_parse_annotations_sample() {
        let seq = parse_annotations(SAMPLE, 25).unwrap();

        assert_eq!(seq.len(), 5);
        let rec = &seq.records()[1];
        assert!((rec.time_seconds - 41.44).abs() < 1e-9);
        assert_eq!(rec.major_location, "farm");
        assert_eq!(rec.setting, "house");
        assert_eq!(rec.locale, "kitchen");
        assert_eq!(rec.int_or_ext.known(), Some(IntExt::Interior));

        let rec = &seq.records()[2];
        assert_eq!(rec.time_of_day.known(), Some(TimeOfDay::Night));
        assert_eq!(rec.flow_of_time.known(), Some(FlowOfTime::SmallJump));

        let rec = &seq.records()[3];
        assert_eq!(rec.locale, "corner, north");
        assert_eq!(rec.flow_of_time.known(), Some(FlowOfTime::LargeJump));
    }

    #[test]
    fn test_parse_annotations_preserves_order() {
        let content = "\
time,major_location,setting,locale,int_or_ext,time_of_day,flow_of_time
00:00:05:0,b,b,b,int,day,0
00:00:01:0,a,a,a,int,day,0
";
        let seq = parse_annotations(content, 25).unwrap();
        assert_eq!(seq.times(), vec![5.0, 1.0]);
    }

    #[test]
    fn test_parse_annotations_reordered_and_extra_columns() {
        let content = "\
Flow_Of_Time, note ,TIME,locale,setting,major_location,time_of_day,int_or_ext
+,first,00:00:01:0,loc,set,major,night,ext
";
        let seq = parse_annotations(content, 25).unwrap();
        let rec = &seq.records()[0];
        assert_eq!(rec.time_seconds, 1.0);
        assert_eq!(rec.major_location, "major");
        assert_eq!(rec.setting, "set");
        assert_eq!(rec.locale, "loc");
        assert_eq!(rec.int_or_ext.known(), Some(IntExt::Exterior));
        assert_eq!(rec.flow_of_time.known(), Some(FlowOfTime::SmallJump));
    }

    #[test]
    fn test_parse_annotations_unrecognized_tokens_kept() {
        let content = "\
time,major_location,setting,locale,int_or_ext,time_of_day,flow_of_time
00:00:01:0,a,a,a,int/ext,dusk,?
";
        let seq = parse_annotations(content, 25).unwrap();
        let rec = &seq.records()[0];
        assert_eq!(rec.int_or_ext, Category::Unrecognized("int/ext".to_string()));
        assert_eq!(rec.time_of_day, Category::Unrecognized("dusk".to_string()));
        assert_eq!(rec.flow_of_time, Category::Unrecognized("?".to_string()));
    }

    #[test]
    fn test_parse_annotations_skips_blank_lines_and_crlf() {
        let content = "time,major_location,setting,locale,int_or_ext,time_of_day,flow_of_time\r\n\r\n00:00:02:0,a,a,a,int,day,0\r\n";
        let seq = parse_annotations(content, 25).unwrap();
        assert_eq!(seq.len(), 1);
        assert_eq!(seq.records()[0].flow_of_time.known(), Some(FlowOfTime::None));
    }

    #[test]
    fn test_parse_annotations_missing_column() {
        let content = "time,major_location,setting,locale,int_or_ext,time_of_day\n";
        let err = parse_annotations(content, 25).unwrap_err();
        assert!(matches!(err, CoreError::MissingColumn(ref c) if c == "flow_of_time"));
    }

    #[test]
    fn test_parse_annotations_empty_input() {
        assert!(matches!(
            parse_annotations("", 25),
            Err(CoreError::ValidationError(_))
        ));
    }

    #[test]
    fn test_parse_annotations_short_row() {
        let content = "\
time,major_location,setting,locale,int_or_ext,time_of_day,flow_of_time
00:00:01:0,a,a
";
        let err = parse_annotations(content, 25).unwrap_err();
        assert!(matches!(err, CoreError::MalformedRow { line: 2, .. }));
    }

    #[test]
    fn test_parse_annotations_bad_timecode_reports_line() {
        let content = "\
time,major_location,setting,locale,int_or_ext,time_of_day,flow_of_time
00:00:01:0,a,a,a,int,day,0
00:00:02,a,a,a,int,day,0
";
        let err = parse_annotations(content, 25).unwrap_err();
        match err {
            CoreError::Row { line, source } => {
                assert_eq!(line, 3);
                assert!(matches!(*source, CoreError::InvalidTimecode(_)));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_split_row_quotes() {
        assert_eq!(split_row("a,\"b,c\",d"), vec!["a", "b,c", "d"]);
        assert_eq!(split_row("\"say \"\"hi\"\"\",x"), vec!["say \"hi\"", "x"]);
        assert_eq!(split_row(""), vec![""]);
    }

    #[test]
    fn test_load_annotations_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let seq = load_annotations(file.path(), 25).unwrap();
        assert_eq!(seq.len(), 5);
        assert_eq!(seq.analysis_slice().len(), 3);
    }

    #[test]
    fn test_load_annotations_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_annotations(dir.path().join("structure.csv"), 25);
        assert!(matches!(result, Err(CoreError::FileNotFound(_))));
    }
}
