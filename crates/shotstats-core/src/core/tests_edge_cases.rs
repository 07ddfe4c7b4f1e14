//! Edge Case Tests for the Analysis Pipeline
//!
//! These tests push malformed and degenerate inputs through the whole
//! load-analyze-report pipeline.

use crate::core::analysis::{
    analyze_recurrence, occurrences_by_value, revisits_by_value, run_length_encode, shot_durations,
};
use crate::core::annotations::{parse_annotations, Category, IntExt};
use crate::core::report::{DescriptiveReport, ReportStyle};
use crate::core::timecode::timecode_to_sec;
use crate::core::CoreError;

const HEADER: &str = "time,major_location,setting,locale,int_or_ext,time_of_day,flow_of_time";

fn table(rows: &[&str]) -> String {
    let mut content = String::from(HEADER);
    for row in rows {
        content.push('\n');
        content.push_str(row);
    }
    content
}

#[test]
fn test_edge_single_location_film() {
    let content = table(&[
        "00:00:00:0,none,none,none,int,day,0",
        "00:00:05:0,house,house,house,int,day,0",
        "00:00:09:0,house,house,house,int,day,0",
        "00:00:12:0,none,none,none,int,day,0",
    ]);
    let seq = parse_annotations(&content, 25).unwrap();
    let report = DescriptiveReport::build(&seq).unwrap();

    let stats = &report.locations[0].stats;
    assert_eq!(stats.distinct_values, 1);
    assert_eq!(stats.revisits.max, 0.0);
    assert_eq!(stats.occurrences.mean, 2.0);
    assert_eq!(stats.consecutive.count, 1);
}

#[test]
fn test_edge_alternating_locations() {
    // Every shot is a revisit after the first two runs
    let values = ["a", "b", "a", "b", "a", "b"];
    let runs = run_length_encode(&values);
    assert_eq!(runs.len(), 6);
    assert_eq!(revisits_by_value(&runs), vec![("a", 2), ("b", 2)]);
    assert_eq!(occurrences_by_value(&values), vec![("a", 3), ("b", 3)]);

    let stats = analyze_recurrence(&values).unwrap();
    assert_eq!(stats.consecutive.max, 1.0);
    assert_eq!(stats.revisits.mean, 2.0);
}

#[test]
fn test_edge_non_monotonic_times_are_tolerated() {
    let content = table(&[
        "00:00:00:0,none,none,none,int,day,0",
        "00:00:10:0,a,a,a,int,day,0",
        "00:00:05:0,b,b,b,ext,night,-",
        "00:00:20:0,none,none,none,int,day,0",
    ]);
    let seq = parse_annotations(&content, 25).unwrap();
    let report = DescriptiveReport::build(&seq).unwrap();

    assert!(!report.durations.monotonic);
    assert_eq!(report.durations.summary.min, -5.0);
}

#[test]
fn test_edge_duration_sum_matches_span() {
    let times: Vec<f64> = ["00:00:00:0", "00:00:01:13", "00:02:59:24", "01:00:00:1"]
        .iter()
        .map(|ts| timecode_to_sec(ts, 25).unwrap())
        .collect();
    let durations = shot_durations(&times);

    assert_eq!(durations.len(), times.len() - 1);
    let sum: f64 = durations.iter().sum();
    assert!((sum - (times[3] - times[0])).abs() < 1e-9);
}

#[test]
fn test_edge_bad_timecode_aborts_report() {
    let content = table(&[
        "00:00:00:0,none,none,none,int,day,0",
        "00:00:xx:0,a,a,a,int,day,0",
    ]);
    let err = parse_annotations(&content, 25).unwrap_err();
    assert!(matches!(err, CoreError::Row { line: 3, .. }));
}

#[test]
fn test_edge_zero_fps_aborts_load() {
    let content = table(&["00:00:00:0,none,none,none,int,day,0"]);
    let err = parse_annotations(&content, 0).unwrap_err();
    match err {
        CoreError::Row { source, .. } => assert!(matches!(*source, CoreError::InvalidFrameRate(0))),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_edge_all_values_unrecognized() {
    let content = table(&[
        "00:00:00:0,none,none,none,int,day,0",
        "00:00:01:0,a,a,a,INT?,noon,~",
        "00:00:02:0,a,a,a,INT?,noon,~",
        "00:00:03:0,none,none,none,int,day,0",
    ]);
    let seq = parse_annotations(&content, 25).unwrap();
    assert_eq!(
        seq.records()[1].int_or_ext,
        Category::Unrecognized("INT?".to_string())
    );

    let report = DescriptiveReport::build(&seq).unwrap();
    assert_eq!(report.int_or_ext.known_total(), 0);
    assert_eq!(report.int_or_ext.count(IntExt::Interior), 0);
    assert_eq!(report.int_or_ext.unrecognized_total(), 2);

    let lines = report.render(ReportStyle::Tex).unwrap();
    assert!(lines.contains(&"\\newcommand{\\NShotsInterior}{0}".to_string()));
    assert!(lines.contains(&"% int_or_ext values: INT?".to_string()));
}

#[test]
fn test_edge_empty_location_labels() {
    let content = table(&[
        "00:00:00:0,none,none,none,int,day,0",
        "00:00:01:0,,,,int,day,0",
        "00:00:02:0,a,,,int,day,0",
        "00:00:03:0,,,,int,day,0",
        "00:00:04:0,none,none,none,int,day,0",
    ]);
    let seq = parse_annotations(&content, 25).unwrap();
    let report = DescriptiveReport::build(&seq).unwrap();

    // Empty labels are an ordinary value
    let major = &report.locations[0].stats;
    assert_eq!(major.distinct_values, 2);
    assert_eq!(major.revisits.max, 1.0);
}

#[test]
fn test_edge_mixed_spellings_listed_in_diagnostics() {
    let content = table(&[
        "00:00:00:0,none,none,none,int,day,0",
        "00:00:01:0,a,a,a,Interior,day,0",
        "00:00:02:0,a,a,a,INT,Day,0",
        "00:00:03:0,b,b,b,int,day,+",
        "00:00:04:0,none,none,none,int,day,0",
    ]);
    let seq = parse_annotations(&content, 25).unwrap();
    let report = DescriptiveReport::build(&seq).unwrap();

    assert_eq!(report.int_or_ext.count(IntExt::Interior), 3);
    assert_eq!(report.int_or_ext.observed.len(), 3);

    let lines = report.render(ReportStyle::Tex).unwrap();
    assert!(lines.contains(&"% int_or_ext values: INT, Interior, int".to_string()));
    assert!(lines.contains(&"% time_of_day values: Day, day".to_string()));
}
