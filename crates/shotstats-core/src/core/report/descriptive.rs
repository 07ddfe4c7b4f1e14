//! Descriptive Report
//!
//! Runs every analysis over an annotation sequence and collects the results
//! into named report entries. Any fatal error aborts the whole report:
//! no partial report is produced.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::entry::{render_comment, ReportEntry, ReportStyle, ValueFormat};
use crate::core::analysis::{
    analyze_durations, analyze_recurrence, tally_category, CategoryTally, DurationStats,
    RecurrenceStats, StatSummary,
};
use crate::core::annotations::{
    AnnotationRecord, AnnotationSequence, CategoryCode, FlowOfTime, IntExt, LocationColumn,
    TimeOfDay,
};
use crate::core::settings::AnalysisSettings;
use crate::core::CoreResult;

/// Recurrence results for one location column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationRecurrence {
    pub column: LocationColumn,
    pub stats: RecurrenceStats,
    /// Distinct values seen in the column
    pub observed: BTreeSet<String>,
}

/// All statistics for one annotation table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptiveReport {
    /// Total number of records, boundary frames included
    pub shot_count: usize,
    /// Number of records used for location and category statistics
    pub analyzed_count: usize,
    pub durations: DurationStats,
    pub locations: Vec<LocationRecurrence>,
    pub int_or_ext: CategoryTally<IntExt>,
    pub time_of_day: CategoryTally<TimeOfDay>,
    pub flow_of_time: CategoryTally<FlowOfTime>,
}

impl DescriptiveReport {
    /// Builds the report with default settings
    pub fn build(sequence: &AnnotationSequence) -> CoreResult<Self> {
        Self::build_with(sequence, &AnalysisSettings::default())
    }

    /// Builds the report honoring the given settings
    pub fn build_with(
        sequence: &AnnotationSequence,
        settings: &AnalysisSettings,
    ) -> CoreResult<Self> {
        let durations = analyze_durations(sequence.records())?;

        let slice = if settings.exclude_boundary_shots {
            sequence.analysis_slice()
        } else {
            sequence.records()
        };
        debug!(
            "Analyzing {} of {} records for location and category statistics",
            slice.len(),
            sequence.len()
        );

        let locations = LocationColumn::all()
            .into_iter()
            .map(|column| analyze_location(slice, column))
            .collect::<CoreResult<Vec<_>>>()?;

        let report = Self {
            shot_count: sequence.len(),
            analyzed_count: slice.len(),
            durations,
            locations,
            int_or_ext: tally_category(slice.iter().map(|r| &r.int_or_ext)),
            time_of_day: tally_category(slice.iter().map(|r| &r.time_of_day)),
            flow_of_time: tally_category(slice.iter().map(|r| &r.flow_of_time)),
        };
        info!("Computed descriptive statistics for {} shots", report.shot_count);

        Ok(report)
    }

    /// Named entries in report order
    pub fn entries(&self) -> CoreResult<Vec<ReportEntry>> {
        let mut entries = vec![ReportEntry::integer("NShots", self.shot_count)?];

        let d = &self.durations.summary;
        entries.push(ReportEntry::float("ShotDurationMean", d.mean, ValueFormat::Fixed2)?);
        entries.push(ReportEntry::float("ShotDurationMedian", d.median, ValueFormat::Fixed2)?);
        entries.push(ReportEntry::float("ShotDurationMin", d.min, ValueFormat::Fixed2)?);
        entries.push(ReportEntry::float("ShotDurationMax", d.max, ValueFormat::Fixed2)?);
        entries.push(ReportEntry::float("ShotDurationStd", d.std_dev, ValueFormat::Fixed2)?);

        for location in &self.locations {
            let prefix = location.column.label();
            let stats = &location.stats;
            entries.push(ReportEntry::integer(
                format!("{prefix}NDistinct"),
                stats.distinct_values,
            )?);
            push_summary(&mut entries, &format!("{prefix}Revisits"), &stats.revisits)?;
            push_summary(&mut entries, &format!("{prefix}Occurrences"), &stats.occurrences)?;
            push_summary(&mut entries, &format!("{prefix}Consecutive"), &stats.consecutive)?;
        }

        push_tally(&mut entries, &self.int_or_ext)?;
        push_tally(&mut entries, &self.time_of_day)?;
        push_tally(&mut entries, &self.flow_of_time)?;

        Ok(entries)
    }

    /// Diagnostic lines listing the distinct values of each categorical column
    pub fn diagnostics(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .locations
            .iter()
            .map(|location| format_values(location.column.column(), &location.observed))
            .collect();

        lines.push(format_values(&self.int_or_ext.column, &self.int_or_ext.observed));
        lines.push(format_values(&self.time_of_day.column, &self.time_of_day.observed));
        lines.push(format_values(&self.flow_of_time.column, &self.flow_of_time.observed));

        lines
    }

    /// Renders entries followed by diagnostic comments
    pub fn render(&self, style: ReportStyle) -> CoreResult<Vec<String>> {
        let mut lines: Vec<String> = self
            .entries()?
            .iter()
            .map(|entry| entry.render(style))
            .collect();

        lines.extend(
            self.diagnostics()
                .iter()
                .map(|line| render_comment(line, style)),
        );

        Ok(lines)
    }
}

fn analyze_location(
    slice: &[AnnotationRecord],
    column: LocationColumn,
) -> CoreResult<LocationRecurrence> {
    let values: Vec<&str> = slice.iter().map(|r| r.location(column)).collect();
    let stats = analyze_recurrence(&values)?;

    Ok(LocationRecurrence {
        column,
        stats,
        observed: values.iter().map(|v| v.to_string()).collect(),
    })
}

fn push_summary(
    entries: &mut Vec<ReportEntry>,
    prefix: &str,
    summary: &StatSummary,
) -> CoreResult<()> {
    let fields = [
        ("Mean", summary.mean, ValueFormat::Fixed2),
        ("Median", summary.median, ValueFormat::Fixed1),
        ("Min", summary.min, ValueFormat::Integer),
        ("Max", summary.max, ValueFormat::Integer),
    ];
    for (suffix, value, format) in fields {
        entries.push(ReportEntry::float(format!("{prefix}{suffix}"), value, format)?);
    }
    Ok(())
}

fn push_tally<T: CategoryCode>(
    entries: &mut Vec<ReportEntry>,
    tally: &CategoryTally<T>,
) -> CoreResult<()> {
    for code in T::ALL {
        entries.push(ReportEntry::integer(
            format!("NShots{}", code.label()),
            tally.count(*code),
        )?);
    }
    Ok(())
}

fn format_values(column: &str, observed: &BTreeSet<String>) -> String {
    let values: Vec<&str> = observed.iter().map(String::as_str).collect();
    format!("{} values: {}", column, values.join(", "))
}

// =============================================================================
// Tests
// =============================================================================
