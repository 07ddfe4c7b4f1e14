//! Report Entries
//!
//! A report entry is a named value plus a rendering hint. Entries render
//! into one line each, either as a LaTeX macro or as a plain `define`.
//!
//! ```text
//! \newcommand{\NShots}{870}
//! define NShots = 870
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::{CoreError, CoreResult};

// =============================================================================
// Style & Format
// =============================================================================

/// Line syntax for rendered entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportStyle {
    /// `\newcommand{\Name}{value}`, comments prefixed with `%`
    #[default]
    Tex,
    /// `define Name = value`, comments prefixed with `#`
    Define,
}

impl ReportStyle {
    /// Prefix for diagnostic comment lines
    pub fn comment_prefix(&self) -> &'static str {
        match self {
            ReportStyle::Tex => "%",
            ReportStyle::Define => "#",
        }
    }
}

impl FromStr for ReportStyle {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tex" | "latex" => Ok(ReportStyle::Tex),
            "define" => Ok(ReportStyle::Define),
            other => Err(CoreError::ValidationError(format!(
                "unknown report style '{}' (expected 'tex' or 'define')",
                other
            ))),
        }
    }
}

impl fmt::Display for ReportStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportStyle::Tex => write!(f, "tex"),
            ReportStyle::Define => write!(f, "define"),
        }
    }
}

/// Numeric rendering hint for an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValueFormat {
    /// Whole number
    Integer,
    /// One decimal place
    Fixed1,
    /// Two decimal places
    Fixed2,
    /// Verbatim text
    Text,
}

/// Raw value of an entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReportValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl ReportValue {
    /// Formats the value according to the rendering hint
    pub fn format(&self, format: ValueFormat) -> String {
        match (self, format) {
            (ReportValue::Text(text), _) => text.clone(),
            (ReportValue::Integer(v), ValueFormat::Integer | ValueFormat::Text) => v.to_string(),
            (ReportValue::Integer(v), ValueFormat::Fixed1) => format!("{:.1}", *v as f64),
            (ReportValue::Integer(v), ValueFormat::Fixed2) => format!("{:.2}", *v as f64),
            (ReportValue::Float(v), ValueFormat::Integer) => format!("{:.0}", v),
            (ReportValue::Float(v), ValueFormat::Fixed1) => format!("{:.1}", v),
            (ReportValue::Float(v), ValueFormat::Fixed2) => format!("{:.2}", v),
            (ReportValue::Float(v), ValueFormat::Text) => v.to_string(),
        }
    }
}

// =============================================================================
// Entry
// =============================================================================

/// One named statistic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportEntry {
    /// Macro name; letters only so it is a valid LaTeX control sequence
    pub name: String,
    pub value: ReportValue,
    pub format: ValueFormat,
}

impl ReportEntry {
    /// Creates an entry, validating the name
    pub fn new(
        name: impl Into<String>,
        value: ReportValue,
        format: ValueFormat,
    ) -> CoreResult<Self> {
        let name = name.into();
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(CoreError::ValidationError(format!(
                "report name '{}' must be non-empty ASCII letters",
                name
            )));
        }

        Ok(Self {
            name,
            value,
            format,
        })
    }

    /// Integer-valued entry
    pub fn integer(name: impl Into<String>, value: usize) -> CoreResult<Self> {
        Self::new(name, ReportValue::Integer(value as i64), ValueFormat::Integer)
    }

    /// Float-valued entry with the given number of decimals
    pub fn float(name: impl Into<String>, value: f64, format: ValueFormat) -> CoreResult<Self> {
        Self::new(name, ReportValue::Float(value), format)
    }

    /// Renders this entry as a single line
    pub fn render(&self, style: ReportStyle) -> String {
        render_entry(&self.name, &self.value, self.format, style)
    }
}

/// Renders a name/value pair in the given style
pub fn render_entry(
    name: &str,
    value: &ReportValue,
    format: ValueFormat,
    style: ReportStyle,
) -> String {
    let value = value.format(format);
    match style {
        ReportStyle::Tex => format!("\\newcommand{{\\{}}}{{{}}}", name, value),
        ReportStyle::Define => format!("define {} = {}", name, value),
    }
}

/// Renders a diagnostic comment line
pub fn render_comment(text: &str, style: ReportStyle) -> String {
    format!("{} {}", style.comment_prefix(), text)
}
