//! Timecode Parsing
//!
//! Converts film timecodes into seconds.
//!
//! # Format
//!
//! ```text
//! HH:MM:SS:Frame
//! 01:02:03:5      -> 3723.2 seconds at 25 fps
//! ```
//!
//! The conversion is pure arithmetic: no upper bound is enforced on any
//! field, so `00:75:00:0` is accepted as 75 minutes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{CoreError, CoreResult, TimeSec};

// =============================================================================
// Timecode Model
// =============================================================================

/// A parsed `HH:MM:SS:Frame` timecode
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timecode {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
    /// Frame within the second; may be fractional
    pub frame: f64,
}

impl Timecode {
    /// Converts to elapsed seconds at the given frame rate
    pub fn to_seconds(&self, fps: u32) -> CoreResult<TimeSec> {
        if fps == 0 {
            return Err(CoreError::InvalidFrameRate(fps));
        }

        Ok(self.hours as f64 * 3600.0
            + self.minutes as f64 * 60.0
            + self.seconds as f64
            + self.frame / fps as f64)
    }
}

impl FromStr for Timecode {
    type Err = CoreError;

    fn from_str(ts: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = ts.split(':').collect();

        if parts.len() != 4 {
            return Err(CoreError::InvalidTimecode(format!(
                "expected HH:MM:SS:Frame, got '{}'",
                ts
            )));
        }

        let integer = |field: &str, name: &str| -> CoreResult<u64> {
            field.trim().parse().map_err(|_| {
                CoreError::InvalidTimecode(format!(
                    "{} '{}' is not an integer in '{}'",
                    name, field, ts
                ))
            })
        };

        let hours = integer(parts[0], "hours")?;
        let minutes = integer(parts[1], "minutes")?;
        let seconds = integer(parts[2], "seconds")?;

        let frame: f64 = parts[3].trim().parse().map_err(|_| {
            CoreError::InvalidTimecode(format!("frame '{}' is not a number in '{}'", parts[3], ts))
        })?;

        if !frame.is_finite() || frame < 0.0 {
            return Err(CoreError::InvalidTimecode(format!(
                "frame '{}' must be a finite, non-negative number in '{}'",
                parts[3], ts
            )));
        }

        Ok(Self {
            hours,
            minutes,
            seconds,
            frame,
        })
    }
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}:{}",
            self.hours, self.minutes, self.seconds, self.frame
        )
    }
}

// =============================================================================
// Conversion Helpers
// =============================================================================

/// Parses a `HH:MM:SS:Frame` timecode into seconds
///
/// `hours*3600 + minutes*60 + seconds + frame/fps`
pub fn timecode_to_sec(ts: &str, fps: u32) -> CoreResult<TimeSec> {
    ts.parse::<Timecode>()?.to_seconds(fps)
}

/// Formats seconds as a normalized timecode (00:00:00:00)
///
/// Used for diagnostics only; fractional frames are rounded to the nearest frame.
pub fn format_timecode(seconds: TimeSec, fps: u32) -> String {
    let fps = fps.max(1) as u64;
    let total_frames = (seconds.max(0.0) * fps as f64).round() as u64;
    let frames = total_frames % fps;
    let total_secs = total_frames / fps;
    let secs = total_secs % 60;
    let total_mins = total_secs / 60;
    let mins = total_mins % 60;
    let hours = total_mins / 60;

    format!("{:02}:{:02}:{:02}:{:02}", hours, mins, secs, frames)
}

// =============================================================================
// Tests
// =============================================================================
