//! Classification of single transcript lines.
//!
//! KakaoTalk exports come in two shapes. Mobile exports announce each day with
//! a separator line and prefix messages with `[sender] [오후 3:30]`; PC exports
//! repeat the full date on every message line. Both can be mixed in one file.

use crate::error::AnalysisResult;
use regex::{Captures, Regex};
use talkscope_core::MessageRecord;

const DATE_MARKER_PATTERN: &str = r"^-*\s*([0-9]{4})년\s([0-9]{1,2})월\s([0-9]{1,2})일";

const MOBILE_MESSAGE_PATTERN: &str =
    r"^\[(.+?)\]\s*\[(오전|오후|(?i:am|pm))\s*([0-9]{1,2}:[0-9]{2})\]\s*(.*)$";

const PC_MESSAGE_PATTERN: &str = concat!(
    r"^([0-9]{4})\.\s?([0-9]{1,2})\.\s?([0-9]{1,2})\.?\s+",
    r"(오전|오후|(?i:am|pm))\s+([0-9]{1,2}:[0-9]{2}),\s+(.+?)\s:\s+(.*)$"
);

/// Half of the day named by a 12-hour clock marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meridiem {
    /// `오전` / `AM`.
    Morning,
    /// `오후` / `PM`.
    Afternoon,
}

impl Meridiem {
    /// Normalize a localized or English marker, ignoring ASCII case.
    pub fn from_marker(marker: &str) -> Option<Self> {
        match marker {
            "오전" => Some(Self::Morning),
            "오후" => Some(Self::Afternoon),
            m if m.eq_ignore_ascii_case("am") => Some(Self::Morning),
            m if m.eq_ignore_ascii_case("pm") => Some(Self::Afternoon),
            _ => None,
        }
    }
}

/// Convert a 12-hour `H:MM` clock reading to zero-padded 24-hour `HH:MM`.
///
/// The hour is not range-checked; out-of-range values survive the conversion
/// and are rejected later when timestamps are interpreted.
pub fn convert_time(marker: &str, clock: &str) -> Option<String> {
    let meridiem = Meridiem::from_marker(marker)?;
    let (hour, minute) = clock.split_once(':')?;
    let mut hour: u32 = hour.trim().parse().ok()?;
    let minute: u32 = minute.trim().parse().ok()?;

    match meridiem {
        Meridiem::Afternoon if hour != 12 => hour += 12,
        Meridiem::Morning if hour == 12 => hour = 0,
        _ => {}
    }

    Some(format!("{:02}:{:02}", hour, minute))
}

/// Outcome of classifying one raw line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass<'a> {
    /// Empty or whitespace-only line.
    Blank,
    /// Day separator carrying the new date.
    DateMarker(String),
    /// Mobile-format message, dated with the carried date.
    Mobile(MessageRecord),
    /// PC-format message, dated from the line itself.
    Pc(MessageRecord),
    /// Anything else; holds the trimmed line.
    Unclassified(&'a str),
}

/// Compiled line patterns for both export formats.
#[derive(Debug, Clone)]
pub struct LinePatterns {
    date_marker: Regex,
    mobile_message: Regex,
    pc_message: Regex,
}

impl LinePatterns {
    /// Compile the line patterns.
    pub fn new() -> AnalysisResult<Self> {
        Ok(Self {
            date_marker: Regex::new(DATE_MARKER_PATTERN)?,
            mobile_message: Regex::new(MOBILE_MESSAGE_PATTERN)?,
            pc_message: Regex::new(PC_MESSAGE_PATTERN)?,
        })
    }

    /// Classify a raw line. Mobile-format messages take `carried_date`.
    pub fn classify<'a>(&self, raw: &'a str, carried_date: &str) -> LineClass<'a> {
        let line = raw.trim();
        if line.is_empty() {
            return LineClass::Blank;
        }

        if let Some(caps) = self.date_marker.captures(line) {
            if let Some(date) = captured_date(&caps, 1) {
                return LineClass::DateMarker(date);
            }
        }

        if let Some(caps) = self.mobile_message.captures(line) {
            if let Some(time) = convert_time(&caps[2], &caps[3]) {
                return LineClass::Mobile(MessageRecord::new(
                    carried_date,
                    time,
                    &caps[1],
                    &caps[4],
                ));
            }
        }

        if let Some(caps) = self.pc_message.captures(line) {
            if let (Some(date), Some(time)) =
                (captured_date(&caps, 1), convert_time(&caps[4], &caps[5]))
            {
                return LineClass::Pc(MessageRecord::new(date, time, &caps[6], &caps[7]));
            }
        }

        LineClass::Unclassified(line)
    }
}

/// Format year/month/day groups starting at `first` as `YYYY-MM-DD`.
fn captured_date(caps: &Captures<'_>, first: usize) -> Option<String> {
    let year = caps.get(first)?.as_str();
    let month: u32 = caps.get(first + 1)?.as_str().parse().ok()?;
    let day: u32 = caps.get(first + 2)?.as_str().parse().ok()?;
    Some(format!("{}-{:02}-{:02}", year, month, day))
}
