use serde::{Deserialize, Serialize};

/// A single chat message recovered from a transcript export.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageRecord {
    /// Calendar date as `YYYY-MM-DD`, or the unknown-date sentinel.
    pub date: String,

    /// Local time as zero-padded 24-hour `HH:MM`.
    pub time: String,

    /// Display name of the sender.
    pub sender: String,

    /// Message body. Multi-line messages are joined with `\n`.
    pub text: String,
}

impl MessageRecord {
    /// Create a new message record.
    pub fn new(
        date: impl Into<String>,
        time: impl Into<String>,
        sender: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            time: time.into(),
            sender: sender.into(),
            text: text.into(),
        }
    }

    /// Append a continuation line to the message body.
    pub fn push_line(&mut self, line: &str) {
        self.text.push('\n');
        self.text.push_str(line);
    }
}

/// A ranked keyword and its corpus frequency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordEntry {
    /// Keyword surface form.
    pub word: String,

    /// Number of occurrences across all messages.
    pub count: u64,
}

/// Message share of a single participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipationEntry {
    /// Display name of the sender.
    pub sender: String,

    /// Number of messages sent.
    pub count: u64,

    /// Share of all messages in percent, rounded to one decimal.
    pub ratio: f64,
}

/// Message count for one hour of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBucket {
    /// Hour of day, 0 to 23.
    pub hour: u32,

    /// Number of messages sent during that hour.
    pub count: u64,
}

/// Lexicon-based interest score with its narrative texts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightResult {
    /// Score between 0 and 100.
    pub score: u8,

    /// Short label for the score band.
    pub label: String,

    /// One-line topic description.
    pub topic: String,

    /// Narrative summary.
    pub summary: String,
}

/// Complete result of analyzing one transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// Per-sender message counts, most active first.
    pub participation: Vec<ParticipationEntry>,

    /// Top keywords, most frequent first.
    pub keywords: Vec<KeywordEntry>,

    /// Number of parsed messages.
    pub total_messages: usize,

    /// Interest score between 0 and 100.
    pub interest_score: u8,

    /// Label of the interest score band.
    pub interest_label: String,

    /// One-line topic description.
    pub topic: String,

    /// Narrative summary.
    pub summary: String,

    /// Hourly message histogram, always 24 entries.
    pub time_distribution: Vec<TimeBucket>,
}
