use chrono::{NaiveDateTime, Timelike};
use std::collections::HashMap;
use talkscope_core::constants::HOURS_PER_DAY;
use talkscope_core::{MessageRecord, ParticipationEntry, TimeBucket};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Count messages per sender, most active first.
///
/// Senders with equal counts keep the order in which they first appear.
pub fn participation(records: &[MessageRecord]) -> Vec<ParticipationEntry> {
    if records.is_empty() {
        return Vec::new();
    }

    let mut counts: Vec<(&str, u64)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for record in records {
        let sender = record.sender.as_str();
        match index.get(sender) {
            Some(&position) => counts[position].1 += 1,
            None => {
                index.insert(sender, counts.len());
                counts.push((sender, 1));
            }
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    let total = records.len() as f64;
    counts
        .into_iter()
        .map(|(sender, count)| ParticipationEntry {
            sender: sender.to_string(),
            count,
            ratio: round_one_decimal(count as f64 / total * 100.0),
        })
        .collect()
}

/// Interpret a record's date and time as a naive local timestamp.
pub fn record_timestamp(record: &MessageRecord) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(&format!("{} {}", record.date, record.time), TIMESTAMP_FORMAT)
        .ok()
}

/// Hourly message histogram with exactly 24 buckets.
///
/// Records whose date or time cannot be interpreted are left out.
pub fn time_distribution(records: &[MessageRecord]) -> Vec<TimeBucket> {
    let mut counts = [0u64; HOURS_PER_DAY as usize];
    for timestamp in records.iter().filter_map(record_timestamp) {
        counts[timestamp.hour() as usize] += 1;
    }

    (0..HOURS_PER_DAY)
        .zip(counts)
        .map(|(hour, count)| TimeBucket { hour, count })
        .collect()
}

/// Round to one decimal, sending ties to the even neighbour.
fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}
