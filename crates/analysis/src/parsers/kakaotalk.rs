use super::encoding::decode;
use super::line::{LineClass, LinePatterns};
use super::TranscriptSource;
use crate::error::AnalysisResult;
use std::path::Path;
use talkscope_core::config::{IngestConfig, TextEncoding};
use talkscope_core::constants::UNKNOWN_DATE;
use talkscope_core::MessageRecord;
use tracing::{debug, info};

/// Parser for KakaoTalk text exports.
///
/// Handles mobile and PC exports, messages spanning several lines, and files
/// saved as UTF-8 (with or without BOM) or CP949.
#[derive(Debug, Clone)]
pub struct KakaoTalkParser {
    patterns: LinePatterns,
    encodings: Vec<TextEncoding>,
}

/// Accumulator threaded through the line pass.
#[derive(Debug)]
struct ParseState {
    carried_date: String,
    records: Vec<MessageRecord>,
}

impl ParseState {
    fn new() -> Self {
        Self {
            carried_date: UNKNOWN_DATE.to_string(),
            records: Vec::new(),
        }
    }

    fn consume(mut self, patterns: &LinePatterns, raw: &str) -> Self {
        match patterns.classify(raw, &self.carried_date) {
            LineClass::Blank => {}
            LineClass::DateMarker(date) => self.carried_date = date,
            LineClass::Mobile(record) => self.records.push(record),
            LineClass::Pc(record) => {
                self.carried_date = record.date.clone();
                self.records.push(record);
            }
            // Lines before the first message have nothing to continue.
            LineClass::Unclassified(line) => {
                if let Some(last) = self.records.last_mut() {
                    last.push_line(line);
                }
            }
        }
        self
    }
}

impl KakaoTalkParser {
    /// Creates a parser trying UTF-8, UTF-8 with BOM, then CP949.
    pub fn new() -> AnalysisResult<Self> {
        Self::with_encodings(IngestConfig::default().encodings)
    }

    /// Creates a parser with an explicit ordered encoding list.
    pub fn with_encodings(encodings: Vec<TextEncoding>) -> AnalysisResult<Self> {
        Ok(Self {
            patterns: LinePatterns::new()?,
            encodings,
        })
    }

    /// Parse a transcript from a file or from decoded text.
    pub fn ingest(&self, source: &TranscriptSource) -> AnalysisResult<Vec<MessageRecord>> {
        match source {
            TranscriptSource::Path(path) => self.parse_file(path),
            TranscriptSource::Text(text) => Ok(self.parse_text(text)),
        }
    }

    /// Read and parse a transcript file.
    ///
    /// Only I/O failures are errors; a file without recognizable messages
    /// yields an empty list.
    pub fn parse_file(&self, path: &Path) -> AnalysisResult<Vec<MessageRecord>> {
        let bytes = std::fs::read(path)?;
        debug!("Read {} bytes from {}", bytes.len(), path.display());
        Ok(self.parse_bytes(&bytes))
    }

    /// Parse raw bytes, keeping the first encoding that yields any message.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Vec<MessageRecord> {
        for &encoding in &self.encodings {
            let Some(text) = decode(bytes, encoding) else {
                debug!("Transcript is not valid {}", encoding);
                continue;
            };

            let records = self.parse_text(&text);
            if !records.is_empty() {
                info!("Parsed {} messages as {}", records.len(), encoding);
                return records;
            }
            debug!("No messages recognized as {}", encoding);
        }

        Vec::new()
    }

    /// Parse decoded transcript text.
    pub fn parse_text(&self, text: &str) -> Vec<MessageRecord> {
        text.split(|c: char| c == '\n' || c == '\r')
            .fold(ParseState::new(), |state, line| {
                state.consume(&self.patterns, line)
            })
            .records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::EUC_KR;

    fn parser() -> KakaoTalkParser {
        KakaoTalkParser::new().unwrap()
    }

    #[test]
    fn date_marker_dates_following_mobile_lines() {
        let text = "--- 2024년 5월 20일 월요일 ---\n[Kim] [오후 3:00] hello\n[Lee] [오후 3:01] hi";
        let records = parser().parse_text(text);

        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.date == "2024-05-20"));
        assert_eq!(records[1].sender, "Lee");
        assert_eq!(records[1].time, "15:01");
    }

    #[test]
    fn pc_line_updates_carried_date_for_later_lines_only() {
        let text = "\
--- 2024년 5월 20일 월요일 ---
[Kim] [오전 9:00] before
2024. 5. 21. 오후 3:00, Kim : hello
[Lee] [오후 3:05] after";
        let records = parser().parse_text(text);

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].date, "2024-05-20");
        assert_eq!(records[1].date, "2024-05-21");
        assert_eq!(records[1].text, "hello");
        assert_eq!(records[2].date, "2024-05-21");
    }

    #[test]
    fn mobile_lines_without_marker_use_unknown_date() {
        let records = parser().parse_text("[Kim] [PM 1:00] first");
        assert_eq!(records[0].date, UNKNOWN_DATE);
        assert_eq!(records[0].time, "13:00");
    }

    #[test]
    fn continuation_lines_join_previous_message() {
        let text = "[Kim] [오후 3:00] hello\nworld\n\n  again  \n[Lee] [오후 3:01] next";
        let records = parser().parse_text(text);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].text, "hello\nworld\nagain");
        assert_eq!(records[1].text, "next");
    }

    #[test]
    fn preamble_before_first_message_is_dropped() {
        let text = "Talk_2024.5.20 with Kim\nSaved on 2024. 5. 22.\n\n[Kim] [오후 3:00] hello";
        let records = parser().parse_text(text);

        assert_eq!(records, vec![MessageRecord::new("Unknown", "15:00", "Kim", "hello")]);
    }

    #[test]
    fn crlf_line_endings_are_accepted() {
        let text = "--- 2024년 1월 2일 화요일 ---\r\n[Kim] [오전 12:30] late\r\nstill here\r\n";
        let records = parser().parse_text(text);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].date, "2024-01-02");
        assert_eq!(records[0].time, "00:30");
        assert_eq!(records[0].text, "late\nstill here");
    }

    #[test]
    fn falls_back_to_cp949() {
        let (bytes, _, had_errors) =
            EUC_KR.encode("--- 2024년 5월 20일 월요일 ---\n[김철수] [오후 3:30] 안녕하세요\n");
        assert!(!had_errors);
        assert!(std::str::from_utf8(&bytes).is_err());

        let records = parser().parse_bytes(&bytes);
        assert_eq!(
            records,
            vec![MessageRecord::new("2024-05-20", "15:30", "김철수", "안녕하세요")]
        );
    }

    #[test]
    fn bom_prefixed_first_line_is_not_a_message_under_plain_utf8() {
        let bytes = "\u{feff}[Kim] [오후 3:00] hello\n[Lee] [오후 3:01] hi".as_bytes();

        let records = parser().parse_bytes(bytes);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].sender, "Lee");

        let sig_first =
            KakaoTalkParser::with_encodings(vec![TextEncoding::Utf8Sig]).unwrap();
        assert_eq!(sig_first.parse_bytes(bytes).len(), 2);
    }

    #[test]
    fn unparseable_bytes_yield_no_records() {
        assert!(parser().parse_bytes(b"just some prose\nnothing else").is_empty());
        assert!(parser().parse_bytes(&[0xff, 0xfe, 0xfd]).is_empty());
        assert!(parser().parse_bytes(b"").is_empty());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = parser()
            .parse_file(&dir.path().join("absent.txt"))
            .unwrap_err();
        assert!(matches!(err, crate::error::AnalysisError::Io(_)));
    }

    #[test]
    fn ingest_reads_files_and_text_alike() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chat.txt");
        let text = "2024. 5. 21. 오후 3:00, Kim : hello\nworld";
        std::fs::write(&path, text).unwrap();

        let from_file = parser()
            .ingest(&TranscriptSource::Path(path))
            .unwrap();
        let from_text = parser()
            .ingest(&TranscriptSource::Text(text.to_string()))
            .unwrap();
        assert_eq!(from_file, from_text);
        assert_eq!(from_file[0].text, "hello\nworld");
    }
}
