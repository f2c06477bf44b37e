use std::path::PathBuf;

/// Single-line classification for mobile and PC exports.
pub mod line;

/// Strict transcript decoding.
pub mod encoding;

/// KakaoTalk transcript ingestion.
pub mod kakaotalk;

pub use kakaotalk::KakaoTalkParser;
pub use line::{convert_time, LineClass, LinePatterns, Meridiem};

/// Where a transcript comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptSource {
    /// A transcript file on disk, decoded with the encoding fallback.
    Path(PathBuf),
    /// Already decoded transcript text.
    Text(String),
}

impl TranscriptSource {
    /// Short description for log messages.
    pub fn describe(&self) -> String {
        match self {
            TranscriptSource::Path(path) => path.display().to_string(),
            TranscriptSource::Text(text) => format!("<{} bytes of text>", text.len()),
        }
    }
}
