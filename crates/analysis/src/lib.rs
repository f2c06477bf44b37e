//! KakaoTalk transcript parsing and conversation analytics for talkscope.
//!
//! This crate turns exported chat transcripts into message records and derives
//! participation shares, keyword rankings, hourly activity and a lexicon-based
//! interest score from them.

#![deny(missing_docs, unsafe_code)]

/// Transcript line classification and ingestion.
pub mod parsers;

/// Noun tokenization and stopword filtering.
pub mod nlp;

/// Keyword frequency ranking.
pub mod keywords;

/// Participation and hourly activity statistics.
pub mod stats;

/// Lexicon-based interest scoring.
pub mod insight;

/// End-to-end analysis entrypoint.
pub mod pipeline;

/// Error types for analysis operations.
pub mod error;

pub use error::{AnalysisError, AnalysisResult};
pub use parsers::{KakaoTalkParser, TranscriptSource};
pub use pipeline::ChatAnalyzer;
