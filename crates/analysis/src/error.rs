use thiserror::Error;

/// Errors that can occur during analysis operations.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// No transcript text was supplied.
    #[error("Empty input: no transcript text was given")]
    EmptyInput,
    /// Ingestion found no recognizable message lines.
    #[error("Unparseable format: no KakaoTalk messages were recognized")]
    UnparseableFormat,
    /// I/O operation error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Line pattern compilation error.
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),
    /// Morphological analyzer could not be loaded.
    #[error("Tokenizer error: {0}")]
    Tokenizer(String),
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for analysis operations.
pub type AnalysisResult<T> = Result<T, AnalysisError>;
