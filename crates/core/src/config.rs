use crate::constants::{
    APP_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_KEYWORD_DISPLAY_SIZE, DEFAULT_KEYWORD_POOL_SIZE,
};
use crate::Error;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration for talkscope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TalkscopeConfig {
    /// Directory for scratch files created from raw text input.
    /// The OS temp directory is used when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scratch_dir: Option<PathBuf>,

    /// Transcript ingestion configuration.
    pub ingest: IngestConfig,

    /// Keyword extraction configuration.
    pub keywords: KeywordConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Transcript ingestion configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Candidate text encodings, tried in order.
    pub encodings: Vec<TextEncoding>,
}

/// Text encodings a transcript file may be stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextEncoding {
    /// UTF-8, a leading byte order mark is kept as text.
    Utf8,

    /// UTF-8 with the byte order mark stripped.
    Utf8Sig,

    /// Windows Korean code page 949.
    Cp949,
}

impl TextEncoding {
    /// Canonical name of the encoding.
    pub fn name(&self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Utf8Sig => "utf-8-sig",
            TextEncoding::Cp949 => "cp949",
        }
    }
}

impl std::fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Keyword extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordConfig {
    /// Distinct words counted before the display slice is taken.
    pub pool_size: usize,

    /// Keywords carried in the analysis report.
    pub display_size: usize,

    /// Noun tokenizer backing keyword extraction.
    pub tokenizer: TokenizerKind,

    /// Words ignored in addition to the built-in stopwords.
    pub extra_stopwords: Vec<String>,
}

/// Available noun tokenizers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenizerKind {
    /// lindera morphological analyzer with the mecab-ko-dic dictionary.
    #[serde(rename = "ko-dic")]
    KoDic,

    /// Dictionary-free Hangul word splitter with postposition stripping.
    Hangul,

    /// jieba-rs part-of-speech tagger.
    Jieba,

    /// No tokenizer; keyword extraction is skipped.
    Disabled,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level used when no verbosity flag is given.
    pub level: LogLevel,
}

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Error level.
    Error,

    /// Warning level.
    Warn,

    /// Info level.
    Info,

    /// Debug level.
    Debug,

    /// Trace level.
    Trace,
}

impl TalkscopeConfig {
    /// Default location of the configuration file.
    pub fn default_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().ok_or_else(|| Error::config("Cannot find config directory"))?;
        Ok(config_dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load configuration from file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| Error::Parse(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save configuration to file, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = self.to_toml()?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Serialize the configuration as pretty TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::Parse(format!("Failed to serialize config: {}", e)))
    }

    /// Check settings that would make analysis impossible.
    pub fn validate(&self) -> Result<()> {
        if self.ingest.encodings.is_empty() {
            return Err(Error::validation("ingest.encodings must not be empty"));
        }
        if self.keywords.pool_size == 0 {
            return Err(Error::validation("keywords.pool_size must be at least 1"));
        }
        Ok(())
    }
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            encodings: vec![
                TextEncoding::Utf8,
                TextEncoding::Utf8Sig,
                TextEncoding::Cp949,
            ],
        }
    }
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self {
            pool_size: DEFAULT_KEYWORD_POOL_SIZE,
            display_size: DEFAULT_KEYWORD_DISPLAY_SIZE,
            tokenizer: TokenizerKind::KoDic,
            extra_stopwords: Vec::new(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Warn,
        }
    }
}
