use crate::error::{AnalysisError, AnalysisResult};
use crate::insight::InsightScorer;
use crate::keywords::KeywordExtractor;
use crate::nlp::{build_tokenizer, NounTokenizer, Stopwords};
use crate::parsers::{KakaoTalkParser, TranscriptSource};
use crate::stats::{participation, time_distribution};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use talkscope_core::{AnalysisReport, MessageRecord, TalkscopeConfig};
use tracing::{debug, info};

/// Runs ingestion and every analysis over one transcript at a time.
///
/// The analyzer holds only read-only state and can be shared between threads.
#[derive(Clone)]
pub struct ChatAnalyzer {
    parser: KakaoTalkParser,
    keywords: KeywordExtractor,
    scorer: InsightScorer,
    pool_size: usize,
    display_size: usize,
    scratch_dir: Option<PathBuf>,
}

impl ChatAnalyzer {
    /// Build an analyzer with the tokenizer named in the configuration.
    pub fn new(config: &TalkscopeConfig) -> AnalysisResult<Self> {
        Self::with_tokenizer(config, build_tokenizer(config.keywords.tokenizer)?)
    }

    /// Build an analyzer around an injected tokenizer.
    pub fn with_tokenizer(
        config: &TalkscopeConfig,
        tokenizer: Option<Arc<dyn NounTokenizer>>,
    ) -> AnalysisResult<Self> {
        config
            .validate()
            .map_err(|e| AnalysisError::Config(e.to_string()))?;

        let stopwords = Stopwords::with_extra(config.keywords.extra_stopwords.iter().cloned());
        Ok(Self {
            parser: KakaoTalkParser::with_encodings(config.ingest.encodings.clone())?,
            keywords: KeywordExtractor::new(tokenizer, stopwords),
            scorer: InsightScorer::new(),
            pool_size: config.keywords.pool_size,
            display_size: config.keywords.display_size,
            scratch_dir: config.scratch_dir.clone(),
        })
    }

    /// Override how many keywords the report carries.
    pub fn with_display_size(mut self, display_size: usize) -> Self {
        self.display_size = display_size;
        self
    }

    /// Ingest and analyze a transcript.
    ///
    /// Raw text goes through a scratch file so it is decoded exactly like a
    /// transcript read from disk.
    pub fn analyze(&self, source: &TranscriptSource) -> AnalysisResult<AnalysisReport> {
        let records = match source {
            TranscriptSource::Path(path) => self.parser.parse_file(path)?,
            TranscriptSource::Text(text) => self.ingest_text(text)?,
        };

        if records.is_empty() {
            debug!("No messages recognized in {}", source.describe());
            return Err(AnalysisError::UnparseableFormat);
        }

        let report = self.analyze_records(&records);
        info!(
            "Analyzed {} messages from {}",
            report.total_messages,
            source.describe()
        );
        Ok(report)
    }

    /// Run every analysis over already ingested records.
    pub fn analyze_records(&self, records: &[MessageRecord]) -> AnalysisReport {
        let keyword_pool = self.keywords.extract(records, self.pool_size);
        let insight = self.scorer.score(&keyword_pool);

        AnalysisReport {
            participation: participation(records),
            keywords: keyword_pool.into_iter().take(self.display_size).collect(),
            total_messages: records.len(),
            interest_score: insight.score,
            interest_label: insight.label,
            topic: insight.topic,
            summary: insight.summary,
            time_distribution: time_distribution(records),
        }
    }

    fn ingest_text(&self, text: &str) -> AnalysisResult<Vec<MessageRecord>> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AnalysisError::EmptyInput);
        }

        let mut builder = tempfile::Builder::new();
        builder.prefix("talkscope-").suffix(".txt");
        let mut scratch = match &self.scratch_dir {
            Some(dir) => {
                std::fs::create_dir_all(dir)?;
                builder.tempfile_in(dir)?
            }
            None => builder.tempfile()?,
        };
        scratch.write_all(text.as_bytes())?;
        scratch.flush()?;

        // The scratch file is removed when `scratch` drops.
        self.parser.parse_file(scratch.path())
    }
}
