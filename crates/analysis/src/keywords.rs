//! Keyword frequency ranking over message texts.
//!
//! Counting happens in two passes. The first builds the vocabulary with corpus
//! frequencies and keeps only the `top_n` most frequent distinct words; the
//! second sums occurrences of the kept words over every message. Words tied at
//! the cut-off are kept in first-seen order, so a word with the same frequency
//! as the last kept one can be left out.

use crate::nlp::{NounTokenizer, Stopwords};
use std::collections::HashMap;
use std::sync::Arc;
use talkscope_core::constants::MIN_KEYWORD_CHARS;
use talkscope_core::{KeywordEntry, MessageRecord};
use tracing::debug;

/// Extracts ranked noun keywords from messages.
#[derive(Clone)]
pub struct KeywordExtractor {
    tokenizer: Option<Arc<dyn NounTokenizer>>,
    stopwords: Arc<Stopwords>,
}

impl KeywordExtractor {
    /// Create an extractor. Without a tokenizer every extraction is empty.
    pub fn new(tokenizer: Option<Arc<dyn NounTokenizer>>, stopwords: Stopwords) -> Self {
        Self {
            tokenizer,
            stopwords: Arc::new(stopwords),
        }
    }

    /// Whether a tokenizer is available.
    pub fn is_available(&self) -> bool {
        self.tokenizer.is_some()
    }

    /// Rank at most `top_n` keywords by total count, most frequent first.
    pub fn extract(&self, records: &[MessageRecord], top_n: usize) -> Vec<KeywordEntry> {
        let Some(tokenizer) = self.tokenizer.as_deref() else {
            return Vec::new();
        };
        if top_n == 0 {
            return Vec::new();
        }

        let documents: Vec<Vec<String>> = records
            .iter()
            .filter(|record| !record.text.is_empty())
            .map(|record| self.nouns(tokenizer, &record.text.to_lowercase()))
            .collect();

        let mut vocabulary = build_vocabulary(&documents);
        if vocabulary.is_empty() {
            debug!("No keyword candidates in {} messages", documents.len());
            return Vec::new();
        }
        vocabulary.sort_by(|a, b| b.1.cmp(&a.1));
        vocabulary.truncate(top_n);

        let positions: HashMap<&str, usize> = vocabulary
            .iter()
            .enumerate()
            .map(|(position, (word, _))| (word.as_str(), position))
            .collect();

        let mut totals = vec![0u64; vocabulary.len()];
        for document in &documents {
            for word in document {
                if let Some(&position) = positions.get(word.as_str()) {
                    totals[position] += 1;
                }
            }
        }

        let mut keywords: Vec<KeywordEntry> = vocabulary
            .iter()
            .zip(totals)
            .map(|((word, _), count)| KeywordEntry {
                word: word.clone(),
                count,
            })
            .collect();
        keywords.sort_by(|a, b| b.count.cmp(&a.count));
        keywords
    }

    fn nouns(&self, tokenizer: &dyn NounTokenizer, text: &str) -> Vec<String> {
        tokenizer
            .tokenize(text)
            .into_iter()
            .filter(|token| token.is_noun())
            .filter(|token| token.form.chars().count() >= MIN_KEYWORD_CHARS)
            .filter(|token| !self.stopwords.is_stopword(&token.form))
            .map(|token| token.form)
            .collect()
    }
}

/// Distinct words with corpus frequencies, in first-seen order.
fn build_vocabulary(documents: &[Vec<String>]) -> Vec<(String, u64)> {
    let mut vocabulary: Vec<(String, u64)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for word in documents.iter().flatten() {
        match index.get(word.as_str()) {
            Some(&position) => vocabulary[position].1 += 1,
            None => {
                index.insert(word.as_str(), vocabulary.len());
                vocabulary.push((word.clone(), 1));
            }
        }
    }

    vocabulary
}
