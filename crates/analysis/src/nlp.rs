use crate::error::{AnalysisError, AnalysisResult};
use jieba_rs::Jieba;
use lindera::{DictionaryConfig, DictionaryKind, Mode, Tokenizer, TokenizerConfig};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use talkscope_core::config::TokenizerKind;
use tracing::{info, warn};

/// Tag for common nouns.
pub const COMMON_NOUN_TAG: &str = "NNG";

/// Tag for proper nouns.
pub const PROPER_NOUN_TAG: &str = "NNP";

/// Frequent chat words that carry no topic.
pub const DEFAULT_STOPWORDS: &[&str] = &[
    "ㅋㅋ", "ㅎㅎ", "ㅠㅠ", "이거", "저거", "그거", "근데", "진짜", "너무", "아니", "이제", "오늘",
    "내일", "그냥", "사람", "생각", "좀", "나", "너", "우리", "사진",
];

/// Postpositions stripped from the end of Hangul words, longest first.
const PARTICLES: &[&str] = &[
    "에서는", "에게서", "으로는", "에서", "에게", "한테", "까지", "부터", "처럼", "보다", "으로",
    "하고", "이나", "이랑", "은", "는", "이", "가", "을", "를", "에", "의", "도", "로", "와", "과",
    "랑", "만",
];

/// Verb and adjective endings; a Hangul word ending in one is not a noun.
const PREDICATE_ENDINGS: &[&str] = &["자", "해", "다", "어", "아", "워", "줘", "요", "네", "까", "죠"];

/// Tag given to words the heuristic tokenizer takes for predicates.
const PREDICATE_TAG: &str = "VV";

/// A surface form with its part-of-speech tag (Sejong tag set).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Surface form.
    pub form: String,
    /// Part-of-speech tag.
    pub tag: String,
}

impl Token {
    /// Create a token.
    pub fn new(form: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            form: form.into(),
            tag: tag.into(),
        }
    }

    /// Whether the token is a common or proper noun.
    pub fn is_noun(&self) -> bool {
        self.tag == COMMON_NOUN_TAG || self.tag == PROPER_NOUN_TAG
    }
}

/// Morphological tagger used for keyword extraction.
///
/// Implementations are called concurrently from several requests and must not
/// keep per-call state.
pub trait NounTokenizer: Send + Sync {
    /// Returns the name of the tokenizer.
    fn name(&self) -> &str;
    /// Split text into tagged tokens.
    fn tokenize(&self, text: &str) -> Vec<Token>;
}

/// Build the configured tokenizer, or `None` when keyword extraction is off.
pub fn build_tokenizer(kind: TokenizerKind) -> AnalysisResult<Option<Arc<dyn NounTokenizer>>> {
    let tokenizer: Arc<dyn NounTokenizer> = match kind {
        TokenizerKind::KoDic => Arc::new(KoDicTokenizer::new()?),
        TokenizerKind::Hangul => Arc::new(HangulTokenizer::new()),
        TokenizerKind::Jieba => Arc::new(JiebaTokenizer::new()),
        TokenizerKind::Disabled => {
            warn!("Noun tokenizer disabled; keyword extraction will be skipped");
            return Ok(None);
        }
    };
    info!("Using {} noun tokenizer", tokenizer.name());
    Ok(Some(tokenizer))
}

/// Korean morphological analyzer backed by lindera and mecab-ko-dic.
///
/// The dictionary already uses Sejong tags, so the first detail field is the
/// token's tag as is. Inflected forms carry compound tags such as `VV+EC` and
/// never count as nouns.
pub struct KoDicTokenizer {
    tokenizer: Tokenizer,
}

impl KoDicTokenizer {
    /// Load the embedded ko-dic dictionary.
    pub fn new() -> AnalysisResult<Self> {
        let config = TokenizerConfig {
            dictionary: DictionaryConfig {
                kind: Some(DictionaryKind::KoDic),
                path: None,
            },
            user_dictionary: None,
            mode: Mode::Normal,
        };
        let tokenizer =
            Tokenizer::from_config(config).map_err(|e| AnalysisError::Tokenizer(e.to_string()))?;
        Ok(Self { tokenizer })
    }
}

impl NounTokenizer for KoDicTokenizer {
    fn name(&self) -> &str {
        "ko-dic"
    }

    fn tokenize(&self, text: &str) -> Vec<Token> {
        let tokens = match self.tokenizer.tokenize(text) {
            Ok(tokens) => tokens,
            Err(e) => {
                warn!("Morphological analysis failed: {}", e);
                return Vec::new();
            }
        };

        tokens
            .into_iter()
            .filter_map(|mut token| {
                let form = token.text.to_string();
                if form.trim().is_empty() {
                    return None;
                }
                let tag = token
                    .get_details()
                    .and_then(|details| details.first().map(|tag| tag.to_string()))
                    .unwrap_or_default();
                Some(Token::new(form, tag))
            })
            .collect()
    }
}

/// Dictionary-free Korean tokenizer.
///
/// Splits on non-alphanumeric characters and strips a trailing postposition
/// from Hangul words. Words ending in a common verb or adjective ending are
/// tagged as predicates; every other Hangul word is taken as a common noun.
#[derive(Debug, Clone, Default)]
pub struct HangulTokenizer;

impl HangulTokenizer {
    /// Create a new HangulTokenizer.
    pub fn new() -> Self {
        Self
    }

    fn strip_particle(word: &str) -> &str {
        let length = word.chars().count();
        for particle in PARTICLES {
            let particle_length = particle.chars().count();
            // Keep at least two syllables so short nouns are not eaten.
            if length >= particle_length + 2 {
                if let Some(stem) = word.strip_suffix(particle) {
                    return stem;
                }
            }
        }
        word
    }

    fn is_predicate(stem: &str) -> bool {
        PREDICATE_ENDINGS.iter().any(|ending| stem.ends_with(ending))
    }
}

fn is_hangul_syllable(c: char) -> bool {
    ('\u{AC00}'..='\u{D7A3}').contains(&c)
}

impl NounTokenizer for HangulTokenizer {
    fn name(&self) -> &str {
        "hangul"
    }

    fn tokenize(&self, text: &str) -> Vec<Token> {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|word| !word.is_empty())
            .map(|word| {
                if word.chars().any(is_hangul_syllable) {
                    let stem = Self::strip_particle(word);
                    if Self::is_predicate(stem) {
                        Token::new(stem, PREDICATE_TAG)
                    } else {
                        Token::new(stem, COMMON_NOUN_TAG)
                    }
                } else if word.chars().all(|c| c.is_ascii_alphabetic()) {
                    Token::new(word, "SL")
                } else if word.chars().all(|c| c.is_numeric()) {
                    Token::new(word, "SN")
                } else {
                    Token::new(word, "SW")
                }
            })
            .collect()
    }
}

/// Tokenizer backed by jieba-rs part-of-speech tagging.
pub struct JiebaTokenizer {
    jieba: Arc<Jieba>,
}

impl JiebaTokenizer {
    /// Create a new JiebaTokenizer with the default dictionary.
    pub fn new() -> Self {
        Self {
            jieba: Arc::new(Jieba::new()),
        }
    }

    fn sejong_tag(tag: &str) -> &str {
        match tag {
            "n" => COMMON_NOUN_TAG,
            "nr" | "ns" | "nt" | "nz" => PROPER_NOUN_TAG,
            other => other,
        }
    }
}

impl Default for JiebaTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl NounTokenizer for JiebaTokenizer {
    fn name(&self) -> &str {
        "jieba"
    }

    fn tokenize(&self, text: &str) -> Vec<Token> {
        self.jieba
            .tag(text, true)
            .into_iter()
            .filter(|tag| !tag.word.trim().is_empty())
            .map(|tag| Token::new(tag.word, Self::sejong_tag(tag.tag)))
            .collect()
    }
}

/// Stopword filter for keyword extraction.
#[derive(Debug, Clone)]
pub struct Stopwords {
    stopwords: HashSet<String>,
}

impl Stopwords {
    /// Create a new Stopwords with the default list.
    pub fn new() -> Self {
        Self::with_custom_list(DEFAULT_STOPWORDS.iter().map(|w| w.to_string()))
    }

    /// Create a new Stopwords with the default list plus `extra` words.
    pub fn with_extra<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut stopwords = Self::new();
        stopwords
            .stopwords
            .extend(extra.into_iter().map(Into::into));
        stopwords
    }

    /// Create a new Stopwords with only the given words.
    pub fn with_custom_list<I, S>(stopwords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            stopwords: stopwords.into_iter().map(Into::into).collect(),
        }
    }

    /// Check if a word is a stopword.
    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }

    /// Number of stopwords.
    pub fn len(&self) -> usize {
        self.stopwords.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.stopwords.is_empty()
    }
}

impl Default for Stopwords {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forms(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.form.as_str()).collect()
    }

    fn nouns(tokens: &[Token]) -> Vec<&str> {
        tokens
            .iter()
            .filter(|t| t.is_noun())
            .map(|t| t.form.as_str())
            .collect()
    }

    #[test]
    fn hangul_tokenizer_strips_postpositions() {
        let tokens = HangulTokenizer::new().tokenize("영화는 내일 극장에서 보자!");
        assert_eq!(forms(&tokens), vec!["영화", "내일", "극장", "보자"]);
        assert_eq!(nouns(&tokens), vec!["영화", "내일", "극장"]);
    }

    #[test]
    fn hangul_tokenizer_skips_verb_forms() {
        let tokens = HangulTokenizer::new().tokenize("사랑해 보고싶다 만나자 귀여워 좋아");
        assert_eq!(tokens.len(), 5);
        assert!(nouns(&tokens).is_empty());
        assert!(tokens.iter().all(|t| t.tag == PREDICATE_TAG));
    }

    #[test]
    fn ko_dic_tags_nouns_but_not_verb_forms() {
        let tokenizer = KoDicTokenizer::new().unwrap();

        let tokens = tokenizer.tokenize("사랑해 보고싶다 만나자 귀여워");
        for surface in ["사랑해", "보고싶다", "만나자", "귀여워"] {
            assert!(!nouns(&tokens).contains(&surface));
        }
        assert!(nouns(&tokenizer.tokenize("만나자 귀여워")).is_empty());

        let tokens = tokenizer.tokenize("내일 영화를 보자");
        assert!(nouns(&tokens).contains(&"영화"));
        assert!(!nouns(&tokens).contains(&"보자"));
    }

    #[test]
    fn hangul_tokenizer_keeps_short_words_whole() {
        let tokens = HangulTokenizer::new().tokenize("사이 고백을");
        assert_eq!(forms(&tokens), vec!["사이", "고백"]);
    }

    #[test]
    fn hangul_tokenizer_tags_non_hangul_words() {
        let tokens = HangulTokenizer::new().tokenize("ok 2024 ㅋㅋ");
        let tags: Vec<&str> = tokens.iter().map(|t| t.tag.as_str()).collect();
        assert_eq!(tags, vec!["SL", "SN", "SW"]);
        assert!(tokens.iter().all(|t| !t.is_noun()));
    }

    #[test]
    fn jieba_tags_place_names_as_proper_nouns() {
        let tokens = JiebaTokenizer::new().tokenize("我们明天去北京");
        let beijing = tokens.iter().find(|t| t.form == "北京").unwrap();
        assert_eq!(beijing.tag, PROPER_NOUN_TAG);
    }

    #[test]
    fn disabled_tokenizer_is_unavailable() {
        assert!(build_tokenizer(TokenizerKind::Disabled).unwrap().is_none());
        assert_eq!(
            build_tokenizer(TokenizerKind::Hangul).unwrap().unwrap().name(),
            "hangul"
        );
    }

    #[test]
    fn stopwords_include_defaults_and_extras() {
        let stopwords = Stopwords::with_extra(["ㅇㅇ"]);
        assert!(stopwords.is_stopword("ㅋㅋ"));
        assert!(stopwords.is_stopword("ㅇㅇ"));
        assert!(!stopwords.is_stopword("영화"));
        assert_eq!(stopwords.len(), DEFAULT_STOPWORDS.len() + 1);
    }
}
