//! Lexicon-based interest scoring.
//!
//! The score only looks at which curated terms occur among the keywords, not at
//! how often they occur.

use once_cell::sync::Lazy;
use std::collections::HashSet;
use talkscope_core::constants::{BASE_INTEREST_SCORE, MAX_INTEREST_SCORE};
use talkscope_core::{InsightResult, KeywordEntry};

/// Strong affection and dating terms.
///
/// `여보야공주` is a single term: the shipped lexicon joined those two words,
/// so neither `여보야` nor `공주` scores on its own.
pub const STRONG_AFFECTION_TERMS: &[&str] = &[
    "사랑", "사랑해", "좋아해", "너밖에", "보고싶", "보고싶다", "보고 싶다", "설레", "썸", "심쿵",
    "고백", "사귀자", "연애", "자기", "자기야", "여보", "여보야공주", "왕자", "내꺼", "내꺼야",
    "결혼", "술", "크리스마스",
];

/// Light affection, compliment and meeting terms.
pub const LIGHT_AFFECTION_TERMS: &[&str] = &[
    "귀엽", "귀여워", "이쁘다", "예쁘다", "잘생겼", "멋있다", "데이트", "영화", "밥먹자", "밥이나",
    "술한잔", "술 한잔", "만날까", "보자", "만나자", "연락", "전화", "심심", "보고싶네", "만나",
    "언제", "시간", "약속",
];

/// Refusal, fatigue and indifference terms.
pub const COLD_TERMS: &[&str] = &[
    "바빠", "피곤", "나중에", "귀찮", "힘들", "관심없", "됐어", "그만", "몰라", "싫어", "안돼",
];

const STRONG_WEIGHT: i32 = 18;
const LIGHT_WEIGHT: i32 = 10;
const COLD_WEIGHT: i32 = -25;

static STRONG_AFFECTION: Lazy<HashSet<&'static str>> =
    Lazy::new(|| STRONG_AFFECTION_TERMS.iter().copied().collect());
static LIGHT_AFFECTION: Lazy<HashSet<&'static str>> =
    Lazy::new(|| LIGHT_AFFECTION_TERMS.iter().copied().collect());
static COLD: Lazy<HashSet<&'static str>> = Lazy::new(|| COLD_TERMS.iter().copied().collect());

/// Fixed texts for one score band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsightBand {
    /// Lowest score in the band.
    pub min_score: u8,
    /// Short label.
    pub label: &'static str,
    /// One-line topic.
    pub topic: &'static str,
    /// Narrative summary.
    pub summary: &'static str,
}

/// Result returned when there are no keywords to score.
pub const INSUFFICIENT_DATA: InsightBand = InsightBand {
    min_score: 0,
    label: "데이터 부족 😢",
    topic: "대화량이 너무 적어서 마음을 읽기 어려워요.",
    summary: "조금 더 대화를 나누고 다시 분석해보는 건 어떨까요?",
};

/// Score bands, highest first.
pub const INSIGHT_BANDS: [InsightBand; 4] = [
    InsightBand {
        min_score: 80,
        label: "저 몰래 두분 이미 사귀고 있죠? 💘",
        topic: "상당히 달달한 분위기! 서로 마음이 통하는 느낌이에요 남은 건 고백 뿐!.",
        summary: "대화에 애정 표현이나 만남 제안, 설레는 뉘앙스가 많이 보여요. \
                  상대방이 당신에게 꽤 많은 호감을 가지고 있을 가능성이 높아요!",
    },
    InsightBand {
        min_score: 60,
        label: "호감 있는 편 💗",
        topic: "친근함 속에 묘한 설렘이 느껴지는 대화네요.",
        summary: "친근한 농담과 가벼운 애정 표현, 만남 이야기가 자연스럽게 오가는 편이에요. \
                  서로 눈치를 보는 단계일 수 있고, 이제부터 작은 디테일 하나하나가 관건일 거 같아요!",
    },
    InsightBand {
        min_score: 40,
        label: "친한 친구 느낌 😊",
        topic: "편하고 재밌는 친구 느낌의 대화가 많아요.",
        summary: "일상 대화와 가벼운 농담 위주라 분위기는 좋지만, 아직 뚜렷한 연애 뉘앙스는 적어요. \
                  조금 더 솔직한 표현이나 개인적인 이야기들을 던져보는 건 어떨까요?",
    },
    InsightBand {
        min_score: 0,
        label: "연애 감정은 낮은 편 😶",
        topic: "아직은 관계를 지켜보는 단계처럼 보여요.",
        summary: "대화에서 감정 표현이 적거나, 거절·회피 느낌의 표현이 조금 섞여 있을 수 있어요. \
                  너무 조급해하지 말고, 상대의 상황과 컨디션을 배려하면서 천천히 다가가 보세요.",
    },
];

/// Number of distinct terms of each lexicon found in a word set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LexiconHits {
    /// Strong affection terms present.
    pub strong: usize,
    /// Light affection terms present.
    pub light: usize,
    /// Cold terms present.
    pub cold: usize,
}

impl LexiconHits {
    /// Clamped interest score for these hits.
    pub fn score(&self) -> u8 {
        let raw = BASE_INTEREST_SCORE
            + STRONG_WEIGHT * self.strong as i32
            + LIGHT_WEIGHT * self.light as i32
            + COLD_WEIGHT * self.cold as i32;
        raw.clamp(0, MAX_INTEREST_SCORE) as u8
    }
}

/// Count lexicon members present among `words`.
pub fn lexicon_hits<'a, I>(words: I) -> LexiconHits
where
    I: IntoIterator<Item = &'a str>,
{
    let distinct: HashSet<&str> = words.into_iter().collect();
    let count = |lexicon: &HashSet<&'static str>| {
        lexicon.iter().filter(|term| distinct.contains(*term)).count()
    };

    LexiconHits {
        strong: count(&*STRONG_AFFECTION),
        light: count(&*LIGHT_AFFECTION),
        cold: count(&*COLD),
    }
}

/// Band containing `score`.
pub fn band_for(score: u8) -> &'static InsightBand {
    INSIGHT_BANDS
        .iter()
        .find(|band| score >= band.min_score)
        .unwrap_or(&INSIGHT_BANDS[INSIGHT_BANDS.len() - 1])
}

/// Stateless interest scorer over keyword lists.
#[derive(Debug, Clone, Copy, Default)]
pub struct InsightScorer;

impl InsightScorer {
    /// Create a new scorer.
    pub fn new() -> Self {
        Self
    }

    /// Score keywords into an interest result.
    pub fn score(&self, keywords: &[KeywordEntry]) -> InsightResult {
        if keywords.is_empty() {
            return to_result(0, &INSUFFICIENT_DATA);
        }

        let hits = lexicon_hits(
            keywords
                .iter()
                .map(|k| k.word.as_str())
                .filter(|w| !w.is_empty()),
        );
        let score = hits.score();
        to_result(score, band_for(score))
    }
}

/// Topic line for a keyword list.
pub fn infer_topic(keywords: &[KeywordEntry]) -> String {
    InsightScorer::new().score(keywords).topic
}

fn to_result(score: u8, band: &InsightBand) -> InsightResult {
    InsightResult {
        score,
        label: band.label.to_string(),
        topic: band.topic.to_string(),
        summary: band.summary.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keywords(words: &[&str]) -> Vec<KeywordEntry> {
        words
            .iter()
            .map(|w| KeywordEntry {
                word: w.to_string(),
                count: 3,
            })
            .collect()
    }

    #[test]
    fn empty_keywords_are_insufficient_data() {
        let result = InsightScorer::new().score(&[]);
        assert_eq!(result.score, 0);
        assert_eq!(result.label, "데이터 부족 😢");
        assert_eq!(result.topic, INSUFFICIENT_DATA.topic);
    }

    #[test]
    fn neutral_keywords_score_fifty() {
        let result = InsightScorer::new().score(&keywords(&["회사", "점심"]));
        assert_eq!(result.score, 50);
        assert_eq!(result.label, "친한 친구 느낌 😊");
    }

    #[test]
    fn scores_follow_lexicon_weights() {
        // 50 + 18 + 10
        let result = InsightScorer::new().score(&keywords(&["사랑", "영화", "회사"]));
        assert_eq!(result.score, 78);
        assert_eq!(result.label, INSIGHT_BANDS[1].label);

        // 50 + 10 - 25
        let result = InsightScorer::new().score(&keywords(&["약속", "피곤"]));
        assert_eq!(result.score, 35);
        assert_eq!(result.summary, INSIGHT_BANDS[3].summary);
    }

    #[test]
    fn scores_are_clamped() {
        let high = InsightScorer::new().score(&keywords(&["사랑", "고백", "연애", "결혼"]));
        assert_eq!(high.score, 100);
        assert_eq!(high.label, "저 몰래 두분 이미 사귀고 있죠? 💘");

        let low = InsightScorer::new().score(&keywords(&["바빠", "피곤", "귀찮"]));
        assert_eq!(low.score, 0);
        assert_eq!(low.label, "연애 감정은 낮은 편 😶");
    }

    #[test]
    fn hits_ignore_repeated_words() {
        let hits = lexicon_hits(["영화", "영화", "시간", "몰라"]);
        assert_eq!(
            hits,
            LexiconHits {
                strong: 0,
                light: 2,
                cold: 1
            }
        );
    }

    #[test]
    fn joined_term_only_matches_whole() {
        assert_eq!(InsightScorer::new().score(&keywords(&["공주"])).score, 50);
        assert_eq!(InsightScorer::new().score(&keywords(&["여보야"])).score, 50);
        assert_eq!(InsightScorer::new().score(&keywords(&["여보야공주"])).score, 68);
        assert_eq!(STRONG_AFFECTION_TERMS.len(), 23);
    }

    #[test]
    fn band_edges() {
        assert_eq!(band_for(100).min_score, 80);
        assert_eq!(band_for(80).min_score, 80);
        assert_eq!(band_for(79).min_score, 60);
        assert_eq!(band_for(60).min_score, 60);
        assert_eq!(band_for(59).min_score, 40);
        assert_eq!(band_for(40).min_score, 40);
        assert_eq!(band_for(39).min_score, 0);
        assert_eq!(band_for(0).min_score, 0);
    }

    #[test]
    fn lexicons_do_not_overlap() {
        for term in STRONG_AFFECTION_TERMS {
            assert!(!LIGHT_AFFECTION.contains(term) && !COLD.contains(term));
        }
        for term in LIGHT_AFFECTION_TERMS {
            assert!(!COLD.contains(term));
        }
    }

    #[test]
    fn infer_topic_matches_score_band() {
        assert_eq!(infer_topic(&keywords(&["사랑", "고백"])), INSIGHT_BANDS[0].topic);
    }
}
