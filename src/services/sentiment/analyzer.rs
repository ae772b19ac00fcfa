//! Sentiment analysis for review text.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{
    Assessment, KeyTerm, Review, SentenceSentiment, SentimentResult, SentimentSummary,
    TermSentiment,
};

use super::estimator::{LexiconEstimator, PolarityEstimator};
use super::{round2, stats};

/// Common positive music review terms.
pub const POSITIVE_TERMS: [&str; 15] = [
    "masterpiece",
    "brilliant",
    "exceptional",
    "outstanding",
    "innovative",
    "groundbreaking",
    "excellent",
    "superb",
    "stunning",
    "impressive",
    "perfect",
    "visionary",
    "captivating",
    "spectacular",
    "remarkable",
];

/// Common negative music review terms.
pub const NEGATIVE_TERMS: [&str; 15] = [
    "disappointing",
    "mediocre",
    "uninspired",
    "bland",
    "derivative",
    "forgettable",
    "underwhelming",
    "tedious",
    "redundant",
    "unimaginative",
    "generic",
    "lackluster",
    "monotonous",
    "dull",
    "pretentious",
];

const MAX_KEY_TERMS: usize = 10;
const MAX_SENTENCES: usize = 5;
const MIN_SENTENCE_WORDS: usize = 3;
const STRONG_POLARITY: f64 = 0.3;

struct LexiconTerm {
    term: &'static str,
    sentiment: TermSentiment,
    pattern: Regex,
}

/// Positive terms first, then negative, each in declaration order.
static LEXICON: LazyLock<Vec<LexiconTerm>> = LazyLock::new(|| {
    let positive = POSITIVE_TERMS.iter().map(|t| (*t, TermSentiment::Positive));
    let negative = NEGATIVE_TERMS.iter().map(|t| (*t, TermSentiment::Negative));
    positive
        .chain(negative)
        .map(|(term, sentiment)| LexiconTerm {
            term,
            sentiment,
            pattern: Regex::new(&format!(r"\b{}\b", regex::escape(term)))
                .expect("escaped term is a valid pattern"),
        })
        .collect()
});

/// Analyzes the sentiment of review text.
pub struct SentimentAnalyzer<E = LexiconEstimator> {
    estimator: E,
}

impl SentimentAnalyzer {
    /// Create an analyzer backed by the built-in lexicon estimator.
    pub fn new() -> Self {
        Self::with_estimator(LexiconEstimator::new())
    }
}

impl Default for SentimentAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: PolarityEstimator> SentimentAnalyzer<E> {
    /// Create an analyzer backed by a custom estimator.
    pub fn with_estimator(estimator: E) -> Self {
        Self { estimator }
    }

    /// Analyze the sentiment of a text blob.
    ///
    /// Empty text yields the neutral zero result without consulting the
    /// estimator.
    pub fn analyze_text(&self, text: &str) -> SentimentResult {
        if text.trim().is_empty() {
            return SentimentResult::default();
        }

        let estimate = self.estimator.estimate(text);

        SentimentResult {
            polarity: round2(estimate.polarity),
            subjectivity: round2(estimate.subjectivity),
            assessment: Assessment::from_polarity(estimate.polarity),
            key_terms: self.key_terms(text),
            sentences: self.strong_sentences(text),
        }
    }

    /// Domain lexicon terms found in the text, most frequent first.
    pub fn key_terms(&self, text: &str) -> Vec<KeyTerm> {
        let lower = text.to_lowercase();

        let mut terms: Vec<KeyTerm> = LEXICON
            .iter()
            .filter_map(|entry| {
                let count = entry.pattern.find_iter(&lower).count();
                (count > 0).then(|| KeyTerm {
                    term: entry.term.to_string(),
                    sentiment: entry.sentiment,
                    count,
                })
            })
            .collect();

        terms.sort_by(|a, b| b.count.cmp(&a.count));
        terms.truncate(MAX_KEY_TERMS);
        terms
    }

    /// Summarize a batch of reviews that already carry sentiment.
    pub fn summary_stats(&self, reviews: &[Review]) -> Option<SentimentSummary> {
        stats::summary_stats(reviews)
    }

    /// Sentences of at least three words with strong polarity, most extreme first.
    fn strong_sentences(&self, text: &str) -> Vec<SentenceSentiment> {
        let mut sentences: Vec<SentenceSentiment> = self
            .estimator
            .sentences(text)
            .into_iter()
            .filter(|s| s.word_count >= MIN_SENTENCE_WORDS)
            .filter(|s| s.estimate.polarity.abs() > STRONG_POLARITY)
            .map(|s| SentenceSentiment {
                text: s.text,
                polarity: round2(s.estimate.polarity),
                subjectivity: round2(s.estimate.subjectivity),
                assessment: Assessment::from_polarity(s.estimate.polarity),
            })
            .collect();

        sentences.sort_by(|a, b| b.polarity.abs().total_cmp(&a.polarity.abs()));
        sentences.truncate(MAX_SENTENCES);
        sentences
    }
}
