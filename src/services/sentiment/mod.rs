//! Sentiment scoring.
//!
//! - `SentimentAnalyzer`: polarity, lexicon hits and strong sentences
//! - `PolarityEstimator`: the word-level scoring it builds on
//! - `summary_stats`: aggregates over a batch of scored reviews

mod analyzer;
mod estimator;
mod stats;

pub use analyzer::{NEGATIVE_TERMS, POSITIVE_TERMS, SentimentAnalyzer};
pub use estimator::{Estimate, LexiconEstimator, PolarityEstimator, ScoredSentence};
pub use stats::summary_stats;

/// Round to two decimal places.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
