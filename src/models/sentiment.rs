//! Sentiment result structures.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Qualitative bucket for a polarity value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Assessment {
    #[serde(rename = "very positive")]
    VeryPositive,
    #[serde(rename = "positive")]
    Positive,
    #[serde(rename = "neutral")]
    Neutral,
    #[serde(rename = "negative")]
    Negative,
    #[serde(rename = "very negative")]
    VeryNegative,
}

impl Assessment {
    /// Bucket a polarity value.
    ///
    /// Boundaries are inclusive on the positive side and exclusive on the
    /// negative side: `0.6` is very positive, `-0.2` is negative.
    pub fn from_polarity(polarity: f64) -> Self {
        if polarity >= 0.6 {
            Self::VeryPositive
        } else if polarity >= 0.2 {
            Self::Positive
        } else if polarity > -0.2 {
            Self::Neutral
        } else if polarity > -0.6 {
            Self::Negative
        } else {
            Self::VeryNegative
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VeryPositive => "very positive",
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
            Self::VeryNegative => "very negative",
        }
    }
}

impl fmt::Display for Assessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which lexicon a key term came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TermSentiment {
    Positive,
    Negative,
}

/// A domain lexicon term found in the text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyTerm {
    pub term: String,
    pub sentiment: TermSentiment,
    /// Whole-word occurrences in the text
    pub count: usize,
}

/// A sentence with strong sentiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentenceSentiment {
    pub text: String,
    pub polarity: f64,
    pub subjectivity: f64,
    pub assessment: Assessment,
}

/// Sentiment summary of one text blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    /// -1.0 (negative) to 1.0 (positive), two decimals
    pub polarity: f64,

    /// 0.0 (objective) to 1.0 (subjective), two decimals
    pub subjectivity: f64,

    pub assessment: Assessment,

    /// Lexicon hits, most frequent first
    pub key_terms: Vec<KeyTerm>,

    /// Strongest sentences, most extreme first
    pub sentences: Vec<SentenceSentiment>,
}

impl Default for SentimentResult {
    fn default() -> Self {
        Self {
            polarity: 0.0,
            subjectivity: 0.0,
            assessment: Assessment::Neutral,
            key_terms: Vec::new(),
            sentences: Vec::new(),
        }
    }
}

/// The fields of a review that feed batch statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentSample {
    pub title: String,
    pub artist: String,
    pub score: Option<f64>,
    pub polarity: f64,
    pub subjectivity: f64,
}

/// Aggregate sentiment statistics over a batch of scored reviews.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentSummary {
    pub avg_polarity: f64,
    pub avg_subjectivity: f64,

    /// Pearson correlation between score and polarity, when defined
    pub correlation_score_sentiment: Option<f64>,

    pub most_positive: SentimentSample,
    pub most_negative: SentimentSample,
}
