//! Review and track data structures.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::models::{Assessment, SentimentResult};

/// Label, year and genres shown alongside a review.
///
/// Label and year are only present together, when the page carries a
/// "Label • Year" line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,

    #[serde(default)]
    pub genres: Vec<String>,
}

/// A track reviewed within an album review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub title: String,

    #[serde(default)]
    pub content: Option<String>,

    #[serde(default)]
    pub sentiment: Option<SentimentResult>,
}

/// A full album review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    /// Album title
    pub title: String,

    /// Artist name(s)
    pub artist: String,

    /// Canonical page URL
    pub url: String,

    /// Cleaned body text
    pub content: String,

    /// Numeric score
    pub score: Option<f64>,

    /// Publication timestamp
    pub published_date: Option<DateTime<FixedOffset>>,

    #[serde(default)]
    pub metadata: ReviewMetadata,

    #[serde(default)]
    pub tracks: Vec<Track>,

    /// Filled in on request by the sentiment analyzer
    #[serde(default)]
    pub sentiment: Option<SentimentResult>,
}

/// Compact view of a review for listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewSummary {
    pub title: String,
    pub artist: String,
    pub score: Option<f64>,
    pub url: String,
    /// `YYYY-MM-DD`
    pub published_date: Option<String>,
    pub genres: Vec<String>,
    pub sentiment_assessment: Option<Assessment>,
}

impl Review {
    /// Summarize the review for listings.
    pub fn summary(&self) -> ReviewSummary {
        ReviewSummary {
            title: self.title.clone(),
            artist: self.artist.clone(),
            score: self.score,
            url: self.url.clone(),
            published_date: self
                .published_date
                .map(|d| d.format("%Y-%m-%d").to_string()),
            genres: self.metadata.genres.clone(),
            sentiment_assessment: self.sentiment.as_ref().map(|s| s.assessment),
        }
    }

    /// Whether sentiment has been attached.
    pub fn has_sentiment(&self) -> bool {
        self.sentiment.is_some()
    }
}
