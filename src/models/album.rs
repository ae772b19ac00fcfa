//! Album data structure.

use serde::{Deserialize, Serialize};

use crate::models::Review;

/// One row of a search results page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub artist: String,
    /// Absolute URL of the review
    pub url: String,
    pub score: Option<f64>,
}

/// An album known to the site, identified by its review URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    /// Album title
    pub title: String,

    /// Artist name(s) as shown on the page
    pub artist: String,

    /// Full URL to the album review
    pub url: String,

    /// Review score, when shown
    pub score: Option<f64>,

    /// Release year
    pub year: Option<i32>,

    /// Genre labels
    #[serde(default)]
    pub genres: Vec<String>,

    /// Record label
    pub label: Option<String>,
}

impl Album {
    /// Build an album from a search result row.
    pub fn from_search_result(result: SearchResult) -> Self {
        Self {
            title: result.title,
            artist: result.artist,
            url: result.url,
            score: result.score,
            year: None,
            genres: Vec::new(),
            label: None,
        }
    }

    /// Build an album from the metadata of a full review.
    pub fn from_review(review: &Review) -> Self {
        Self {
            title: review.title.clone(),
            artist: review.artist.clone(),
            url: review.url.clone(),
            score: review.score,
            year: review.metadata.year,
            genres: review.metadata.genres.clone(),
            label: review.metadata.label.clone(),
        }
    }
}

impl From<SearchResult> for Album {
    fn from(result: SearchResult) -> Self {
        Self::from_search_result(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReviewMetadata;

    #[test]
    fn test_from_search_result() {
        let album = Album::from(SearchResult {
            title: "Kid A".to_string(),
            artist: "Radiohead".to_string(),
            url: "https://pitchfork.com/reviews/albums/radiohead-kid-a/".to_string(),
            score: Some(10.0),
        });
        assert_eq!(album.title, "Kid A");
        assert_eq!(album.score, Some(10.0));
        assert!(album.genres.is_empty());
        assert_eq!(album.label, None);
    }

    #[test]
    fn test_from_review_copies_metadata() {
        let review = Review {
            title: "OK Computer".to_string(),
            artist: "Radiohead".to_string(),
            url: "https://pitchfork.com/reviews/albums/radiohead-ok-computer/".to_string(),
            content: "A groundbreaking album.".to_string(),
            score: Some(10.0),
            published_date: None,
            metadata: ReviewMetadata {
                label: Some("XL Recordings".to_string()),
                year: Some(1997),
                genres: vec!["Rock".to_string()],
            },
            tracks: Vec::new(),
            sentiment: None,
        };

        let album = Album::from_review(&review);
        assert_eq!(album.year, Some(1997));
        assert_eq!(album.label.as_deref(), Some("XL Recordings"));
        assert_eq!(album.genres, vec!["Rock".to_string()]);
        assert_eq!(album.url, review.url);
    }
}
