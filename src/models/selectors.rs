// src/models/selectors.rs

//! CSS selectors for scraping review pages.

use serde::{Deserialize, Serialize};

/// CSS selectors for the search page, review listings and review pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Each result container on the search page
    pub search_result: String,

    /// Album title within a search result
    pub search_title: String,

    /// Artist names within a search result
    pub search_artist: String,

    /// Review link within a search result
    pub search_link: String,

    /// Score badge within a search result
    pub search_score: String,

    /// Review links on an album review listing page
    pub review_link: String,

    /// Album title on a review page
    pub review_title: String,

    /// Artist names on a review page
    pub review_artist: String,

    /// Numeric score on a review page
    pub review_score: String,

    /// Review body container
    pub review_body: String,

    /// Publication time element (read through `date_attr`)
    pub review_date: String,

    /// Attribute holding the machine-readable publication date
    pub date_attr: String,

    /// "Label • Year" line
    pub meta_label_year: String,

    /// Genre links
    pub genre_link: String,

    /// Container holding per-track reviews
    pub track_section: String,

    /// A single track review inside the track section
    pub track_item: String,

    /// Track title inside a track review
    pub track_title: String,

    /// Track text inside a track review
    pub track_text: String,

    /// HTML attribute name for extracting links (usually "href")
    pub attr_name: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            search_result: ".search-results article".to_string(),
            search_title: "h2.title".to_string(),
            search_artist: ".artist-list".to_string(),
            search_link: "a.review__link".to_string(),
            search_score: ".score".to_string(),
            review_link: "a.review__link".to_string(),
            review_title: "h1.review-title".to_string(),
            review_artist: "h2.artist-links".to_string(),
            review_score: "p.score".to_string(),
            review_body: ".review-detail__text".to_string(),
            review_date: "time.pub-date".to_string(),
            date_attr: "datetime".to_string(),
            meta_label_year: ".single-album-tombstone__meta-year".to_string(),
            genre_link: ".genre-list__link".to_string(),
            track_section: ".track-reviews".to_string(),
            track_item: ".track-review".to_string(),
            track_title: ".track-review__title".to_string(),
            track_text: ".track-review__text".to_string(),
            attr_name: "href".to_string(),
        }
    }
}

impl SelectorConfig {
    /// Every CSS selector paired with its field name, for validation.
    ///
    /// Attribute names are not selectors and are left out.
    pub fn entries(&self) -> [(&'static str, &str); 17] {
        [
            ("search_result", self.search_result.as_str()),
            ("search_title", self.search_title.as_str()),
            ("search_artist", self.search_artist.as_str()),
            ("search_link", self.search_link.as_str()),
            ("search_score", self.search_score.as_str()),
            ("review_link", self.review_link.as_str()),
            ("review_title", self.review_title.as_str()),
            ("review_artist", self.review_artist.as_str()),
            ("review_score", self.review_score.as_str()),
            ("review_body", self.review_body.as_str()),
            ("review_date", self.review_date.as_str()),
            ("meta_label_year", self.meta_label_year.as_str()),
            ("genre_link", self.genre_link.as_str()),
            ("track_section", self.track_section.as_str()),
            ("track_item", self.track_item.as_str()),
            ("track_title", self.track_title.as_str()),
            ("track_text", self.track_text.as_str()),
        ]
    }
}
