// src/services/extractor.rs

//! Review page extractor.
//!
//! Turns parsed HTML into search results, review URLs and full reviews using
//! the configured CSS selectors. Title, artist and body are required on a
//! review page; every other field is best-effort and only ever degrades to
//! `None` or an empty list.

use std::collections::HashSet;
use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::error::{AppError, Result};
use crate::models::{Review, ReviewMetadata, SearchResult, SelectorConfig, Track};
use crate::utils::parse_selector;
use crate::utils::text::{clean_text, extract_date, extract_score, parse_score};
use crate::utils::url::normalize;

/// "<label> • <year>"
static LABEL_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([^•]+)•\s*(\d{4})").expect("label/year pattern is valid"));

/// Compiled selectors plus the site root used to absolutize links.
pub struct Extractor {
    root: String,
    attr_name: String,
    date_attr: String,
    search_result: Selector,
    search_title: Selector,
    search_artist: Selector,
    search_link: Selector,
    search_score: Selector,
    review_link: Selector,
    review_title: Selector,
    review_artist: Selector,
    review_score: Selector,
    review_body: Selector,
    review_date: Selector,
    meta_label_year: Selector,
    genre_link: Selector,
    track_section: Selector,
    track_item: Selector,
    track_title: Selector,
    track_text: Selector,
}

impl Extractor {
    /// Compile every selector. Fails on the first invalid one.
    pub fn new(selectors: &SelectorConfig, root: &str) -> Result<Self> {
        Ok(Self {
            root: root.to_string(),
            attr_name: selectors.attr_name.clone(),
            date_attr: selectors.date_attr.clone(),
            search_result: parse_selector(&selectors.search_result)?,
            search_title: parse_selector(&selectors.search_title)?,
            search_artist: parse_selector(&selectors.search_artist)?,
            search_link: parse_selector(&selectors.search_link)?,
            search_score: parse_selector(&selectors.search_score)?,
            review_link: parse_selector(&selectors.review_link)?,
            review_title: parse_selector(&selectors.review_title)?,
            review_artist: parse_selector(&selectors.review_artist)?,
            review_score: parse_selector(&selectors.review_score)?,
            review_body: parse_selector(&selectors.review_body)?,
            review_date: parse_selector(&selectors.review_date)?,
            meta_label_year: parse_selector(&selectors.meta_label_year)?,
            genre_link: parse_selector(&selectors.genre_link)?,
            track_section: parse_selector(&selectors.track_section)?,
            track_item: parse_selector(&selectors.track_item)?,
            track_title: parse_selector(&selectors.track_title)?,
            track_text: parse_selector(&selectors.track_text)?,
        })
    }

    /// Extract search result rows in document order.
    ///
    /// Rows without a title, artist or linked review are skipped.
    pub fn search_results(&self, document: &Html) -> Vec<SearchResult> {
        let mut results = Vec::new();

        for (index, row) in document.select(&self.search_result).enumerate() {
            let title = row.select(&self.search_title).next();
            let artist = row.select(&self.search_artist).next();
            let href = row
                .select(&self.search_link)
                .next()
                .and_then(|link| link.value().attr(&self.attr_name));

            let (Some(title), Some(artist), Some(href)) = (title, artist, href) else {
                log::warn!(
                    "Skipping search result #{index}: missing title, artist or link"
                );
                continue;
            };

            let url = normalize(href, &self.root);
            let score = optional("score", &url, self.search_score(row));

            results.push(SearchResult {
                title: element_text(title),
                artist: element_text(artist),
                url,
                score,
            });
        }
        results
    }

    /// Extract review links from a listing page, first occurrence kept.
    pub fn review_urls(&self, document: &Html) -> Vec<String> {
        let mut seen = HashSet::new();
        document
            .select(&self.review_link)
            .filter_map(|link| link.value().attr(&self.attr_name))
            .map(|href| normalize(href, &self.root))
            .filter(|url| seen.insert(url.clone()))
            .collect()
    }

    /// Extract a full review.
    ///
    /// Fails with `AppError::MissingField` when title, artist or body is absent.
    pub fn review(&self, document: &Html, url: &str) -> Result<Review> {
        let title = required(document, &self.review_title, "title", url)?;
        let artist = required(document, &self.review_artist, "artist", url)?;
        let body = required(document, &self.review_body, "content", url)?;

        let score = optional("score", url, self.review_score(document));
        let published_date = optional("published_date", url, self.published_date(document));

        Ok(Review {
            title: element_text(title),
            artist: element_text(artist),
            url: url.to_string(),
            content: joined_text(body),
            score,
            published_date,
            metadata: self.metadata(document, url),
            tracks: self.tracks(document, url),
            sentiment: None,
        })
    }

    fn metadata(&self, document: &Html, url: &str) -> ReviewMetadata {
        let (label, year) = optional("label/year", url, self.label_year(document)).unzip();

        let genres = document
            .select(&self.genre_link)
            .map(element_text)
            .collect();

        ReviewMetadata {
            label,
            year,
            genres,
        }
    }

    fn search_score(&self, row: ElementRef<'_>) -> Field<f64> {
        read_text(row.select(&self.search_score).next(), extract_score)
    }

    fn review_score(&self, document: &Html) -> Field<f64> {
        read_text(document.select(&self.review_score).next(), parse_score)
    }

    fn published_date(&self, document: &Html) -> Field<DateTime<FixedOffset>> {
        let Some(elem) = document.select(&self.review_date).next() else {
            return Field::Absent;
        };
        match elem.value().attr(&self.date_attr) {
            Some(raw) => Field::parsed(raw.to_string(), extract_date(raw)),
            None => Field::Malformed(format!("no '{}' attribute", self.date_attr)),
        }
    }

    fn label_year(&self, document: &Html) -> Field<(String, i32)> {
        read_text(document.select(&self.meta_label_year).next(), |text| {
            let caps = LABEL_YEAR.captures(text)?;
            let year = caps[2].parse::<i32>().ok()?;
            Some((caps[1].trim().to_string(), year))
        })
    }

    fn tracks(&self, document: &Html, url: &str) -> Vec<Track> {
        let Some(section) = document.select(&self.track_section).next() else {
            return Vec::new();
        };

        let mut tracks = Vec::new();
        for (index, item) in section.select(&self.track_item).enumerate() {
            let Some(title) = item.select(&self.track_title).next() else {
                log::warn!("Skipping track #{index} at {url}: no title");
                continue;
            };
            let content = item
                .select(&self.track_text)
                .next()
                .map(element_text)
                .unwrap_or_default();

            tracks.push(Track {
                title: element_text(title),
                content: Some(content),
                sentiment: None,
            });
        }
        tracks
    }
}

/// First match of a field the page cannot do without.
fn required<'a>(
    document: &'a Html,
    selector: &Selector,
    field: &'static str,
    url: &str,
) -> Result<ElementRef<'a>> {
    document.select(selector).next().ok_or_else(|| {
        log::error!("Missing essential field '{field}' at {url}");
        AppError::missing_field(field, url)
    })
}

/// Outcome of one best-effort extraction step.
#[derive(Debug, PartialEq)]
enum Field<T> {
    /// Nothing matched the selector
    Absent,
    /// A match whose content could not be read
    Malformed(String),
    Found(T),
}

impl<T> Field<T> {
    fn parsed(raw: String, value: Option<T>) -> Self {
        match value {
            Some(value) => Self::Found(value),
            None => Self::Malformed(raw),
        }
    }
}

/// Parse the cleaned text of an optional match.
fn read_text<T>(elem: Option<ElementRef<'_>>, parse: impl FnOnce(&str) -> Option<T>) -> Field<T> {
    match elem {
        Some(elem) => {
            let text = element_text(elem);
            let value = parse(&text);
            Field::parsed(text, value)
        }
        None => Field::Absent,
    }
}

/// Collapse a best-effort step to its value. Misses are debug noise,
/// malformed content is a warning.
fn optional<T>(field: &str, url: &str, step: Field<T>) -> Option<T> {
    match step {
        Field::Found(value) => Some(value),
        Field::Absent => {
            log::debug!("Optional field '{field}' absent at {url}");
            None
        }
        Field::Malformed(raw) => {
            log::warn!("Malformed optional field '{field}' at {url}: '{raw}'");
            None
        }
    }
}

/// Cleaned concatenation of an element's text.
fn element_text(elem: ElementRef<'_>) -> String {
    clean_text(&elem.text().collect::<String>())
}

/// Cleaned text nodes joined by single spaces, for multi-paragraph bodies.
fn joined_text(elem: ElementRef<'_>) -> String {
    let parts: Vec<&str> = elem
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    clean_text(&parts.join(" "))
}
