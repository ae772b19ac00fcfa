// src/client.rs

//! Review client.
//!
//! Cache-aside front door over the fetcher, with optional sentiment
//! analysis of every review it returns.

use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::models::{Album, Config, Review, SentimentSummary};
use crate::services::{Fetcher, SentimentAnalyzer};
use crate::storage::DiskCache;
use crate::utils::http::{HttpSession, ReqwestSession};

/// Searches, fetches and scores album reviews.
pub struct ReviewClient<S = ReqwestSession> {
    fetcher: Fetcher<S>,
    cache: DiskCache,
    analyzer: SentimentAnalyzer,
}

impl ReviewClient {
    /// Create a client that talks to the live site.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            fetcher: Fetcher::from_config(config)?,
            cache: DiskCache::from_config(&config.cache),
            analyzer: SentimentAnalyzer::new(),
        })
    }
}

impl<S: HttpSession> ReviewClient<S> {
    /// Create a client over a custom HTTP session.
    pub fn with_session(session: S, config: &Config) -> Result<Self> {
        Ok(Self {
            fetcher: Fetcher::new(session, config)?,
            cache: DiskCache::from_config(&config.cache),
            analyzer: SentimentAnalyzer::new(),
        })
    }

    /// Search albums by free-text query.
    pub fn search_albums(&self, query: &str) -> Result<Vec<Album>> {
        let key = format!("search:{query}");
        if let Some(albums) = self.cached::<Vec<Album>>(&key) {
            return Ok(albums);
        }

        log::info!("Searching albums: {query}");
        let albums: Vec<Album> = self
            .fetcher
            .search(query)?
            .into_iter()
            .map(Album::from)
            .collect();
        self.cache.set(&key, &albums);
        Ok(albums)
    }

    /// Fetch one review by URL.
    ///
    /// A cached review lacking sentiment is scored and stored again when
    /// `with_sentiment` is set.
    pub fn get_review(&self, url: &str, with_sentiment: bool) -> Result<Review> {
        let key = format!("review:{url}");
        if let Some(mut review) = self.cached::<Review>(&key) {
            if with_sentiment && !review.has_sentiment() {
                self.add_sentiment(&mut review);
                self.cache.set(&key, &review);
            }
            return Ok(review);
        }

        log::info!("Fetching review: {url}");
        let mut review = self.fetcher.get_review(url)?;
        if with_sentiment {
            self.add_sentiment(&mut review);
        }
        self.cache.set(&key, &review);
        Ok(review)
    }

    /// The `count` most recent reviews. Fewer are returned when the site
    /// runs out.
    pub fn get_latest_reviews(&self, count: usize, with_sentiment: bool) -> Result<Vec<Review>> {
        let key = format!("latest:{count}");
        if let Some(mut reviews) = self.cached::<Vec<Review>>(&key) {
            if with_sentiment && !reviews.iter().all(Review::has_sentiment) {
                reviews
                    .iter_mut()
                    .filter(|r| !r.has_sentiment())
                    .for_each(|r| self.add_sentiment(r));
                self.cache.set(&key, &reviews);
            }
            return Ok(reviews);
        }

        log::info!("Fetching {count} latest reviews");
        let mut reviews = self.fetcher.get_latest_reviews(count)?;
        if with_sentiment {
            reviews.iter_mut().for_each(|r| self.add_sentiment(r));
        }
        self.cache.set(&key, &reviews);
        Ok(reviews)
    }

    /// Aggregate sentiment over reviews that carry it.
    pub fn summary_stats(&self, reviews: &[Review]) -> Option<SentimentSummary> {
        self.analyzer.summary_stats(reviews)
    }

    /// Drop every cached entry. Returns `false` when caching is off.
    pub fn clear_cache(&self) -> bool {
        if !self.cache.is_enabled() {
            log::info!("Cache is disabled, nothing to clear");
            return false;
        }
        self.cache.clear()
    }

    /// Score the review body and every track with text.
    fn add_sentiment(&self, review: &mut Review) {
        review.sentiment = Some(self.analyzer.analyze_text(&review.content));
        for track in &mut review.tracks {
            if let Some(content) = track.content.as_deref().filter(|c| !c.trim().is_empty()) {
                track.sentiment = Some(self.analyzer.analyze_text(content));
            }
        }
    }

    fn cached<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.cache.get(key);
        if value.is_some() {
            log::info!("Cache hit: {key}");
        }
        value
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::models::{Assessment, ClientConfig};
    use crate::utils::http::testing::StaticSession;

    const ROOT: &str = "https://pitchfork.com";
    const REVIEW_URL: &str = "https://pitchfork.com/reviews/albums/radiohead-ok-computer/";

    const REVIEW_HTML: &str = r#"
        <h1 class="review-title">OK Computer</h1>
        <h2 class="artist-links">Radiohead</h2>
        <p class="score">10.0</p>
        <div class="review-detail__text">
            <p>This brilliant album is a masterpiece.</p>
        </div>
        <div class="track-reviews">
            <div class="track-review">
                <h3 class="track-review__title">Karma Police</h3>
                <p class="track-review__text">A stunning and beautiful song.</p>
            </div>
            <div class="track-review">
                <h3 class="track-review__title">Fitter Happier</h3>
            </div>
        </div>
    "#;

    fn config(tmp: &TempDir, cache_enabled: bool) -> Config {
        let mut config = Config {
            client: ClientConfig::default().without_delays(),
            ..Config::default()
        };
        config.cache.enabled = cache_enabled;
        config.cache.dir = Some(tmp.path().to_path_buf());
        config
    }

    fn review_session() -> StaticSession {
        StaticSession::new().with_page(REVIEW_URL, REVIEW_HTML)
    }

    fn search_session() -> StaticSession {
        let key = StaticSession::key(
            &format!("{ROOT}/search/"),
            &[
                ("query", "Radiohead".to_string()),
                ("filter", "albumreviews".to_string()),
            ],
        );
        let html = r#"
            <div class="search-results">
                <article>
                    <h2 class="title">OK Computer</h2>
                    <div class="artist-list">Radiohead</div>
                    <a class="review__link" href="/reviews/albums/radiohead-ok-computer/">Read</a>
                    <div class="score">10.0</div>
                </article>
                <article>
                    <h2 class="title">Kid A</h2>
                    <div class="artist-list">Radiohead</div>
                    <a class="review__link" href="/reviews/albums/radiohead-kid-a/">Read</a>
                    <div class="score">9.5</div>
                </article>
            </div>"#;
        StaticSession::new().with_page(key, html)
    }

    #[test]
    fn test_search_albums_then_cache_hit() {
        let tmp = TempDir::new().unwrap();
        let client = ReviewClient::with_session(search_session(), &config(&tmp, true)).unwrap();

        let first = client.search_albums("Radiohead").unwrap();
        let second = client.search_albums("Radiohead").unwrap();

        assert_eq!(first.len(), 2);
        assert_eq!(first[0].title, "OK Computer");
        assert_eq!(first[1].score, Some(9.5));
        assert_eq!(first, second);
        assert_eq!(client.fetcher.session().requests().len(), 1);
    }

    #[test]
    fn test_get_review_with_sentiment() {
        let tmp = TempDir::new().unwrap();
        let client = ReviewClient::with_session(review_session(), &config(&tmp, true)).unwrap();

        let review = client.get_review(REVIEW_URL, true).unwrap();
        let sentiment = review.sentiment.as_ref().unwrap();

        assert!(sentiment.polarity > 0.5);
        assert!(matches!(
            sentiment.assessment,
            Assessment::Positive | Assessment::VeryPositive
        ));
        assert!(review.tracks[0].sentiment.is_some());
        assert!(review.tracks[1].sentiment.is_none());
    }

    #[test]
    fn test_cached_review_gains_sentiment() {
        let tmp = TempDir::new().unwrap();
        let client = ReviewClient::with_session(review_session(), &config(&tmp, true)).unwrap();

        let plain = client.get_review(REVIEW_URL, false).unwrap();
        assert!(!plain.has_sentiment());

        let scored = client.get_review(REVIEW_URL, true).unwrap();
        assert!(scored.has_sentiment());
        assert_eq!(client.fetcher.session().requests().len(), 1);

        // The scored copy replaced the plain one on disk.
        let offline = ReviewClient::with_session(StaticSession::new(), &config(&tmp, true)).unwrap();
        assert!(offline.get_review(REVIEW_URL, false).unwrap().has_sentiment());
    }

    #[test]
    fn test_disabled_cache_always_fetches() {
        let tmp = TempDir::new().unwrap();
        let client = ReviewClient::with_session(review_session(), &config(&tmp, false)).unwrap();

        client.get_review(REVIEW_URL, false).unwrap();
        client.get_review(REVIEW_URL, false).unwrap();

        assert_eq!(client.fetcher.session().requests().len(), 2);
        assert!(!client.clear_cache());
    }

    #[test]
    fn test_failed_review_is_not_cached() {
        let tmp = TempDir::new().unwrap();
        let session = StaticSession::new().with_status(REVIEW_URL, 500);
        let client = ReviewClient::with_session(session, &config(&tmp, true)).unwrap();

        assert!(client.get_review(REVIEW_URL, true).is_err());
        assert!(client.get_review(REVIEW_URL, true).is_err());
        assert_eq!(client.fetcher.session().requests().len(), 2);
    }

    #[test]
    fn test_latest_reviews_and_stats() {
        let tmp = TempDir::new().unwrap();
        let listing = StaticSession::key(
            &format!("{ROOT}/reviews/albums/"),
            &[("page", "1".to_string())],
        );
        let session = review_session().with_page(
            listing,
            r#"<a class="review__link" href="/reviews/albums/radiohead-ok-computer/">OK</a>"#,
        );
        let client = ReviewClient::with_session(session, &config(&tmp, true)).unwrap();

        let reviews = client.get_latest_reviews(1, true).unwrap();
        assert_eq!(reviews.len(), 1);

        let summary = client.summary_stats(&reviews).unwrap();
        assert_eq!(summary.most_positive.title, "OK Computer");
        assert_eq!(summary.correlation_score_sentiment, None);

        let again = client.get_latest_reviews(1, true).unwrap();
        assert_eq!(again.len(), 1);
        assert!(again[0].has_sentiment());
        assert_eq!(client.fetcher.session().requests().len(), 2);
    }

    #[test]
    fn test_clear_cache_forces_refetch() {
        let tmp = TempDir::new().unwrap();
        let client = ReviewClient::with_session(review_session(), &config(&tmp, true)).unwrap();

        client.get_review(REVIEW_URL, false).unwrap();
        assert!(client.clear_cache());
        client.get_review(REVIEW_URL, false).unwrap();

        assert_eq!(client.fetcher.session().requests().len(), 2);
    }
}
