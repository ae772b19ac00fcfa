// src/services/fetcher.rs

//! Fetch orchestrator.
//!
//! Issues paced GET requests through an `HttpSession` and hands the parsed
//! pages to the `Extractor`.

use std::thread;
use std::time::Duration;

use rand::Rng;
use scraper::Html;

use crate::error::{AppError, Result};
use crate::models::{ClientConfig, Config, Review, SearchResult};
use crate::services::extractor::Extractor;
use crate::utils::http::{HttpResponse, HttpSession, ReqwestSession};
use crate::utils::url::endpoint;

const SEARCH_PATH: &str = "search/";
const LISTING_PATH: &str = "reviews/albums/";
const SEARCH_FILTER: &str = "albumreviews";

/// Which pacing delay is being taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pause {
    /// Before every request
    Request,
    /// Between listing pages
    Page,
}

/// Waits out pacing delays.
pub trait Pacer {
    fn pause(&self, kind: Pause, delay: Duration);
}

/// `Pacer` that blocks the current thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn pause(&self, _kind: Pause, delay: Duration) {
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }
}

/// Paced access to search, listing and review pages.
pub struct Fetcher<S = ReqwestSession> {
    session: S,
    config: ClientConfig,
    extractor: Extractor,
    pacer: Box<dyn Pacer>,
}

impl Fetcher {
    /// Create a fetcher backed by a real HTTP client.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(ReqwestSession::new(&config.client)?, config)
    }
}

impl<S: HttpSession> Fetcher<S> {
    /// Create a fetcher over the given session.
    pub fn new(session: S, config: &Config) -> Result<Self> {
        Ok(Self {
            session,
            config: config.client.clone(),
            extractor: Extractor::new(&config.selectors, &config.client.base_url)?,
            pacer: Box::new(ThreadPacer),
        })
    }

    /// Replace how pacing delays are waited out.
    pub fn with_pacer(mut self, pacer: impl Pacer + 'static) -> Self {
        self.pacer = Box::new(pacer);
        self
    }

    #[cfg(test)]
    pub(crate) fn session(&self) -> &S {
        &self.session
    }

    /// Perform one GET after a short randomized delay.
    ///
    /// Transport failures and non-2xx statuses are logged and returned.
    pub fn make_request(&self, url: &str, params: &[(&str, String)]) -> Result<HttpResponse> {
        self.pace(Pause::Request);

        let timeout = Duration::from_secs(self.config.timeout_secs);
        let response = self.session.get(url, params, timeout).map_err(|e| {
            log::error!("Request to {url} failed: {e}");
            e
        })?;

        if !response.is_success() {
            log::error!("Request to {url} returned status {}", response.status);
            return Err(AppError::status(url, response.status));
        }
        Ok(response)
    }

    /// Search album reviews matching `query`.
    pub fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let url = endpoint(&self.config.base_url, SEARCH_PATH);
        let params = [
            ("query", query.to_string()),
            ("filter", SEARCH_FILTER.to_string()),
        ];
        let document = self.fetch_document(&url, &params)?;
        let results = self.extractor.search_results(&document);
        log::info!("Search '{query}' returned {} results", results.len());
        Ok(results)
    }

    /// Fetch and extract a single review page.
    pub fn get_review(&self, url: &str) -> Result<Review> {
        let document = self.fetch_document(url, &[])?;
        self.extractor.review(&document, url)
    }

    /// Review links on one listing page, starting at page 1.
    pub fn review_urls(&self, page: u32) -> Result<Vec<String>> {
        let url = endpoint(&self.config.base_url, LISTING_PATH);
        let document = self.fetch_document(&url, &[("page", page.to_string())])?;
        Ok(self.extractor.review_urls(&document))
    }

    /// Up to `count` of the most recent reviews, newest first.
    ///
    /// Listing pages are walked until enough reviews are collected or a page
    /// comes back empty. Reviews that fail to load are skipped.
    pub fn get_latest_reviews(&self, count: usize) -> Result<Vec<Review>> {
        let mut reviews = Vec::with_capacity(count);
        let mut page = 1;

        while reviews.len() < count {
            if page > 1 {
                self.pace(Pause::Page);
            }

            let urls = self.review_urls(page)?;
            if urls.is_empty() {
                log::info!("No reviews on listing page {page}, stopping");
                break;
            }
            log::info!("Listing page {page}: {} review links", urls.len());

            for url in urls {
                if reviews.len() >= count {
                    break;
                }
                match self.get_review(&url) {
                    Ok(review) => reviews.push(review),
                    Err(e) if e.is_missing_field() => {
                        log::warn!("Skipping {url}: not a review page ({e})")
                    }
                    Err(e) => log::warn!("Skipping review {url}: {e}"),
                }
            }
            page += 1;
        }

        log::info!("Collected {} of {count} requested reviews", reviews.len());
        Ok(reviews)
    }

    fn fetch_document(&self, url: &str, params: &[(&str, String)]) -> Result<Html> {
        let response = self.make_request(url, params)?;
        Ok(Html::parse_document(&response.text()))
    }

    fn pace(&self, kind: Pause) {
        let delay = match kind {
            Pause::Request => random_delay(
                self.config.request_delay_min_ms,
                self.config.request_delay_max_ms,
            ),
            Pause::Page => random_delay(self.config.page_delay_min_ms, self.config.page_delay_max_ms),
        };
        self.pacer.pause(kind, delay);
    }
}

/// A random duration in `[min_ms, max_ms]`; zero when `max_ms` is zero.
fn random_delay(min_ms: u64, max_ms: u64) -> Duration {
    if max_ms == 0 {
        return Duration::ZERO;
    }
    Duration::from_millis(rand::rng().random_range(min_ms.min(max_ms)..=max_ms))
}
