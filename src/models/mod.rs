// src/models/mod.rs

//! Domain models for the review client.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod album;
mod config;
mod review;
mod selectors;
mod sentiment;

// Re-export all public types
pub use album::{Album, SearchResult};
pub use config::{CacheConfig, ClientConfig, Config, LoggingConfig};
pub use review::{Review, ReviewMetadata, ReviewSummary, Track};
pub use selectors::SelectorConfig;
pub use sentiment::{
    Assessment, KeyTerm, SentenceSentiment, SentimentResult, SentimentSample, SentimentSummary,
    TermSentiment,
};
