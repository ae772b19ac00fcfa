//! Service layer.
//!
//! - `Extractor`: selectors to records
//! - `Fetcher`: paced requests over an `HttpSession`
//! - `sentiment`: polarity scoring and batch statistics

pub mod extractor;
pub mod fetcher;
pub mod sentiment;

pub use extractor::Extractor;
pub use fetcher::{Fetcher, Pacer, Pause, ThreadPacer};
pub use sentiment::SentimentAnalyzer;
