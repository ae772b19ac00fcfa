// src/lib.rs

//! Pitchfork review scraper library.
//!
//! `ReviewClient` is the entry point: it searches albums, fetches single and
//! latest reviews, scores their sentiment and caches results on disk.

pub mod client;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;
pub mod utils;

pub use client::ReviewClient;
pub use error::{AppError, Result};
pub use models::Config;
