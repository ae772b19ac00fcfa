//! Persistence for fetched reviews.
//!
//! The only backend is an expiring per-key file cache; see [`cache`].

pub mod cache;

// Re-export for convenience
pub use cache::DiskCache;
