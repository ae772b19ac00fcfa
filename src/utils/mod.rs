//! Utility functions and helpers.

pub mod http;
pub mod text;
pub mod url;

use scraper::Selector;

use crate::error::{AppError, Result};

/// Compile a CSS selector.
pub fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_selector_valid() {
        assert!(parse_selector("div.class").is_ok());
        assert!(parse_selector(".search-results article").is_ok());
    }

    #[test]
    fn test_parse_selector_invalid() {
        let err = parse_selector("[[invalid").unwrap_err();
        assert!(matches!(err, AppError::Selector { .. }));
    }
}
