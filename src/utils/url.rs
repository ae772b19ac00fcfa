// src/utils/url.rs

//! URL manipulation utilities.

/// Normalize a link against the site root.
///
/// Scheme-prefixed links pass through, `/`-prefixed paths are appended to
/// the root and anything else is joined with a `/`.
///
/// # Examples
/// ```
/// use pitchfork_reviews::utils::url::normalize;
///
/// assert_eq!(
///     normalize("/reviews/albums/kid-a/", "https://pitchfork.com/"),
///     "https://pitchfork.com/reviews/albums/kid-a/"
/// );
/// ```
pub fn normalize(href: &str, root: &str) -> String {
    if href.starts_with("http") {
        return href.to_string();
    }

    let root = root.trim_end_matches('/');
    if href.starts_with('/') {
        format!("{root}{href}")
    } else {
        format!("{root}/{href}")
    }
}

/// Join a path onto the site root, e.g. `search/`.
pub fn endpoint(root: &str, path: &str) -> String {
    normalize(&format!("/{}", path.trim_start_matches('/')), root)
}
