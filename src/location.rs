//! Location Matching
//!
//! Paths are compared without scheme, host, query or fragment, and with
//! leading and trailing slashes trimmed. Relative inputs resolve against the
//! site root, so `news`, `/news/` and `https://example.com/news?x=1` agree.

use url::Url;

const SITE_ROOT: &str = "http://localhost/";

/// Normalize a URL or path for comparison
pub fn normalize_path(input: &str) -> String {
    let input = input.trim();
    match Url::parse(SITE_ROOT).and_then(|root| root.join(input)) {
        Ok(url) => url.path().trim_matches('/').to_string(),
        // only inputs with an empty authority, like "//", fail to resolve
        Err(_) => input.trim_matches('/').to_string(),
    }
}

/// Whether `current` points at the configured target page
pub fn matches_target(current: &str, target: &str) -> bool {
    normalize_path(current) == normalize_path(target)
}
