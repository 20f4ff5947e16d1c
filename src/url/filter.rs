//! Deny-list for non-documentation paths

use url::Url;

/// Path fragments that mark a link as non-documentation
///
/// Matched as case-insensitive substrings anywhere in the path, so
/// `/docs/about-us` is rejected along with `/about`.
const DENY_PATHS: &[&str] = &[
    "/login", "/signup", "/register", "/pricing", "/contact", "/about", "/terms", "/privacy",
];

/// Checks whether a URL's path hits the deny-list
pub fn is_denied_path(url: &Url) -> bool {
    let path = url.path().to_lowercase();
    DENY_PATHS.iter().any(|pattern| path.contains(pattern))
}
