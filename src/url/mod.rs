//! URL helpers: visited-set keys, the same-domain boundary, and link filtering

mod filter;

pub use filter::is_denied_path;

use url::Url;

/// Returns the visited-set key for a URL: its fragment-stripped string form
///
/// `https://a/x#foo` and `https://a/x` map to the same key, so fragment-only
/// variants are never crawled twice.
pub fn visited_key(url: &Url) -> String {
    let mut key = url.clone();
    key.set_fragment(None);
    key.into()
}

/// Returns a URL with its fragment stripped
pub fn strip_fragment(url: &Url) -> Url {
    let mut stripped = url.clone();
    stripped.set_fragment(None);
    stripped
}

/// Returns the politeness domain key for a URL: scheme + host (+ port)
pub fn domain_key(url: &Url) -> String {
    url.origin().ascii_serialization()
}

/// Checks whether two URLs point at the same host (and port)
///
/// This is the same-domain boundary: links outside the seed's host are never
/// followed. The scheme is deliberately ignored so http/https variants of the
/// same site stay in bounds.
pub fn same_host(a: &Url, b: &Url) -> bool {
    a.host_str() == b.host_str() && a.port_or_known_default() == b.port_or_known_default()
}
