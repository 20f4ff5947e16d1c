//! HTTP fetcher
//!
//! One GET per URL with timeout, redirect following and content-type gating.
//! Fetching never returns an error to the crawl loop: anything that is not an
//! HTML 200 response comes back as a skip, and the URL is simply dropped.

use reqwest::{header, Client, StatusCode};
use std::fmt;
use std::time::Duration;
use url::Url;

/// Content types accepted as crawlable pages
const HTML_CONTENT_TYPES: &[&str] = &["text/html", "application/xhtml+xml"];

/// Result of fetching one URL
#[derive(Debug)]
pub enum FetchOutcome {
    /// Status 200 with an HTML content type; the body text
    Html(String),

    /// Anything else; the URL is skipped and the crawl continues
    Skipped(SkipReason),
}

/// Why a URL was skipped
#[derive(Debug)]
pub enum SkipReason {
    /// Non-200 HTTP status
    Status(u16),

    /// 200 but not an HTML content type
    ContentType(String),

    /// DNS failure, refused connection, timeout, or a failed body read
    Network(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Status(code) => write!(f, "HTTP {}", code),
            SkipReason::ContentType(ct) => write!(f, "not HTML: {}", ct),
            SkipReason::Network(msg) => write!(f, "network error: {}", msg),
        }
    }
}

/// Builds the shared HTTP client
///
/// Follows redirects (reqwest's default policy) and sends a fixed identifying
/// user agent plus an HTML `Accept` header on every request.
pub fn build_http_client(user_agent: &str, timeout: Duration) -> Result<Client, reqwest::Error> {
    let mut headers = header::HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        header::HeaderValue::from_static("text/html,application/xhtml+xml"),
    );

    Client::builder()
        .user_agent(user_agent)
        .default_headers(headers)
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches one URL
///
/// Success requires status 200 and a content type containing `text/html` or
/// `application/xhtml+xml`. Network-level errors are converted into
/// [`FetchOutcome::Skipped`] so a single bad URL can never abort the crawl.
pub async fn fetch_url(client: &Client, url: &Url) -> FetchOutcome {
    let response = match client.get(url.as_str()).send().await {
        Ok(r) => r,
        Err(e) => return FetchOutcome::Skipped(network_reason(e)),
    };

    if response.status() != StatusCode::OK {
        return FetchOutcome::Skipped(SkipReason::Status(response.status().as_u16()));
    }

    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    let ct_lower = content_type.to_lowercase();
    if !HTML_CONTENT_TYPES.iter().any(|ct| ct_lower.contains(ct)) {
        return FetchOutcome::Skipped(SkipReason::ContentType(content_type));
    }

    match response.text().await {
        Ok(body) => FetchOutcome::Html(body),
        Err(e) => FetchOutcome::Skipped(network_reason(e)),
    }
}

fn network_reason(error: reqwest::Error) -> SkipReason {
    let msg = if error.is_timeout() {
        "request timeout".to_string()
    } else if error.is_connect() {
        "connection failed".to_string()
    } else {
        error.to_string()
    };
    SkipReason::Network(msg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client() -> Client {
        build_http_client("docscout-test/0.1", Duration::from_secs(5)).unwrap()
    }

    async fn fetch(server: &MockServer, p: &str) -> FetchOutcome {
        let url = Url::parse(&format!("{}{}", server.uri(), p)).unwrap();
        fetch_url(&client(), &url).await
    }

    #[tokio::test]
    async fn test_fetch_html_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw("<html><title>Hi</title></html>", "text/html; charset=utf-8"),
            )
            .mount(&server)
            .await;

        match fetch(&server, "/page").await {
            FetchOutcome::Html(body) => assert!(body.contains("Hi")),
            other => panic!("expected Html, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_xhtml_accepted() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/x"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw("<html></html>", "application/xhtml+xml"),
            )
            .mount(&server)
            .await;

        assert!(matches!(fetch(&server, "/x").await, FetchOutcome::Html(_)));
    }

    #[tokio::test]
    async fn test_fetch_404_skipped() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        match fetch(&server, "/missing").await {
            FetchOutcome::Skipped(SkipReason::Status(404)) => {}
            other => panic!("expected 404 skip, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_non_html_skipped() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data.json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw("{}", "application/json"),
            )
            .mount(&server)
            .await;

        match fetch(&server, "/data.json").await {
            FetchOutcome::Skipped(SkipReason::ContentType(ct)) => {
                assert!(ct.contains("application/json"))
            }
            other => panic!("expected content-type skip, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_connection_error_skipped() {
        // Nothing listens on this port
        let url = Url::parse("http://127.0.0.1:1/page").unwrap();
        match fetch_url(&client(), &url).await {
            FetchOutcome::Skipped(SkipReason::Network(_)) => {}
            other => panic!("expected network skip, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_follows_redirect() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/old"))
            .respond_with(
                ResponseTemplate::new(301).insert_header("location", "/new"),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/new"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw("<html>moved</html>", "text/html"),
            )
            .mount(&server)
            .await;

        match fetch(&server, "/old").await {
            FetchOutcome::Html(body) => assert!(body.contains("moved")),
            other => panic!("expected Html after redirect, got {:?}", other),
        }
    }
}
