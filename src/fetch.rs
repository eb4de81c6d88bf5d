use std::future::Future;

use tracing::debug;

use crate::error::{Result, ScrapeError};

/// Browser-like user agent sent with every upstream request.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Retrieves the raw markup of a page.
///
/// Implementations must report non-success statuses as errors so callers can
/// treat every `Err` as a transport failure.
pub trait PageFetcher: Send + Sync + 'static {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String>> + Send;
}

/// [`PageFetcher`] backed by a [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    http: reqwest::Client,
}

impl HttpFetcher {
    /// Create a fetcher whose client sends [`USER_AGENT`] on every request.
    pub fn new() -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(ScrapeError::ClientBuild)?;
        Ok(Self { http })
    }

    /// Create a fetcher using the provided [`reqwest::Client`].
    ///
    /// Use this when you need to configure timeouts, proxies, headers, etc.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { http: client }
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        debug!(url, "fetching page");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ScrapeError::Http {
                url: url.to_owned(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::UnexpectedStatus {
                url: url.to_owned(),
                status,
            });
        }

        response.text().await.map_err(|e| ScrapeError::ResponseBody {
            url: url.to_owned(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_builds_client() {
        assert!(HttpFetcher::new().is_ok());
    }

    #[test]
    fn test_markup_errors_are_not_transport_errors() {
        let missing = ScrapeError::ElementNotFound { context: "page" };
        assert!(!missing.is_transport());
        assert!(!ScrapeError::Selector("div[".to_string()).is_transport());
        assert_eq!(missing.to_string(), "expected element not found: page");
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let fetcher = HttpFetcher::with_client(reqwest::Client::new());
        let err = fetcher.fetch("http://127.0.0.1:1/matches").await.unwrap_err();
        assert!(err.is_transport());
        assert!(err.to_string().contains("http://127.0.0.1:1/matches"));
    }
}
