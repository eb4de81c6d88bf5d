use ::scraper::error::SelectorErrorKind;

/// All errors that can occur while fetching or assembling vlr.gg records.
#[derive(thiserror::Error, Debug)]
pub enum ScrapeError {
    /// The HTTP client could not be constructed.
    #[error("failed to build http client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// HTTP request failed (network, DNS, TLS, timeout, etc.).
    #[error("http request failed for {url}: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    /// Server returned a non-success HTTP status code.
    #[error("unexpected status {status} for {url}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Failed to read the response body as text.
    #[error("failed to read response body from {url}: {source}")]
    ResponseBody {
        url: String,
        source: reqwest::Error,
    },

    /// A CSS selector string could not be parsed.
    #[error("invalid CSS selector: {0}")]
    Selector(String),

    /// A required HTML element was not found on the page.
    #[error("expected element not found: {context}")]
    ElementNotFound { context: &'static str },
}

impl<'a> From<SelectorErrorKind<'a>> for ScrapeError {
    fn from(err: SelectorErrorKind<'a>) -> Self {
        ScrapeError::Selector(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;

impl ScrapeError {
    /// Whether the error came from the transport rather than from the markup.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ScrapeError::Http { .. }
                | ScrapeError::UnexpectedStatus { .. }
                | ScrapeError::ResponseBody { .. }
        )
    }
}
