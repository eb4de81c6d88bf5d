use tracing::instrument;

use crate::error::Result;
use crate::fetch::{HttpFetcher, PageFetcher};
use crate::model::{MatchDetail, MatchSummary};
use crate::vlr_scraper;

/// Default upstream site.
pub const DEFAULT_BASE_URL: &str = "https://www.vlr.gg";

/// The main entry point for extracting match data from VLR.gg.
///
/// `VlrClient` pairs a [`PageFetcher`] with the upstream base URL. Every call
/// fetches a fresh page and builds fresh records; the client keeps no state
/// between calls.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> vlr_match_api::Result<()> {
/// use vlr_match_api::VlrClient;
///
/// let client = VlrClient::new()?;
/// let matches = client.get_matches().await;
/// println!("Found {} matches", matches.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct VlrClient<F = HttpFetcher> {
    fetcher: F,
    base_url: String,
}

impl VlrClient<HttpFetcher> {
    /// Create a client for vlr.gg with the default HTTP fetcher.
    pub fn new() -> Result<Self> {
        Ok(Self::with_fetcher(HttpFetcher::new()?, DEFAULT_BASE_URL))
    }
}

impl<F: PageFetcher> VlrClient<F> {
    /// Create a client using the provided fetcher and base URL.
    pub fn with_fetcher(fetcher: F, base_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Fetch the match listing. Unavailable pages and unparsable entries
    /// shrink the result instead of failing it.
    #[instrument(skip(self))]
    pub async fn get_matches(&self) -> Vec<MatchSummary> {
        vlr_scraper::matches::get_matches(&self.fetcher, &self.base_url).await
    }

    /// Fetch full details for a specific match by ID.
    ///
    /// Returns `None` when the page cannot be fetched or assembled.
    #[instrument(skip(self))]
    pub async fn get_match(&self, match_id: &str) -> Option<MatchDetail> {
        vlr_scraper::match_detail::get_match(&self.fetcher, &self.base_url, match_id).await
    }
}
