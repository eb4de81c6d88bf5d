pub(crate) mod match_detail;
pub(crate) mod matches;

use ::scraper::{ElementRef, Html, Selector};
use itertools::Itertools;
use tracing::{debug, warn};

use crate::fetch::PageFetcher;

pub(crate) const UNKNOWN_EVENT: &str = "Unknown Event";
pub(crate) const DEFAULT_SCORE: &str = "0";

/// Collapse every whitespace run into a single space and trim both ends.
pub fn normalize(text: &str) -> String {
    text.split_whitespace().join(" ")
}

/// Fetch `url` through `fetcher` and parse the body as an HTML document.
///
/// Transport failures are logged and reported as `None`.
pub(crate) async fn fetch_document<F: PageFetcher>(fetcher: &F, url: &str) -> Option<Html> {
    match fetcher.fetch(url).await {
        Ok(body) => {
            debug!(url, bytes = body.len(), "parsing page");
            Some(Html::parse_document(&body))
        }
        Err(e) => {
            warn!(url, error = %e, transport = e.is_transport(), "failed to fetch page");
            None
        }
    }
}

/// Normalized text of `element` and all of its descendants.
pub(crate) fn element_text(element: &ElementRef) -> String {
    normalize(&element.text().collect::<String>())
}

/// Normalized text of the first element matching `selector` inside `element`.
pub(crate) fn select_text(element: &ElementRef, selector: &Selector) -> Option<String> {
    element.select(selector).next().map(|e| element_text(&e))
}

/// Normalized text of the `index`-th element matching `selector`, or `default`.
pub(crate) fn select_nth_text(
    element: &ElementRef,
    selector: &Selector,
    index: usize,
    default: &str,
) -> String {
    element
        .select(selector)
        .nth(index)
        .map(|e| element_text(&e))
        .unwrap_or_else(|| default.to_string())
}

/// Normalize a potentially relative image URL to an absolute URL on `base_url`.
pub(crate) fn normalize_img_url(src: &str, base_url: &str) -> String {
    if src.starts_with("//") {
        format!("https:{src}")
    } else if src.starts_with('/') {
        format!("{base_url}{src}")
    } else {
        src.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Result, ScrapeError};

    struct FailingFetcher;

    impl PageFetcher for FailingFetcher {
        async fn fetch(&self, _url: &str) -> Result<String> {
            Err(ScrapeError::ElementNotFound { context: "page" })
        }
    }

    struct StaticFetcher(&'static str);

    impl PageFetcher for StaticFetcher {
        async fn fetch(&self, _url: &str) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize("  Team\t\tLiquid \n "), "Team Liquid");
        assert_eq!(normalize("\n\t  \n"), "");
        assert_eq!(normalize("already clean"), "already clean");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let inputs = [
            "",
            "   ",
            "a\tb\nc",
            "\t\tStage A\t\n\t\tGroup Final\t",
            "x  y   z",
            "\u{a0}nbsp\u{a0} edges ",
        ];
        for input in inputs {
            let once = normalize(input);
            assert_eq!(normalize(&once), once);
            assert!(!once.contains('\t'));
            assert!(!once.contains('\n'));
            assert!(!once.contains("  "));
            assert_eq!(once.trim(), once);
        }
    }

    #[test]
    fn test_normalize_img_url() {
        let base = "https://www.vlr.gg";
        assert_eq!(
            normalize_img_url("//owcdn.net/img/logo.png", base),
            "https://owcdn.net/img/logo.png"
        );
        assert_eq!(
            normalize_img_url("/img/vlr/tmp/vlr.png", base),
            "https://www.vlr.gg/img/vlr/tmp/vlr.png"
        );
        assert_eq!(
            normalize_img_url("/img/vlr/tmp/vlr.png", "http://localhost:4000"),
            "http://localhost:4000/img/vlr/tmp/vlr.png"
        );
        assert_eq!(
            normalize_img_url("https://owcdn.net/a.png", base),
            "https://owcdn.net/a.png"
        );
    }

    #[test]
    fn test_select_nth_text_defaults() {
        let html = Html::parse_fragment(r#"<div><span class="n"> A </span></div>"#);
        let selector = Selector::parse("span.n").unwrap();
        let root = html.root_element();
        assert_eq!(select_nth_text(&root, &selector, 0, "X"), "A");
        assert_eq!(select_nth_text(&root, &selector, 1, "X"), "X");
    }

    #[tokio::test]
    async fn test_fetch_document_failure_is_absent() {
        assert!(fetch_document(&FailingFetcher, "https://www.vlr.gg/matches")
            .await
            .is_none());
    }

    #[tokio::test]
    async fn test_fetch_document_parses_body() {
        let fetcher = StaticFetcher("<html><body><p class='x'>hi</p></body></html>");
        let document = fetch_document(&fetcher, "https://www.vlr.gg/matches")
            .await
            .unwrap();
        let selector = Selector::parse("p.x").unwrap();
        assert_eq!(
            select_text(&document.root_element(), &selector).as_deref(),
            Some("hi")
        );
    }
}
