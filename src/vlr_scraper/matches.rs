use std::sync::LazyLock;

use ::scraper::{ElementRef, Html, Selector};
use regex::Regex;
use tracing::{debug, instrument, warn};

use crate::error::{Result, ScrapeError};
use crate::fetch::PageFetcher;
use crate::model::{MatchSummary, LIVE_STATUS, UNDECIDED_TEAM};
use crate::vlr_scraper::{
    self, element_text, normalize, select_nth_text, select_text, DEFAULT_SCORE, UNKNOWN_EVENT,
};

static MATCH_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/(\d+)/").expect("match id pattern is valid"));

static STAGE_EVENT_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\t+\n\t+").expect("stage separator pattern is valid"));

#[instrument(skip(fetcher))]
pub(crate) async fn get_matches<F: PageFetcher>(fetcher: &F, base_url: &str) -> Vec<MatchSummary> {
    let url = format!("{base_url}/matches");
    let Some(document) = vlr_scraper::fetch_document(fetcher, &url).await else {
        return vec![];
    };
    let matches = parse_matches(&document).unwrap_or_else(|e| {
        warn!(url, error = %e, "failed to parse match list");
        vec![]
    });
    debug!(count = matches.len(), "parsed match list");
    matches
}

/// Assemble every listing entry of `document`, dropping the ones that fail.
pub(crate) fn parse_matches(document: &Html) -> Result<Vec<MatchSummary>> {
    let selector = Selector::parse("a.wf-module-item.match-item")?;
    let mut matches = vec![];
    for element in document.select(&selector) {
        match parse_match_item(&element) {
            Ok(item) => matches.push(item),
            Err(e) => warn!(error = %e, "skipping unparsable match item"),
        }
    }
    Ok(matches)
}

fn parse_match_item(element: &ElementRef) -> Result<MatchSummary> {
    let match_id = extract_match_id(element);
    let time = extract_time(element)?;
    let (team1, team2) = extract_team_names(element)?;
    let (team1_flag, team2_flag) = extract_team_flags(element)?;
    let (stage, event) = extract_stage_and_event(element)?;
    let status = extract_status(element)?;
    let (team1_score, team2_score) = extract_scores(element)?;

    Ok(MatchSummary {
        match_id,
        time,
        team1,
        team2,
        team1_flag,
        team2_flag,
        stage,
        event,
        status,
        team1_score,
        team2_score,
    })
}

/// First slash-bounded numeric segment of the entry link.
fn extract_match_id(element: &ElementRef) -> Option<String> {
    let href = element.value().attr("href")?;
    MATCH_ID_PATTERN
        .captures(href)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

fn extract_time(element: &ElementRef) -> Result<String> {
    let selector = Selector::parse(".match-item-time")?;
    select_text(element, &selector).ok_or(ScrapeError::ElementNotFound {
        context: "match time (.match-item-time)",
    })
}

fn extract_team_names(element: &ElementRef) -> Result<(String, String)> {
    let selector = Selector::parse(".match-item-vs-team-name .text-of")?;
    Ok((
        select_nth_text(element, &selector, 0, UNDECIDED_TEAM),
        select_nth_text(element, &selector, 1, UNDECIDED_TEAM),
    ))
}

fn extract_team_flags(element: &ElementRef) -> Result<(Option<String>, Option<String>)> {
    let team_selector = Selector::parse(".match-item-vs-team")?;
    let flag_selector = Selector::parse(".flag")?;
    let mut flags = element.select(&team_selector).map(|team| {
        team.select(&flag_selector)
            .next()
            .and_then(|flag| flag.value().attr("class"))
            .and_then(|class| class.split_whitespace().last())
            .map(|code| code.to_string())
    });
    Ok((flags.next().flatten(), flags.next().flatten()))
}

fn extract_stage_and_event(element: &ElementRef) -> Result<(String, String)> {
    let selector = Selector::parse(".match-item-event")?;
    let raw = element
        .select(&selector)
        .next()
        .map(|e| e.text().collect::<String>().trim().to_string())
        .unwrap_or_else(|| UNKNOWN_EVENT.to_string());
    Ok(split_stage_and_event(&raw))
}

/// Split the listing's event block into its stage and event name parts.
///
/// The stage comes first and is separated from the event name by tabs
/// wrapped around a newline. A block without a separator is all stage.
pub fn split_stage_and_event(raw: &str) -> (String, String) {
    let mut parts = STAGE_EVENT_SEPARATOR.split(raw).map(normalize);
    let stage = parts.next().unwrap_or_default();
    let event = parts.next().unwrap_or_default();
    (stage, event)
}

/// The live indicator always wins over the ETA text.
fn extract_status(element: &ElementRef) -> Result<String> {
    let live_selector = Selector::parse(".match-item-eta .ml.mod-live")?;
    if element.select(&live_selector).next().is_some() {
        return Ok(LIVE_STATUS.to_string());
    }
    let eta_selector = Selector::parse(".ml-eta")?;
    Ok(element
        .select(&eta_selector)
        .next()
        .map(|e| element_text(&e))
        .unwrap_or_default())
}

fn extract_scores(element: &ElementRef) -> Result<(String, String)> {
    let selector = Selector::parse(".match-item-vs-team-score")?;
    Ok((
        select_nth_text(element, &selector, 0, DEFAULT_SCORE),
        select_nth_text(element, &selector, 1, DEFAULT_SCORE),
    ))
}
