use ::scraper::{ElementRef, Html, Selector};
use itertools::Itertools;
use tracing::{debug, instrument, warn};

use crate::error::{Result, ScrapeError};
use crate::fetch::PageFetcher;
use crate::model::{MapResult, MatchDetail, StreamLink, UPCOMING_STATUS};
use crate::vlr_scraper::{
    self, element_text, normalize, normalize_img_url, select_nth_text, select_text,
    DEFAULT_SCORE, UNKNOWN_EVENT,
};

const UNKNOWN_STAGE: &str = "Unknown Stage";
const PICK_MARKER: &str = "PICK";

#[instrument(skip(fetcher))]
pub(crate) async fn get_match<F: PageFetcher>(
    fetcher: &F,
    base_url: &str,
    id: &str,
) -> Option<MatchDetail> {
    if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
        debug!(id, "rejecting non-numeric match id");
        return None;
    }
    let url = format!("{base_url}/{id}");
    let document = vlr_scraper::fetch_document(fetcher, &url).await?;
    match parse_match(&document, base_url) {
        Ok(detail) => {
            debug!(
                id,
                maps = detail.maps.len(),
                streams = detail.streams.len(),
                "parsed match detail"
            );
            Some(detail)
        }
        Err(e) => {
            warn!(url, error = %e, "failed to parse match detail");
            None
        }
    }
}

/// Assemble the detail record of a match page. Any error drops the whole record.
///
/// Root-relative logo URLs are resolved against `base_url`.
pub(crate) fn parse_match(document: &Html, base_url: &str) -> Result<MatchDetail> {
    let root = document.root_element();
    let header_selector = Selector::parse("div.match-header")?;
    let header = root
        .select(&header_selector)
        .next()
        .ok_or(ScrapeError::ElementNotFound {
            context: "match header (div.match-header)",
        })?;

    let (stage, event) = extract_stage_and_event(&header)?;
    let status = extract_status(&header)?;
    let [team1, team2] = extract_teams(&header, base_url)?;
    let (team1_score, team2_score) = extract_scores(&header)?;
    let maps = extract_maps(&root)?;
    let streams = extract_streams(&root)?;

    Ok(MatchDetail {
        stage,
        event,
        status,
        team1: team1.name,
        team2: team2.name,
        team1_logo: team1.logo,
        team2_logo: team2.logo,
        team1_score,
        team2_score,
        maps,
        streams,
    })
}

/// Reads the series label as the stage, then the header text with the series
/// sub-tree left out as the event name. A header holding nothing but the
/// series label has an empty event name.
fn extract_stage_and_event(header: &ElementRef) -> Result<(String, String)> {
    let event_selector = Selector::parse(".match-header-event")?;
    let Some(event_element) = header.select(&event_selector).next() else {
        return Ok((UNKNOWN_STAGE.to_string(), UNKNOWN_EVENT.to_string()));
    };

    let series_selector = Selector::parse(".match-header-event-series")?;
    let series = event_element.select(&series_selector).next();
    let stage = series
        .map(|s| element_text(&s))
        .unwrap_or_else(|| UNKNOWN_STAGE.to_string());

    let event = match series {
        Some(series) => text_excluding(&event_element, &series),
        None => element_text(&event_element),
    };
    Ok((stage, event))
}

/// Normalized text of `element` without the text found under `excluded`.
fn text_excluding(element: &ElementRef, excluded: &ElementRef) -> String {
    let excluded_id = (**excluded).id();
    let text: String = element
        .descendants()
        .filter(|node| !node.ancestors().any(|a| a.id() == excluded_id))
        .filter_map(|node| node.value().as_text().map(|t| &**t))
        .collect();
    normalize(&text)
}

fn extract_status(header: &ElementRef) -> Result<String> {
    let selector =
        Selector::parse(".match-header-vs-note.mod-live, .match-header-vs-note .mod-live")?;
    Ok(select_text(header, &selector).unwrap_or_else(|| UPCOMING_STATUS.to_string()))
}

struct HeaderTeam {
    name: String,
    logo: Option<String>,
}

/// The first two team links are team 1 and team 2, in document order.
fn extract_teams(header: &ElementRef, base_url: &str) -> Result<[HeaderTeam; 2]> {
    let link_selector = Selector::parse(".match-header-link")?;
    let name_selector = Selector::parse(".wf-title-med")?;
    let logo_selector = Selector::parse("img")?;
    let links = header.select(&link_selector).take(2).collect_vec();

    let team = |n: usize| {
        let link = links.get(n - 1);
        let name = link
            .and_then(|l| select_text(l, &name_selector))
            .unwrap_or_else(|| format!("Team {n}"));
        let logo = link
            .and_then(|l| l.select(&logo_selector).next())
            .and_then(|img| img.value().attr("src"))
            .map(|src| normalize_img_url(src, base_url));
        HeaderTeam { name, logo }
    };
    Ok([team(1), team(2)])
}

/// Score spans come as `[team1, separator, team2]`.
fn extract_scores(header: &ElementRef) -> Result<(String, String)> {
    let selector = Selector::parse(".match-header-vs-score .js-spoiler span")?;
    let spans = header.select(&selector).collect_vec();
    if spans.len() < 3 {
        return Ok((DEFAULT_SCORE.to_string(), DEFAULT_SCORE.to_string()));
    }
    Ok((element_text(&spans[0]), element_text(&spans[2])))
}

fn extract_maps(root: &ElementRef) -> Result<Vec<MapResult>> {
    let game_selector = Selector::parse(".vm-stats-game")?;
    let map_selector = Selector::parse(".map")?;
    let score_selector = Selector::parse(".score")?;

    let mut maps = vec![];
    for game in root.select(&game_selector) {
        let Some(map_text) = select_text(&game, &map_selector) else {
            continue;
        };
        let (name, pick, time) =
            split_map_text(&map_text).ok_or(ScrapeError::ElementNotFound {
                context: "map name (.map)",
            })?;
        maps.push(MapResult {
            name,
            pick,
            time,
            team1_score: select_nth_text(&game, &score_selector, 0, DEFAULT_SCORE),
            team2_score: select_nth_text(&game, &score_selector, 1, DEFAULT_SCORE),
        });
    }
    Ok(maps)
}

/// Split a map header into `(name, pick, time)`.
///
/// The first token is the map name. The last token is the map duration
/// unless it is the pick marker itself.
fn split_map_text(text: &str) -> Option<(String, bool, String)> {
    let tokens = text.split_whitespace().collect_vec();
    let name = tokens.first()?.to_string();
    let pick = tokens.contains(&PICK_MARKER);
    let time = match tokens.last() {
        Some(&last) if last != PICK_MARKER => last.to_string(),
        _ => String::new(),
    };
    Some((name, pick, time))
}

fn extract_streams(root: &ElementRef) -> Result<Vec<StreamLink>> {
    let button_selector = Selector::parse(".match-streams-container .match-streams-btn")?;
    let name_selector = Selector::parse("span")?;
    let link_selector = Selector::parse(".match-streams-btn-external")?;

    let streams = root
        .select(&button_selector)
        .filter_map(|button| {
            let name = select_text(&button, &name_selector)?;
            let link = button
                .select(&link_selector)
                .next()
                .and_then(|a| a.value().attr("href"))?;
            Some(StreamLink {
                name,
                link: link.to_string(),
            })
        })
        .collect_vec();
    Ok(streams)
}
