use serde::Serialize;

/// Summary of a single scheduled, live or finished match from the `/matches` listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchSummary {
    /// Numeric id taken from the entry link, `None` when the link has no id segment.
    pub match_id: Option<String>,
    pub time: String,
    pub team1: String,
    pub team2: String,
    /// Country code class token of the team's flag (e.g. `mod-br`).
    pub team1_flag: Option<String>,
    pub team2_flag: Option<String>,
    pub stage: String,
    pub event: String,
    /// `"LIVE"` for running matches, otherwise the ETA text shown by vlr.gg.
    #[serde(rename = "eta")]
    pub status: String,
    pub team1_score: String,
    pub team2_score: String,
}

/// Status text used when an entry carries the live indicator.
pub const LIVE_STATUS: &str = "LIVE";

/// Team name used when a listing entry has no team yet.
pub const UNDECIDED_TEAM: &str = "TBD";
