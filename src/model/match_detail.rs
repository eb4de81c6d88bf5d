use serde::Serialize;

/// Full details of a single match page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchDetail {
    pub stage: String,
    pub event: String,
    pub status: String,
    pub team1: String,
    pub team2: String,
    pub team1_logo: Option<String>,
    pub team2_logo: Option<String>,
    pub team1_score: String,
    pub team2_score: String,
    pub maps: Vec<MapResult>,
    pub streams: Vec<StreamLink>,
}

/// Result of a single map (game) within a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapResult {
    pub name: String,
    /// True when the map was marked as a team's pick.
    pub pick: bool,
    /// Duration of the map, empty when the page shows none.
    pub time: String,
    pub team1_score: String,
    pub team2_score: String,
}

/// A stream associated with a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreamLink {
    pub name: String,
    pub link: String,
}

/// Status used when the match header shows no live note.
pub const UPCOMING_STATUS: &str = "Upcoming";
