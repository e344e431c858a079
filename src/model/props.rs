use serde::Serialize;

use crate::model::PlayerRef;

/// Everything recovered from a single match page.
///
/// `rounds_per_map` is a heuristic estimate derived from odds cues on the
/// page, not observed data.
#[derive(Debug, Clone)]
pub struct MatchContext {
    pub match_id: String,
    pub rounds_per_map: f64,
    pub participants: Vec<PlayerRef>,
}

/// A per-player prop projection for one match.
///
/// All numeric fields are always present; when the underlying stat could not
/// be scraped the field is zero. Consumers rely on the shape being stable.
#[derive(Debug, Clone, Serialize)]
pub struct PropEntry {
    pub player: String,
    pub player_href: String,
    pub kpr: f64,
    /// Headshot fraction in [0, 1], despite the historical field name.
    pub hs_percent: f64,
    pub expected_kills_per_map: f64,
    pub kill_line: f64,
    pub hs_line: f64,
}
