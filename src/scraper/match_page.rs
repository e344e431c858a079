use std::sync::LazyLock;

use itertools::Itertools;
use regex::Regex;
use ::scraper::{Html, Selector};

use crate::model::{MatchContext, PlayerRef};
use crate::scraper::PLAYER_PATH_PREFIX;

/// League average when the page gives no usable odds signal.
const DEFAULT_ROUNDS_PER_MAP: f64 = 23.5;
/// A lopsided matchup closes out maps faster.
const FAVORED_ROUNDS_PER_MAP: f64 = 22.0;
/// A close matchup stretches maps out.
const CLOSE_ROUNDS_PER_MAP: f64 = 26.0;

static MATCH_ID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"/matches/(\d+)").unwrap());
static PERCENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([0-9]{1,3})%").unwrap());
static ANCHOR_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").unwrap());

/// First match id appearing on the matches listing page.
pub(crate) fn extract_first_match_id(html: &str) -> Option<String> {
    MATCH_ID_RE
        .captures(html)
        .map(|c| c[1].to_string())
}

/// Everything the props pipeline needs from a single match page.
pub(crate) fn parse_match_context(match_id: &str, html: &str) -> MatchContext {
    MatchContext {
        match_id: match_id.to_string(),
        rounds_per_map: estimate_rounds_per_map(html),
        participants: extract_participants(html),
    }
}

/// Every player-profile link with visible text, in document order,
/// deduplicated by player name (first occurrence wins).
pub(crate) fn extract_participants(html: &str) -> Vec<PlayerRef> {
    let document = Html::parse_document(html);
    document
        .select(&ANCHOR_SELECTOR)
        .filter_map(|anchor| {
            let href = anchor.value().attr("href")?;
            if !href.starts_with(PLAYER_PATH_PREFIX) {
                return None;
            }
            let name = anchor.text().collect::<String>().trim().to_string();
            if name.is_empty() {
                return None;
            }
            Some(PlayerRef {
                name,
                href: href.to_string(),
            })
        })
        .unique_by(|p| p.name.clone())
        .collect_vec()
}

/// Heuristic rounds-per-map estimate from odds cues in the page text.
///
/// A "favorite"/"favored" mention lowers the estimate; the spread between the
/// first two win-probability percentages is evaluated afterwards and takes
/// precedence over the keyword when both are present.
pub(crate) fn estimate_rounds_per_map(html: &str) -> f64 {
    let mut rounds = DEFAULT_ROUNDS_PER_MAP;

    let lowered = html.to_lowercase();
    if lowered.contains("favorite") || lowered.contains("favored") {
        rounds = FAVORED_ROUNDS_PER_MAP;
    }

    let percents: Vec<i64> = PERCENT_RE
        .captures_iter(html)
        .take(4)
        .filter_map(|c| c[1].parse().ok())
        .collect();
    if percents.len() >= 2 {
        let diff = (percents[0] - percents[1]).abs();
        if diff >= 15 {
            rounds = FAVORED_ROUNDS_PER_MAP;
        } else if diff <= 8 {
            rounds = CLOSE_ROUNDS_PER_MAP;
        }
    }

    rounds
}
