use tracing::{debug, warn};

use crate::cache::TtlCache;
use crate::model::{PlayerRef, PlayerStats, PropEntry};
use crate::scraper::{self, match_page, player, PageSource};
use crate::util::round2;

/// Fetch volume per match is bounded by only visiting the first N profiles.
const MAX_PROP_PLAYERS: usize = 20;

const TODAYS_MATCH_KEY: &str = "todays_first_match";

/// Why a participant produced no prop entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SkipReason {
    /// The profile page could not be fetched.
    ProfileUnavailable,
}

/// Build prop projections for every participant of a match.
///
/// Failure to fetch the match page degrades to an empty list; failure on a
/// single participant skips that participant and the batch continues. The
/// finished list is cached per match id.
pub(crate) async fn build_props<S: PageSource>(
    source: &S,
    cache: &TtlCache<Vec<PropEntry>>,
    match_id: &str,
) -> Vec<PropEntry> {
    let cache_key = format!("match_props_{match_id}");
    if let Some(props) = cache.get(&cache_key) {
        debug!(match_id, count = props.len(), "props cache hit");
        return props;
    }

    let html = match source.fetch_page(&scraper::match_page_url(match_id)).await {
        Ok(html) => html,
        Err(e) => {
            warn!(match_id, error = %e, "match page unavailable");
            return Vec::new();
        }
    };

    let context = match_page::parse_match_context(match_id, &html);
    debug!(
        match_id,
        rounds_per_map = context.rounds_per_map,
        participants = context.participants.len(),
        "parsed match page"
    );

    let mut props = Vec::new();
    let mut skipped = 0usize;
    for participant in context.participants.iter().take(MAX_PROP_PLAYERS) {
        match build_entry(source, participant, context.rounds_per_map).await {
            Ok(entry) => props.push(entry),
            Err(reason) => {
                skipped += 1;
                debug!(player = %participant.name, ?reason, "skipping participant");
            }
        }
    }
    if skipped > 0 {
        debug!(match_id, skipped, "participants skipped");
    }

    cache.set(&cache_key, props.clone());
    props
}

/// Resolve the first match listed for today, memoized under a sentinel key.
pub(crate) async fn todays_first_match_id<S: PageSource>(
    source: &S,
    cache: &TtlCache<String>,
) -> Option<String> {
    if let Some(id) = cache.get(TODAYS_MATCH_KEY) {
        debug!(%id, "match-of-the-day cache hit");
        return Some(id);
    }

    let html = match source.fetch_page(&scraper::match_listing_url()).await {
        Ok(html) => html,
        Err(e) => {
            warn!(error = %e, "match listing unavailable");
            return None;
        }
    };

    let id = match_page::extract_first_match_id(&html)?;
    cache.set(TODAYS_MATCH_KEY, id.clone());
    Some(id)
}

async fn build_entry<S: PageSource>(
    source: &S,
    participant: &PlayerRef,
    rounds_per_map: f64,
) -> Result<PropEntry, SkipReason> {
    let url = scraper::player_profile_url(&participant.href);
    let html = source
        .fetch_page(&url)
        .await
        .map_err(|_| SkipReason::ProfileUnavailable)?;
    let stats = player::extract_player_stats(&html);
    Ok(prop_entry(participant, stats, rounds_per_map))
}

/// Assemble the output row. This is the only place missing stats are
/// defaulted to zero; the line fields stay zero unless both inputs are known.
fn prop_entry(participant: &PlayerRef, stats: PlayerStats, rounds_per_map: f64) -> PropEntry {
    let expected = stats.kpr.map(|kpr| round2(kpr * rounds_per_map));
    let hs_line = match (stats.hs_fraction, expected) {
        (Some(hs), Some(kills)) if kills != 0.0 => round2(hs * kills),
        _ => 0.0,
    };

    PropEntry {
        player: participant.name.clone(),
        player_href: participant.href.clone(),
        kpr: stats.kpr.unwrap_or_default(),
        hs_percent: stats.hs_fraction.unwrap_or_default(),
        expected_kills_per_map: expected.unwrap_or_default(),
        kill_line: expected.unwrap_or_default(),
        hs_line,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::error::{PropsError, Result};

    const TTL: Duration = Duration::from_secs(30 * 60);

    struct FakePages {
        pages: HashMap<String, String>,
        fetches: Arc<AtomicUsize>,
    }

    impl FakePages {
        fn new() -> Self {
            Self {
                pages: HashMap::new(),
                fetches: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn insert(&mut self, url: &str, body: &str) {
            self.pages.insert(url.to_string(), body.to_string());
        }
    }

    impl PageSource for FakePages {
        async fn fetch_page(&self, url: &str) -> Result<String> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            self.pages.get(url).cloned().ok_or_else(|| {
                PropsError::UnexpectedStatus {
                    url: url.to_owned(),
                    status: reqwest::StatusCode::NOT_FOUND,
                }
            })
        }
    }

    fn profile_html(kpr: &str, hs: &str) -> String {
        format!(
            r#"<div><span>Kills / round</span><span>{kpr}</span></div>
               <div><span>Headshots</span><span>{hs}</span></div>"#
        )
    }

    #[tokio::test]
    async fn output_is_capped_at_twenty_entries() {
        let mut source = FakePages::new();
        let links: String = (0..50)
            .map(|i| format!(r#"<a href="/player/{i}/p{i}">p{i}</a>"#))
            .collect();
        source.insert("https://www.hltv.org/matches/1/", &links);
        for i in 0..50 {
            source.insert(
                &format!("https://www.hltv.org/player/{i}/p{i}"),
                &profile_html("0.70", "45%"),
            );
        }

        let props = build_props(&source, &TtlCache::new(TTL), "1").await;
        assert_eq!(props.len(), 20);
        assert_eq!(props[0].player, "p0");
        assert_eq!(props[19].player, "p19");
    }

    #[tokio::test]
    async fn unavailable_profile_is_absent_not_zeroed() {
        let mut source = FakePages::new();
        source.insert(
            "https://www.hltv.org/matches/2/",
            r#"<a href="/player/1/alpha">alpha</a><a href="/player/2/beta">beta</a>"#,
        );
        source.insert(
            "https://www.hltv.org/player/1/alpha",
            &profile_html("0.80", "50%"),
        );
        // no page for beta

        let props = build_props(&source, &TtlCache::new(TTL), "2").await;
        assert_eq!(props.len(), 1);
        assert_eq!(props[0].player, "alpha");
    }

    #[tokio::test]
    async fn expected_kills_uses_rounds_estimate() {
        let mut source = FakePages::new();
        source.insert(
            "https://www.hltv.org/matches/3/",
            r#"<a href="/player/1/alpha">alpha</a>"#,
        );
        source.insert(
            "https://www.hltv.org/player/1/alpha",
            &profile_html("0.75", "42%"),
        );

        let props = build_props(&source, &TtlCache::new(TTL), "3").await;
        assert_eq!(props.len(), 1);
        let entry = &props[0];
        assert_eq!(entry.kpr, 0.75);
        assert_eq!(entry.hs_percent, 0.42);
        assert_eq!(entry.expected_kills_per_map, 17.63);
        assert_eq!(entry.kill_line, 17.63);
        assert_eq!(entry.hs_line, 7.4);
    }

    #[tokio::test]
    async fn missing_stats_default_to_zero_in_output() {
        let mut source = FakePages::new();
        source.insert(
            "https://www.hltv.org/matches/4/",
            r#"<a href="/player/1/alpha">alpha</a>"#,
        );
        source.insert("https://www.hltv.org/player/1/alpha", "<html>no stats</html>");

        let props = build_props(&source, &TtlCache::new(TTL), "4").await;
        assert_eq!(props.len(), 1);
        let entry = &props[0];
        assert_eq!(entry.kpr, 0.0);
        assert_eq!(entry.hs_percent, 0.0);
        assert_eq!(entry.expected_kills_per_map, 0.0);
        assert_eq!(entry.hs_line, 0.0);
    }

    #[tokio::test]
    async fn unavailable_match_page_means_no_props() {
        let source = FakePages::new();
        let props = build_props(&source, &TtlCache::new(TTL), "5").await;
        assert!(props.is_empty());
    }

    #[tokio::test]
    async fn second_build_is_served_from_cache() {
        let mut source = FakePages::new();
        source.insert(
            "https://www.hltv.org/matches/6/",
            r#"<a href="/player/1/alpha">alpha</a>"#,
        );
        source.insert(
            "https://www.hltv.org/player/1/alpha",
            &profile_html("0.70", "40%"),
        );
        let fetches = Arc::clone(&source.fetches);

        let cache = TtlCache::new(TTL);
        let first = build_props(&source, &cache, "6").await;
        let after_first = fetches.load(Ordering::SeqCst);
        let second = build_props(&source, &cache, "6").await;

        assert_eq!(first.len(), second.len());
        assert_eq!(fetches.load(Ordering::SeqCst), after_first);
    }

    #[tokio::test]
    async fn todays_match_id_is_extracted_and_cached() {
        let mut source = FakePages::new();
        source.insert(
            "https://www.hltv.org/matches",
            r#"<a href="/matches/2372105/faze-vs-navi">today</a>"#,
        );
        let fetches = Arc::clone(&source.fetches);
        let cache = TtlCache::new(TTL);

        let id = todays_first_match_id(&source, &cache).await;
        assert_eq!(id.as_deref(), Some("2372105"));
        assert_eq!(fetches.load(Ordering::SeqCst), 1);

        let again = todays_first_match_id(&source, &cache).await;
        assert_eq!(again.as_deref(), Some("2372105"));
        assert_eq!(fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unavailable_listing_means_no_match_id() {
        let source = FakePages::new();
        let id = todays_first_match_id(&source, &TtlCache::new(TTL)).await;
        assert_eq!(id, None);
    }
}
