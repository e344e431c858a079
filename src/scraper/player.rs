use std::sync::LazyLock;

use regex::Regex;
use ::scraper::{ElementRef, Html, Selector};

use crate::model::PlayerStats;

const KPR_LABEL: &str = "Kills / round";
const HS_LABEL: &str = "Headshots";

static LABEL_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span, div").unwrap());
static KPR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Kills\s*/\s*round[^0-9]*([0-9]+\.?[0-9]*)").unwrap());
static HS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Headshots[^0-9%]*([0-9]+\.?[0-9]*)%?").unwrap());

/// Recover (kpr, headshot fraction) from a player profile page.
///
/// Each field is resolved independently: the structured label/sibling lookup
/// wins when it parses, otherwise a regex over the raw markup is tried.
/// Anything malformed degrades to `None`, never to an error.
pub(crate) fn extract_player_stats(html: &str) -> PlayerStats {
    let document = Html::parse_document(html);
    let (mut kpr, mut hs_fraction) = labelled_stats(&document);

    if kpr.is_none() {
        kpr = KPR_RE
            .captures(html)
            .and_then(|c| c[1].parse().ok());
    }
    if hs_fraction.is_none() {
        hs_fraction = HS_RE
            .captures(html)
            .and_then(|c| c[1].parse().ok())
            .map(normalize_hs);
    }

    PlayerStats { kpr, hs_fraction }
}

/// Structured lookup: a `span`/`div` whose entire text is the stat label,
/// with the value in the next sibling element.
fn labelled_stats(document: &Html) -> (Option<f64>, Option<f64>) {
    let mut kpr = None;
    let mut hs_fraction = None;

    for element in document.select(&LABEL_SELECTOR) {
        let label: String = element.text().collect();
        let label = label.trim();
        if label != KPR_LABEL && label != HS_LABEL {
            continue;
        }

        let Some(value) = sibling_value(&element) else {
            continue;
        };

        if label == KPR_LABEL && kpr.is_none() {
            kpr = value.parse().ok();
        } else if label == HS_LABEL && hs_fraction.is_none() {
            hs_fraction = value.parse().ok().map(normalize_hs);
        }
    }

    (kpr, hs_fraction)
}

fn sibling_value(element: &ElementRef) -> Option<String> {
    let sibling = element.next_siblings().find_map(ElementRef::wrap)?;
    let value: String = sibling.text().collect();
    Some(value.replace('%', "").trim().to_string())
}

/// Headshot values quoted as whole percentages (42) become fractions (0.42);
/// values already in [0, 1] pass through.
fn normalize_hs(value: f64) -> f64 {
    if value > 1.0 {
        value / 100.0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROFILE: &str = r#"
        <html><body>
            <div class="stats-row"><span>Kills / round</span><span>0.75</span></div>
            <div class="stats-row"><span>Headshots</span><span>42%</span></div>
        </body></html>
    "#;

    #[test]
    fn structured_lookup_reads_sibling_values() {
        let stats = extract_player_stats(PROFILE);
        assert_eq!(stats.kpr, Some(0.75));
        assert_eq!(stats.hs_fraction, Some(0.42));
    }

    #[test]
    fn extraction_is_idempotent() {
        assert_eq!(extract_player_stats(PROFILE), extract_player_stats(PROFILE));
    }

    #[test]
    fn headshot_fraction_passes_through_unnormalized() {
        let html = r#"<div><span>Headshots</span><span>0.42</span></div>"#;
        let stats = extract_player_stats(html);
        assert_eq!(stats.hs_fraction, Some(0.42));
    }

    #[test]
    fn regex_fallback_when_markup_is_flat() {
        let html = "<html><body>Kills / round: 0.68 and Headshots: 55% overall</body></html>";
        let stats = extract_player_stats(html);
        assert_eq!(stats.kpr, Some(0.68));
        assert_eq!(stats.hs_fraction, Some(0.55));
    }

    #[test]
    fn fields_degrade_independently() {
        let html = r#"<div><span>Headshots</span><span>38%</span></div>"#;
        let stats = extract_player_stats(html);
        assert_eq!(stats.kpr, None);
        assert_eq!(stats.hs_fraction, Some(0.38));
    }

    #[test]
    fn malformed_values_yield_none() {
        let html = r#"<div><span>Kills / round</span><span>N/A</span></div>"#;
        let stats = extract_player_stats(html);
        assert_eq!(stats.kpr, None);
        assert_eq!(stats.hs_fraction, None);
    }

    #[test]
    fn structured_value_beats_regex_fallback() {
        let html = r#"
            <div><span>Kills / round</span><span>0.91</span></div>
            <p>Kills / round trivia mentions 0.10 elsewhere</p>
        "#;
        let stats = extract_player_stats(html);
        assert_eq!(stats.kpr, Some(0.91));
    }
}
