use crate::model::{EvaluateRequest, EvaluateResponse};
use crate::util::{round1, round2};

/// Rounds per map assumed by the scoring formula. The per-match pipeline
/// refines this from odds cues; the standalone endpoint has no match
/// context and uses the league average.
const ROUNDS_PER_MAP: f64 = 23.5;

const DEFAULT_MAP_COUNT: u32 = 2;
const HS_WEIGHT: f64 = 0.65;
const KILLS_WEIGHT: f64 = 0.35;
const SMASH_THRESHOLD: f64 = 12.5;

const VERDICT_SMASH: &str = "⚡ Smash over";
const VERDICT_MID: &str = "🤏 Mid play";

/// Score a single prop line.
///
/// Expected kills come from kpr when given, else from the kill line, else
/// zero; the value score blends the headshot line and expected kills and
/// subtracts salary. Unset or zero map counts fall back to two maps.
pub fn evaluate(request: &EvaluateRequest) -> EvaluateResponse {
    let map_count = request
        .map_count
        .filter(|&maps| maps > 0)
        .unwrap_or(DEFAULT_MAP_COUNT);
    let map_count = f64::from(map_count);
    let kill_line = request.kill_line.unwrap_or_default();
    let hs_line = request.hs_line.unwrap_or_default();
    let salary = request.salary.unwrap_or_default();

    let expected_kills = match request.kpr {
        Some(kpr) => kpr * ROUNDS_PER_MAP * map_count,
        None if kill_line > 0.0 => kill_line * map_count,
        None => 0.0,
    };

    let value_score = round2(hs_line * HS_WEIGHT + expected_kills * KILLS_WEIGHT - salary);
    let verdict = if value_score >= SMASH_THRESHOLD {
        VERDICT_SMASH
    } else {
        VERDICT_MID
    };

    EvaluateResponse {
        player: request.player.clone(),
        value_score,
        expected_kills: round2(expected_kills),
        used_kpr: request.kpr,
        used_hs: request
            .hs_percent
            .map(|hs| format!("{:.1}%", round1(hs * 100.0))),
        verdict,
        notes: "Bolt formula: odds-adjusted rounds, cached scrapes.",
    }
}
