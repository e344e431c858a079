use serde::{Deserialize, Serialize};

/// Body of a `POST /evaluate` request.
///
/// Every field except the player name may be omitted or explicitly null;
/// the scoring formula substitutes its defaults (zero lines/salary, two
/// maps) for anything unset.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EvaluateRequest {
    pub player: String,
    #[serde(default)]
    pub kill_line: Option<f64>,
    #[serde(default)]
    pub hs_line: Option<f64>,
    #[serde(default)]
    pub salary: Option<f64>,
    #[serde(default)]
    pub map_count: Option<u32>,
    #[serde(default)]
    pub kpr: Option<f64>,
    #[serde(default)]
    pub hs_percent: Option<f64>,
}

/// Scored verdict for a single prop line.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluateResponse {
    pub player: String,
    pub value_score: f64,
    pub expected_kills: f64,
    pub used_kpr: Option<f64>,
    /// Headshot percentage rendered for display ("42.0%"), when provided.
    pub used_hs: Option<String>,
    pub verdict: &'static str,
    pub notes: &'static str,
}
