/// A player discovered on a match page.
///
/// Identity is the profile `href`; the name is for display and for
/// deduplication within a single match page.
#[derive(Debug, Clone)]
pub struct PlayerRef {
    pub name: String,
    pub href: String,
}

/// Per-player rate statistics scraped from a profile page.
///
/// `None` means the value could not be recovered from the page. Defaulting
/// to zero happens only when a [`super::PropEntry`] is assembled, never here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerStats {
    /// Kills per round.
    pub kpr: Option<f64>,
    /// Headshot share of kills, as a fraction in [0, 1].
    pub hs_fraction: Option<f64>,
}
