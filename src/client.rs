use std::time::Duration;

use tracing::instrument;

use crate::cache::TtlCache;
use crate::error::Result;
use crate::model::PropEntry;
use crate::props;
use crate::scraper::{HttpSource, PageSource};

const CACHE_TTL: Duration = Duration::from_secs(30 * 60);

/// The main entry point for building prop projections.
///
/// `PropsClient` owns the page source and the two TTL caches (match-of-the-day
/// lookup and per-match prop lists). Each call drives one sequential
/// fetch-parse pipeline; upstream failures degrade to empty/absent results
/// rather than errors.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> bolt_props::Result<()> {
/// use bolt_props::PropsClient;
///
/// let client = PropsClient::new()?;
/// let props = client.get_match_props("2372105").await;
/// println!("built {} prop entries", props.len());
/// # Ok(())
/// # }
/// ```
pub struct PropsClient<S = HttpSource> {
    source: S,
    match_id_cache: TtlCache<String>,
    props_cache: TtlCache<Vec<PropEntry>>,
}

impl PropsClient<HttpSource> {
    /// Create a client backed by HTTP with the fixed identity header
    /// and timeout.
    pub fn new() -> Result<Self> {
        Ok(Self::with_source(HttpSource::new()?))
    }
}

impl<S: PageSource> PropsClient<S> {
    /// Create a client over a custom page source. Used to substitute a
    /// canned-page source in tests.
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            match_id_cache: TtlCache::new(CACHE_TTL),
            props_cache: TtlCache::new(CACHE_TTL),
        }
    }

    /// Build (or return cached) prop projections for a match.
    #[instrument(skip(self))]
    pub async fn get_match_props(&self, match_id: &str) -> Vec<PropEntry> {
        props::build_props(&self.source, &self.props_cache, match_id).await
    }

    /// Resolve the first match listed for today, if any.
    #[instrument(skip(self))]
    pub async fn todays_first_match_id(&self) -> Option<String> {
        props::todays_first_match_id(&self.source, &self.match_id_cache).await
    }
}
