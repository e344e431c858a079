pub(crate) mod match_page;
pub(crate) mod player;

use std::future::Future;
use std::time::Duration;

use tracing::debug;

use crate::error::{PropsError, Result};

pub(crate) const BASE_URL: &str = "https://www.hltv.org";
pub(crate) const PLAYER_PATH_PREFIX: &str = "/player/";

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) BoltBot/1.0";
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Source of raw page text, keyed by absolute URL.
///
/// The production implementation is [`HttpSource`]; tests substitute a
/// canned-page fake to drive the pipeline offline.
pub trait PageSource: Send + Sync {
    fn fetch_page(&self, url: &str) -> impl Future<Output = Result<String>> + Send;
}

/// Fetches pages over HTTP with a fixed identity header and timeout.
pub struct HttpSource {
    http: reqwest::Client,
}

impl HttpSource {
    pub fn new() -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(PropsError::ClientBuild)?;
        Ok(Self { http })
    }
}

impl PageSource for HttpSource {
    async fn fetch_page(&self, url: &str) -> Result<String> {
        debug!(url, "fetching page");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| PropsError::Http {
                url: url.to_owned(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(PropsError::UnexpectedStatus {
                url: url.to_owned(),
                status,
            });
        }

        response.text().await.map_err(|e| PropsError::ResponseBody {
            url: url.to_owned(),
            source: e,
        })
    }
}

/// Resolve a scraped profile href against the site origin.
/// Absolute URLs pass through verbatim.
pub(crate) fn player_profile_url(href: &str) -> String {
    if href.starts_with(PLAYER_PATH_PREFIX) {
        format!("{BASE_URL}{href}")
    } else {
        href.to_string()
    }
}

pub(crate) fn match_page_url(match_id: &str) -> String {
    format!("{BASE_URL}/matches/{match_id}/")
}

pub(crate) fn match_listing_url() -> String {
    format!("{BASE_URL}/matches")
}
