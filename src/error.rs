/// All errors that can occur while talking to the upstream site.
///
/// These never reach the API surface: every call site absorbs them into
/// "page unavailable" (skip the participant, empty props, no match id).
#[derive(thiserror::Error, Debug)]
pub enum PropsError {
    /// The shared HTTP client could not be constructed.
    #[error("failed to build http client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// HTTP request failed (network, DNS, TLS, timeout, etc.).
    #[error("http request failed for {url}: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    /// Server returned a non-success HTTP status code.
    #[error("unexpected status {status} for {url}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Failed to read the response body as text.
    #[error("failed to read response body from {url}: {source}")]
    ResponseBody {
        url: String,
        source: reqwest::Error,
    },
}

pub type Result<T> = std::result::Result<T, PropsError>;
