use thiserror::Error;

/// A single HTTP call that did not produce a usable body.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {reason}")]
    Network { url: String, reason: String },

    #[error("{url} answered HTTP {status}")]
    Status { url: String, status: u16 },
}

/// Why a session could not be established.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("landing page unavailable: {0}")]
    Landing(#[source] FetchError),

    #[error("no script bundle referenced by the landing page")]
    BundleNotFound,

    #[error("script bundle unavailable: {0}")]
    Bundle(#[source] FetchError),

    #[error("no auth header pair found in the script bundle")]
    TokenNotFound,
}

/// Failures of the aggregator data API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("no session established")]
    NoSession,

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("unexpected response shape: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
}
