use thiserror::Error;

// Upstream fetch failures - logged and folded into a 500 envelope, never returned to callers
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("failed to read body: {0}")]
    BodyRead(#[source] reqwest::Error),
}

impl FetchError {
    // Label used for logs and the failures metric
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) => "invalid_request",
            Self::Transport(_) => "transport",
            Self::BodyRead(_) => "body_read",
        }
    }
}

// Startup errors - the process refuses to start on any of these
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("rate limit must be greater than zero")]
    ZeroRateLimit,

    #[error("rate window must be at least one second")]
    ZeroRateWindow,

    #[error("rate window of {secs}s exceeds the maximum of {max_secs}s")]
    RateWindowTooLarge { secs: u64, max_secs: u64 },

    #[error("fetch timeout must be at least one second")]
    ZeroFetchTimeout,

    #[error("invalid client ip header {name:?}: {source}")]
    ClientIpHeader {
        name: String,
        #[source]
        source: axum::http::header::InvalidHeaderName,
    },

    #[error("failed to build http client: {0}")]
    HttpClient(#[source] reqwest::Error),
}
