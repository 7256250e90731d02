use axum::http::HeaderName;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;
use crate::rate_limit::MAX_RATE_WINDOW;

// CLI argument structure
#[derive(Parser, Debug, Clone)]
#[command(name = "url-tunnel")]
#[command(about = "Fetches a URL server-side and relays it back as JSON or JSONP")]
pub struct Args {
    // Port to run the server on
    #[arg(short, long, default_value_t = 8080)]
    pub port: u16,

    // Rate limit max requests per client per window
    #[arg(long, default_value_t = 600)]
    pub rate_limit: u32,

    // Rate limit window in seconds
    #[arg(long, default_value_t = 60)]
    pub rate_window: u64,

    // Upstream fetch timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub fetch_timeout: u64,

    // Trusted header carrying the client address (set by the edge proxy)
    #[arg(long, default_value = "fly-client-ip")]
    pub client_ip_header: String,

    // Front-end files served for every path other than the API routes
    #[arg(long, default_value = "./static")]
    pub static_dir: PathBuf,

    // Human readable logs instead of JSON
    #[arg(long)]
    pub dev: bool,
}

// Validated settings the server runs with
#[derive(Debug, Clone)]
pub struct Settings {
    pub port: u16,
    pub rate_limit: u32,
    pub rate_window: Duration,
    pub fetch_timeout: Duration,
    pub client_ip_header: HeaderName,
    pub static_dir: PathBuf,
}

impl Args {
    pub fn into_settings(self) -> Result<Settings, ConfigError> {
        if self.rate_limit == 0 {
            return Err(ConfigError::ZeroRateLimit);
        }
        if self.rate_window == 0 {
            return Err(ConfigError::ZeroRateWindow);
        }
        if self.rate_window > MAX_RATE_WINDOW.as_secs() {
            return Err(ConfigError::RateWindowTooLarge {
                secs: self.rate_window,
                max_secs: MAX_RATE_WINDOW.as_secs(),
            });
        }
        if self.fetch_timeout == 0 {
            return Err(ConfigError::ZeroFetchTimeout);
        }

        let client_ip_header = HeaderName::try_from(self.client_ip_header.as_str())
            .map_err(|source| ConfigError::ClientIpHeader {
                name: self.client_ip_header.clone(),
                source,
            })?;

        Ok(Settings {
            port: self.port,
            rate_limit: self.rate_limit,
            rate_window: Duration::from_secs(self.rate_window),
            fetch_timeout: Duration::from_secs(self.fetch_timeout),
            client_ip_header,
            static_dir: self.static_dir,
        })
    }
}
