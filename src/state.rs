use axum::http::HeaderName;
use std::path::PathBuf;
use std::sync::Arc;
use crate::rate_limit::RateLimiter;
use crate::relay::Relay;
// app's shared state

pub struct AppState {
    pub relay: Relay,
    pub rate_limiter: Arc<RateLimiter>, // shared with the reset task
    pub client_ip_header: HeaderName,   // trusted header carrying the client address
    pub static_dir: PathBuf,            // front-end served at /
}
