// Server-side URL tunnel: GET /get?url=... relays the target back as JSON or JSONP

pub mod config;
pub mod encoding;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod rate_limit;
pub mod relay;
pub mod state;
