mod health;
mod metrics;
mod tunnel;

pub use health::health_handler;
pub use metrics::metrics_handler;
pub use tunnel::{MISSING_URL, TunnelReply, handle_get, rate_limited_message, tunnel_handler};

use axum::Router;
use axum::http::{HeaderName, HeaderValue, Method, header};
use axum::routing::get;
use std::sync::Arc;
use std::convert::Infallible;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use crate::state::AppState;

const ALLOW_METHODS: &str = "POST, GET, PUT, DELETE, OPTIONS";
const ALLOW_HEADERS: &str = "Origin, X-Requested-With, Content-Type, Accept, Referer, User-Agent";

// Cross-origin callers are the whole point of /get
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::POST,
            Method::GET,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::ORIGIN,
            HeaderName::from_static("x-requested-with"),
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::REFERER,
            header::USER_AGENT,
        ])
}

pub fn router(state: Arc<AppState>) -> Router {
    // CorsLayer only adds methods/headers on preflight; existing callers see them on every reply
    let tunnel = get(tunnel_handler)
        .layer::<_, Infallible>(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOW_METHODS),
        ))
        .layer::<_, Infallible>(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOW_HEADERS),
        ))
        .layer::<_, Infallible>(SetResponseHeaderLayer::if_not_present(
            header::ALLOW,
            HeaderValue::from_static("*"),
        ))
        .layer::<_, Infallible>(cors_layer());

    Router::new()
        .route("/get", tunnel)
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .fallback_service(ServeDir::new(&state.static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
