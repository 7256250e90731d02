use axum::extract::{Query, State};
use axum::http::{HeaderMap, header};
use axum::response::{IntoResponse, Response};
use std::sync::Arc;
use crate::encoding::{to_json, wrap_jsonp};
use crate::metrics::{RATE_LIMITED, REQUEST_TOTAL};
use crate::models::{FetchRequest, FetchResult, TunnelParams};
use crate::state::AppState;

pub const MISSING_URL: &str = "URL parameter is required.";

// Plain text for the missing-url and rate-limited cases, encoded envelope otherwise
#[derive(Debug, PartialEq, Eq)]
pub enum TunnelReply {
    Text(String),
    Envelope {
        body: Vec<u8>,
        content_type: &'static str,
    },
}

// Always 200 - outcomes travel in the body, never in the status line
impl IntoResponse for TunnelReply {
    fn into_response(self) -> Response {
        match self {
            Self::Text(message) => message.into_response(),
            Self::Envelope { body, content_type } => {
                ([(header::CONTENT_TYPE, content_type)], body).into_response()
            }
        }
    }
}

pub fn rate_limited_message(limit: u32) -> String {
    format!("rate limited: you have a max of {} request per second", limit)
}

// One tunnel call: an empty url never touches the limiter, and only admitted clients fetch
pub async fn handle_get(state: &AppState, request: FetchRequest, callback: &str) -> TunnelReply {
    if request.target_url.is_empty() {
        tracing::info!(client = %request.client_id, "failed to find url parameter");
        return TunnelReply::Text(MISSING_URL.to_string());
    }

    if !state.rate_limiter.admit(&request.client_id) {
        RATE_LIMITED.inc();
        tracing::info!(client = %request.client_id, url = %request.target_url, "rate limited");
        return TunnelReply::Text(rate_limited_message(state.rate_limiter.limit()));
    }

    let result = state.relay.fetch(&request.target_url).await;

    let json = match to_json(&result) {
        Ok(json) => json,
        Err(e) => {
            // plain structs of strings and integers; only reachable on a serde bug
            tracing::error!(error = %e, url = %request.target_url, "failed to encode envelope");
            to_json(&FetchResult::internal_failure(&request.target_url)).unwrap_or_default()
        }
    };

    let (body, content_type) = wrap_jsonp(json, callback);
    TunnelReply::Envelope { body, content_type }
}

// GET /get?url=...&callback=...
pub async fn tunnel_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(pairs): Query<Vec<(String, String)>>,
) -> TunnelReply {
    REQUEST_TOTAL.inc();
    let params = TunnelParams::from_pairs(pairs);

    // missing or non-ascii header collapses into the "" bucket
    let client_id = headers
        .get(&state.client_ip_header)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let request = FetchRequest {
        target_url: params.url,
        client_id,
    };

    handle_get(&state, request, &params.callback).await
}
