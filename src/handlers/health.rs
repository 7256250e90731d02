use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use std::sync::Arc;
use crate::state::AppState;

// liveness plus how many clients the current rate window is tracking
pub async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "rate_window": {
            "tracked_clients": state.rate_limiter.tracked_clients(),
            "age_secs": state.rate_limiter.window_started().elapsed().as_secs(),
        }
    }))
}
