use arc_swap::ArcSwap;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval_at};

use crate::metrics::TRACKED_CLIENTS;

// Longest window the reset task will schedule
pub const MAX_RATE_WINDOW: Duration = Duration::from_secs(24 * 60 * 60);

// Request counts for one fixed window - shared start time for every client
pub struct RateWindow {
    pub counts: DashMap<String, u32>,
    pub started_at: Instant,
}

impl RateWindow {
    fn new() -> Self {
        Self {
            counts: DashMap::new(),
            started_at: Instant::now(),
        }
    }
}

// Fixed-window limiter keyed by client id. reset() swaps the whole window at once,
// so a racing admit lands in the old window or the new one, never a half-cleared map.
pub struct RateLimiter {
    window: ArcSwap<RateWindow>,
    limit: u32,
}

impl RateLimiter {
    pub fn new(limit: u32) -> Self {
        Self {
            window: ArcSwap::from_pointee(RateWindow::new()),
            limit,
        }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    // Count this request and decide. Admits exactly `limit` requests per window.
    pub fn admit(&self, client_id: &str) -> bool {
        let window = self.window.load();

        // entry() holds the shard lock, so increments on one key never get lost
        let mut count = window.counts.entry(client_id.to_string()).or_insert(0);
        *count = count.saturating_add(1);

        *count <= self.limit
    }

    // Swaps in an empty window and returns the one it replaced
    pub fn reset(&self) -> Arc<RateWindow> {
        self.window.swap(Arc::new(RateWindow::new()))
    }

    // Requests counted for a client in the current window
    pub fn count(&self, client_id: &str) -> u32 {
        self.window
            .load()
            .counts
            .get(client_id)
            .map(|count| *count)
            .unwrap_or(0)
    }

    pub fn tracked_clients(&self) -> usize {
        self.window.load().counts.len()
    }

    pub fn window_started(&self) -> Instant {
        self.window.load().started_at
    }
}

// Reset loop - runs on its own task for the life of the process
pub fn spawn_reset_task(rate_limiter: Arc<RateLimiter>, window: Duration) -> JoinHandle<()> {
    let window = if window > MAX_RATE_WINDOW {
        tracing::warn!(
            requested_secs = window.as_secs(),
            max_secs = MAX_RATE_WINDOW.as_secs(),
            "rate window too large, clamping"
        );
        MAX_RATE_WINDOW
    } else {
        window
    };

    tokio::spawn(async move {
        // first tick one full window from now, not immediately
        let mut ticker = interval_at(tokio::time::Instant::now() + window, window);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::info!(window_secs = window.as_secs(), "rate limit reset task started");

        loop {
            ticker.tick().await;

            let previous = rate_limiter.reset();
            let clients = previous.counts.len();
            TRACKED_CLIENTS.set(clients as f64);

            tracing::debug!(
                clients,
                window_age_ms = previous.started_at.elapsed().as_millis() as u64,
                "rate limit window reset"
            );
        }
    })
}
