use lazy_static::lazy_static;
use prometheus::{
    Counter, CounterVec, Gauge, Histogram, register_counter, register_counter_vec,
    register_gauge, register_histogram,
};


lazy_static! {
    pub static ref REQUEST_TOTAL: Counter =
        register_counter!("tunnel_requests_total", "Total number of tunnel requests").unwrap();
    pub static ref RATE_LIMITED: Counter =
        register_counter!("tunnel_rate_limited_total", "Requests rejected by the rate limiter").unwrap();
    pub static ref FETCH_FAILURES: CounterVec = register_counter_vec!(
        "tunnel_fetch_failures_total",
        "Upstream fetches that ended in an internal failure",
        &["kind"]
    )
    .unwrap();
    pub static ref FETCH_LATENCY: Histogram = register_histogram!(
        "tunnel_fetch_latency_seconds",
        "Upstream fetch latency in seconds"
    )
    .unwrap();
    pub static ref TRACKED_CLIENTS: Gauge =
        register_gauge!("tunnel_tracked_clients", "Clients counted in the last completed rate window").unwrap();
}
