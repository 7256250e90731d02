use clap::Parser; // for cli
use std::sync::Arc;

use url_tunnel::config::Args;
use url_tunnel::handlers::router;
use url_tunnel::logging;
use url_tunnel::rate_limit::{RateLimiter, spawn_reset_task};
use url_tunnel::relay::Relay;
use url_tunnel::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // parse cli arguments
    let args = Args::parse();
    logging::init(args.dev);

    let settings = args.into_settings()?;

    let rate_limiter = Arc::new(RateLimiter::new(settings.rate_limit));

    // reset loop lives on its own task, independent of request handling
    spawn_reset_task(Arc::clone(&rate_limiter), settings.rate_window);

    // creating shared state
    let state = Arc::new(AppState {
        relay: Relay::new(settings.fetch_timeout)?,
        rate_limiter,
        client_ip_header: settings.client_ip_header.clone(),
        static_dir: settings.static_dir.clone(),
    });

    let app = router(state);

    let addr = format!("0.0.0.0:{}", settings.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(
        address = %listener.local_addr()?,
        rate_limit = settings.rate_limit,
        rate_window_secs = settings.rate_window.as_secs(),
        fetch_timeout_secs = settings.fetch_timeout.as_secs(),
        client_ip_header = %settings.client_ip_header,
        static_dir = %settings.static_dir.display(),
        "tunnel listening"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
