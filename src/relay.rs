use reqwest::Url;
use reqwest::header::CONTENT_TYPE;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use crate::error::{ConfigError, FetchError};
use crate::metrics::{FETCH_FAILURES, FETCH_LATENCY};
use crate::models::{FetchResult, FetchStatus};

// Outbound GET for the tunnel - one attempt, no cache, failures become a 500 envelope
pub struct Relay {
    client: reqwest::Client,
    next_id: AtomicU64,
}

impl Relay {
    pub fn new(timeout: Duration) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ConfigError::HttpClient)?;

        Ok(Self::with_client(client))
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
            next_id: AtomicU64::new(0),
        }
    }

    pub async fn fetch(&self, target_url: &str) -> FetchResult {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::info!(id, url = %target_url, "request");

        let start = Instant::now();
        let outcome = self.try_fetch(target_url).await;
        FETCH_LATENCY.observe(start.elapsed().as_secs_f64());

        match outcome {
            Ok(result) => {
                tracing::info!(
                    id,
                    url = %result.status.url,
                    content_type = %result.status.content_type,
                    http_code = result.status.http_code,
                    "response"
                );
                result
            }
            Err(e) => {
                FETCH_FAILURES.with_label_values(&[e.kind()]).inc();
                tracing::warn!(id, url = %target_url, kind = e.kind(), error = %e, "fetch failed");
                FetchResult::internal_failure(target_url)
            }
        }
    }

    async fn try_fetch(&self, target_url: &str) -> Result<FetchResult, FetchError> {
        let url = Url::parse(target_url).map_err(|e| FetchError::InvalidRequest(e.to_string()))?;

        let response = self.client.get(url).send().await.map_err(|e| {
            // unsupported schemes and the like surface as builder errors
            if e.is_builder() {
                FetchError::InvalidRequest(e.to_string())
            } else {
                FetchError::Transport(e)
            }
        })?;

        let http_code = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        let body = response.bytes().await.map_err(FetchError::BodyRead)?;

        Ok(FetchResult {
            contents: String::from_utf8_lossy(&body).into_owned(),
            status: FetchStatus {
                url: target_url.to_string(),
                content_type,
                http_code,
            },
        })
    }
}
