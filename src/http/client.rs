use std::time::{Duration, Instant};

use reqwest::header::{CONTENT_TYPE, HeaderValue};
use reqwest::{Client, Url};
use tracing::debug;

use crate::error::ClientError;

use super::request::{ApiRequest, RequestBody};
use super::response::ApiResponse;

const MAX_REDIRECTS: usize = 10;

#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// `None` keeps reqwest's default (no overall timeout).
    pub timeout: Option<Duration>,
}

/// Thin wrapper over one shared `reqwest::Client`. Every call is a single
/// attempt; nothing is retried.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Client,
}

impl HttpClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let mut builder = Client::builder().redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS));

        if let Some(timeout) = config.timeout {
            if !timeout.is_zero() {
                builder = builder.timeout(timeout);
            }
        }

        let inner = builder.build().map_err(ClientError::Build)?;
        Ok(Self { inner })
    }

    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        let url = Url::parse(&request.url).map_err(|e| ClientError::InvalidUrl {
            url: request.url.clone(),
            reason: e.to_string(),
        })?;

        let mut builder = self.inner.request(request.method.into(), url);
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Raw(raw) => builder
                .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .body(raw),
        };

        debug!(method = %request.method, url = %request.url, "sending request");

        let started = Instant::now();
        let response = builder.send().await.map_err(|source| ClientError::Transport {
            method: request.method.to_string(),
            url: request.url.clone(),
            source,
        })?;
        let elapsed = started.elapsed().as_millis() as u64;

        let status = response.status();
        let status_text = status.canonical_reason().unwrap_or("Unknown").to_string();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("text/plain")
            .to_string();

        let bytes = response.bytes().await.map_err(|source| ClientError::Body {
            url: request.url.clone(),
            source,
        })?;
        let body = String::from_utf8_lossy(&bytes).into_owned();

        debug!(
            status = status.as_u16(),
            time_ms = elapsed,
            size = bytes.len(),
            "received response"
        );

        Ok(ApiResponse {
            status: status.as_u16(),
            status_text,
            body,
            time_ms: elapsed,
            content_type,
        })
    }
}
