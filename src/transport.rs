// ABOUTME: Outbound HTTP request plumbing for analytics ingestion calls
// ABOUTME: Shared reqwest client, fire-and-forget dispatch, and completion logging
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outbound request plumbing.
//!
//! Providers build an [`OutboundRequest`] per call and hand it to
//! [`dispatch`], which spawns a task on the ambient tokio runtime to
//! execute it over an [`AnalyticsTransport`]. The task's only follow-up
//! is [`log_completion`]; nothing is retried and no outcome reaches the
//! caller.

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, Method};
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use tracing::{info, warn};

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default connection timeout in seconds
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Configured timeout values for the shared client
static CLIENT_TIMEOUTS: OnceLock<(u64, u64)> = OnceLock::new();

/// Global shared HTTP client with configured timeouts
static SHARED_CLIENT: OnceLock<Client> = OnceLock::new();

/// Initialize the shared HTTP client timeout configuration.
///
/// Call once at host startup before the first request is dispatched. If
/// not called, defaults are used (30s timeout, 10s connect timeout).
pub fn initialize_shared_client(timeout_secs: u64, connect_timeout_secs: u64) {
    let _ = CLIENT_TIMEOUTS.set((timeout_secs, connect_timeout_secs));
}

/// Get the shared HTTP client used for ingestion calls.
///
/// The client pools connections across all providers in the process.
pub fn shared_client() -> &'static Client {
    SHARED_CLIENT.get_or_init(|| {
        let (timeout, connect_timeout) = CLIENT_TIMEOUTS
            .get()
            .copied()
            .unwrap_or((DEFAULT_TIMEOUT_SECS, DEFAULT_CONNECT_TIMEOUT_SECS));

        ClientBuilder::new()
            .timeout(Duration::from_secs(timeout))
            .connect_timeout(Duration::from_secs(connect_timeout))
            .build()
            .unwrap_or_else(|_| Client::new())
    })
}

/// A single ingestion request, constructed fresh per analytics call.
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    /// HTTP method (always POST for ingestion)
    pub method: Method,
    /// Fully resolved request URL
    pub url: String,
    /// Header name/value pairs
    pub headers: Vec<(String, String)>,
    /// Serialized JSON body
    pub body: String,
}

impl OutboundRequest {
    /// Build the standard ingestion POST: JSON content type plus the
    /// write-key authentication header.
    #[must_use]
    pub fn post_json(url: String, write_key: &str, body: String) -> Self {
        Self {
            method: Method::POST,
            url,
            headers: vec![
                ("Content-Type".to_owned(), "application/json".to_owned()),
                ("X-TD-Write-Key".to_owned(), write_key.to_owned()),
            ],
            body,
        }
    }
}

/// Response data captured from a completed request.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// Numeric HTTP status code
    pub status: u16,
    /// Response body text
    pub body: String,
}

/// Outcome of a dispatched request, delivered to the completion handler.
///
/// `success` reflects transport-level delivery only; a non-2xx status
/// still arrives as a success with its code in `response`.
#[derive(Debug)]
pub struct CompletionEvent {
    /// The request that completed
    pub request: OutboundRequest,
    /// The response, absent when the request never completed
    pub response: Option<TransportResponse>,
    /// Whether the request was delivered at the transport level
    pub success: bool,
}

/// Executes a single outbound request and reports its outcome.
///
/// Implementations never retry; a failed send is terminal for that call.
#[async_trait]
pub trait AnalyticsTransport: Send + Sync {
    /// Execute the request and return its completion event.
    async fn execute(&self, request: OutboundRequest) -> CompletionEvent;
}

/// Transport backed by the shared pooled [`reqwest::Client`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ReqwestTransport;

#[async_trait]
impl AnalyticsTransport for ReqwestTransport {
    async fn execute(&self, request: OutboundRequest) -> CompletionEvent {
        let mut builder = shared_client()
            .request(request.method.clone(), &request.url)
            .body(request.body.clone());
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        match builder.send().await {
            Ok(response) => {
                let status = response.status().as_u16();
                let body = response.text().await.unwrap_or_default();
                CompletionEvent {
                    request,
                    response: Some(TransportResponse { status, body }),
                    success: true,
                }
            }
            Err(err) => {
                warn!("analytics request to {} failed: {err}", request.url);
                CompletionEvent {
                    request,
                    response: None,
                    success: false,
                }
            }
        }
    }
}

/// Dispatch a request without blocking the caller.
///
/// The request runs as a task on the ambient tokio runtime and its
/// outcome is handed to [`log_completion`]. Outside a runtime the
/// request is dropped with a warning; this is reachable when a provider
/// holding an active session is dropped after the runtime shut down.
pub fn dispatch(transport: Arc<dyn AnalyticsTransport>, request: OutboundRequest) {
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => {
            handle.spawn(async move {
                let event = transport.execute(request).await;
                log_completion(&event);
            });
        }
        Err(_) => {
            warn!(
                "analytics request to {} dropped: no async runtime available",
                request.url
            );
        }
    }
}

/// Log the outcome of a completed ingestion request.
///
/// Success with a response logs the URL, status code, and body; anything
/// else logs the URL with a no-response notice. Never retries and never
/// touches provider state.
pub fn log_completion(event: &CompletionEvent) {
    match &event.response {
        Some(response) if event.success => {
            info!(
                "analytics response for [{}]. Code: {}. Payload: {}",
                event.request.url, response.status, response.body
            );
        }
        _ => {
            info!("analytics response for [{}]. No response", event.request.url);
        }
    }
}
