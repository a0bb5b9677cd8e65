// ABOUTME: Shared test helpers for analytics provider integration tests
// ABOUTME: Recording transport double and provider construction utilities
//
// SPDX-License-Identifier: MIT OR Apache-2.0
#![allow(missing_docs, dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use td_analytics::{
    AnalyticsTransport, CompletionEvent, ConfigAccessor, OutboundRequest, ProviderConfig,
    TransportResponse, TreasureDataProvider,
};

/// Captures dispatched requests instead of touching the network.
#[derive(Default)]
pub struct RecordingTransport {
    requests: Mutex<Vec<OutboundRequest>>,
}

impl RecordingTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn requests(&self) -> Vec<OutboundRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl AnalyticsTransport for RecordingTransport {
    async fn execute(&self, request: OutboundRequest) -> CompletionEvent {
        self.requests.lock().unwrap().push(request.clone());
        CompletionEvent {
            request,
            response: Some(TransportResponse {
                status: 200,
                body: "ok".to_owned(),
            }),
            success: true,
        }
    }
}

/// Configuration accessor backed by a plain map.
pub struct MapConfigAccessor(pub HashMap<String, String>);

impl MapConfigAccessor {
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self(
            pairs
                .iter()
                .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                .collect(),
        )
    }
}

impl ConfigAccessor for MapConfigAccessor {
    fn get_value(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }
}

pub fn test_config(write_key: &str) -> ProviderConfig {
    ProviderConfig {
        write_key: write_key.to_owned(),
        database: "game_analytics".to_owned(),
        table: "events".to_owned(),
        api_base_url: "https://ingest.example.com/".to_owned(),
    }
}

/// Provider wired to a recording transport, for request-counting tests.
pub fn provider_with(write_key: &str) -> (TreasureDataProvider, Arc<RecordingTransport>) {
    let transport = RecordingTransport::new();
    let provider = TreasureDataProvider::with_transport(test_config(write_key), transport.clone());
    (provider, transport)
}

/// Let fire-and-forget dispatch tasks run to completion.
pub async fn settle() {
    for _ in 0..4 {
        tokio::task::yield_now().await;
    }
}
