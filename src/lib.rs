// ABOUTME: Treasure Data analytics provider plugin and its host-facing contract
// ABOUTME: Core analytics traits, outbound HTTP plumbing, and environment configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Analytics provider plugin for the Treasure Data ingestion API.
//!
//! This crate defines the abstract analytics contract a host application
//! consumes ([`providers::core::AnalyticsProvider`]) and the Treasure Data
//! adapter implementing it. The adapter tracks a single client-side session,
//! posts session start/end notifications and recorded events as small JSON
//! bodies addressed by database and table, and authenticates each request
//! with a static write-key header.
//!
//! Every outbound call is a single best-effort POST dispatched without
//! blocking the caller; the outcome is only logged. Nothing is buffered,
//! retried, or persisted, and no failure crosses the provider boundary.

/// Environment-backed configuration accessor
pub mod config;
/// Analytics provider contract and implementations
pub mod providers;
/// Outbound HTTP request plumbing
pub mod transport;

// Re-export key types for convenience

pub use config::EnvConfigAccessor;
pub use providers::core::{
    config_keys, AnalyticsProvider, ConfigAccessor, EventAttribute, ProviderConfig,
};
pub use providers::errors::{ProviderError, ProviderResult};
pub use providers::treasure_data::{TreasureDataProvider, DEFAULT_API_BASE_URL};
pub use transport::{
    dispatch, log_completion, shared_client, AnalyticsTransport, CompletionEvent, OutboundRequest,
    ReqwestTransport, TransportResponse,
};
