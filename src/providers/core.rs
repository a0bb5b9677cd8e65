// ABOUTME: Core analytics traits and interfaces for host applications
// ABOUTME: Defines the provider contract, event attributes, and configuration access
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Analytics provider contract
//!
//! This module defines the contract between a host application and an
//! analytics provider. The host drives the provider through
//! [`AnalyticsProvider`]: it brackets user activity with
//! `start_session` / `end_session`, records named events while a session
//! is active, and sets user attributes that the provider may or may not
//! transmit.
//!
//! ## Error handling
//!
//! No operation on this trait returns an error. A call made outside its
//! preconditions (recording without an active session, changing the user
//! id mid-session) is ignored with a logged warning, and transport
//! failures are logged by the completion handler without ever reaching
//! the caller.
//!
//! ## Thread safety
//!
//! Mutating operations take `&mut self`; concurrent use from multiple
//! threads must be serialized by the caller.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Configuration keys a provider factory resolves through a [`ConfigAccessor`].
pub mod config_keys {
    /// Ingestion write key used to authenticate requests.
    pub const API_KEY: &str = "ApiKey";
    /// Destination database name.
    pub const DATABASE: &str = "Database";
    /// Destination table name.
    pub const TABLE: &str = "Table";
}

/// Name/value pair accompanying a recorded event.
///
/// Attribute values are always strings; providers parse recognized names
/// into richer types themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventAttribute {
    /// Attribute name (e.g. "Category", "Label", "Value")
    pub name: String,
    /// Attribute value, unparsed
    pub value: String,
}

impl EventAttribute {
    /// Create a new attribute from anything string-like.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Resolves named configuration values supplied by the host application.
///
/// The host decides where values come from (its own config system, the
/// environment, a test fixture); the provider factory only asks for keys
/// from [`config_keys`].
pub trait ConfigAccessor: Send + Sync {
    /// Look up a configuration value by key. `None` means the key is not
    /// set anywhere the accessor can see.
    fn get_value(&self, key: &str) -> Option<String>;
}

/// Provider configuration resolved once at factory time.
///
/// Immutable after the provider is constructed; the write key, database,
/// and table address every outbound request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Per-account credential sent as the `X-TD-Write-Key` header
    pub write_key: String,
    /// Destination namespace for ingested events
    pub database: String,
    /// Destination dataset for ingested events
    pub table: String,
    /// Base URL of the ingestion API
    pub api_base_url: String,
}

/// Core analytics provider trait.
///
/// Implementations track a single client-side session and forward
/// notifications to their backing service. Operations never block the
/// caller and never surface transport errors.
///
/// The extended recorders (`record_item_purchase`, `record_error`, ...)
/// have default bodies that log and do nothing, so providers only
/// implement the subset their service supports.
pub trait AnalyticsProvider: Send + Sync {
    /// Start a session if none is active and the provider is configured
    /// to send. Returns whether a session is active afterwards.
    ///
    /// Calling this while a session is already active re-sends the start
    /// notification; there is no duplicate guard.
    fn start_session(&mut self, attributes: &[EventAttribute]) -> bool;

    /// End the active session, sending the end notification. No-op when
    /// no session is active.
    fn end_session(&mut self);

    /// Flush any locally held events.
    ///
    /// Providers that transmit events as they are recorded have nothing
    /// to flush and implement this as a no-op.
    fn flush_events(&mut self);

    /// Record a named event, optionally carrying attributes. Ignored with
    /// a warning when no session is active, and silently when `event_name`
    /// is empty.
    fn record_event(&mut self, event_name: &str, attributes: &[EventAttribute]);

    /// Set the user id. Rejected with a warning while a session is active.
    fn set_user_id(&mut self, user_id: &str);

    /// Current user id, empty until set.
    fn user_id(&self) -> &str;

    /// Current session id, empty while no session is active.
    fn session_id(&self) -> &str;

    /// Request a specific session id.
    ///
    /// Providers that derive their own session ids accept the call and
    /// report success without storing the value.
    fn set_session_id(&mut self, session_id: &str) -> bool;

    /// Set the user's age. Stored in memory only.
    fn set_age(&mut self, age: i32);

    /// Set the user's location. Stored in memory only.
    fn set_location(&mut self, location: &str);

    /// Set the user's gender. Stored in memory only.
    fn set_gender(&mut self, gender: &str);

    /// Set the host build info. Stored in memory only.
    fn set_build_info(&mut self, build_info: &str);

    /// Record an in-app item purchase.
    fn record_item_purchase(
        &mut self,
        item_id: &str,
        currency: &str,
        per_item_cost: i32,
        item_quantity: i32,
    ) {
        debug!(
            "provider does not record item purchases ({item_quantity} x '{item_id}' at {per_item_cost} {currency})"
        );
    }

    /// Record a purchase of in-game currency for real money.
    fn record_currency_purchase(
        &mut self,
        game_currency_type: &str,
        game_currency_amount: i32,
        real_currency_type: &str,
        real_money_cost: f32,
        payment_provider: &str,
    ) {
        debug!(
            "provider does not record currency purchases ({game_currency_amount} '{game_currency_type}' for {real_money_cost} {real_currency_type} via '{payment_provider}')"
        );
    }

    /// Record in-game currency granted by the game.
    fn record_currency_given(&mut self, game_currency_type: &str, game_currency_amount: i32) {
        debug!(
            "provider does not record currency grants ({game_currency_amount} '{game_currency_type}')"
        );
    }

    /// Record an error event.
    fn record_error(&mut self, error: &str, _attributes: &[EventAttribute]) {
        debug!("provider does not record errors ('{error}')");
    }

    /// Record a progression event.
    fn record_progress(
        &mut self,
        progress_type: &str,
        progress_name: &str,
        _attributes: &[EventAttribute],
    ) {
        debug!("provider does not record progress ('{progress_type}' / '{progress_name}')");
    }
}
