// ABOUTME: Treasure Data analytics provider implementation
// ABOUTME: Adapts the analytics contract to database/table addressed JSON ingestion
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Treasure Data adapter
//!
//! Tracks one client-side session and forwards session notifications and
//! recorded events to the Treasure Data postback API. Session
//! notifications go to `<base>/<database>/sessions`, events to
//! `<base>/<database>/<table>`; every request is a fire-and-forget JSON
//! POST authenticated by the `X-TD-Write-Key` header.
//!
//! User attributes (age, location, gender, build info) are stored in
//! memory and never transmitted.

use super::core::{config_keys, AnalyticsProvider, ConfigAccessor, EventAttribute, ProviderConfig};
use super::errors::{ProviderError, ProviderResult};
use crate::transport::{dispatch, AnalyticsTransport, OutboundRequest, ReqwestTransport};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Default ingestion endpoint for the Treasure Data postback API.
pub const DEFAULT_API_BASE_URL: &str = "https://in.treasuredata.com/postback/v3/event/";

/// Timestamp layout used in derived session ids.
const SESSION_TIME_FORMAT: &str = "%Y.%m.%d-%H.%M.%S";

/// Session start notification body
#[derive(Debug, Serialize)]
struct SessionStartBody {
    start_time: i64,
}

/// Session end notification body
#[derive(Debug, Serialize)]
struct SessionEndBody {
    end_time: i64,
}

/// Recorded event body; recognized attributes ride along when supplied.
#[derive(Debug, Serialize)]
struct EventBody<'a> {
    player_time: i64,
    action: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<f32>,
}

/// Analytics provider for the Treasure Data ingestion API.
///
/// Construct one per host through [`TreasureDataProvider::create`] and
/// keep it owned where the host needs it; there is no ambient shared
/// instance. Dropping the provider while a session is active sends the
/// end-of-session notification.
pub struct TreasureDataProvider {
    config: ProviderConfig,
    transport: Arc<dyn AnalyticsTransport>,
    session_started: bool,
    session_id: String,
    user_id: String,
    age: Option<i32>,
    location: String,
    gender: String,
    build_info: String,
}

impl TreasureDataProvider {
    /// Create a provider from the host's configuration accessor.
    ///
    /// Resolves the `ApiKey` / `Database` / `Table` keys; a key the
    /// accessor cannot resolve becomes an empty string with a warning.
    /// Returns `None` (again with a warning) when the accessor itself is
    /// unbound. No network access occurs during construction.
    #[must_use]
    pub fn create(accessor: Option<&dyn ConfigAccessor>) -> Option<Self> {
        match Self::try_create(accessor) {
            Ok(provider) => Some(provider),
            Err(err) => {
                warn!("failed to create Treasure Data analytics provider: {err}");
                None
            }
        }
    }

    fn try_create(accessor: Option<&dyn ConfigAccessor>) -> ProviderResult<Self> {
        let accessor = accessor.ok_or(ProviderError::UnboundAccessor)?;
        let config = ProviderConfig {
            write_key: resolve_key(accessor, config_keys::API_KEY),
            database: resolve_key(accessor, config_keys::DATABASE),
            table: resolve_key(accessor, config_keys::TABLE),
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
        };
        Ok(Self::with_config(config))
    }

    /// Create a provider with an explicit configuration.
    #[must_use]
    pub fn with_config(config: ProviderConfig) -> Self {
        Self::with_transport(config, Arc::new(ReqwestTransport))
    }

    /// Create a provider with a custom transport, standing in for HTTP
    /// in tests or routing through a host-owned client.
    #[must_use]
    pub fn with_transport(config: ProviderConfig, transport: Arc<dyn AnalyticsTransport>) -> Self {
        Self {
            config,
            transport,
            session_started: false,
            session_id: String::new(),
            user_id: String::new(),
            age: None,
            location: String::new(),
            gender: String::new(),
            build_info: String::new(),
        }
    }

    /// Provider configuration resolved at construction.
    #[must_use]
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Whether a session is currently active.
    #[must_use]
    pub fn session_active(&self) -> bool {
        self.session_started
    }

    /// Stored user age, if ever set.
    #[must_use]
    pub fn age(&self) -> Option<i32> {
        self.age
    }

    /// Stored user location, empty until set.
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Stored user gender, empty until set.
    #[must_use]
    pub fn gender(&self) -> &str {
        &self.gender
    }

    /// Stored host build info, empty until set.
    #[must_use]
    pub fn build_info(&self) -> &str {
        &self.build_info
    }

    fn sessions_url(&self) -> String {
        format!(
            "{}/{}/sessions",
            self.config.api_base_url.trim_end_matches('/'),
            self.config.database
        )
    }

    fn events_url(&self) -> String {
        format!(
            "{}/{}/{}",
            self.config.api_base_url.trim_end_matches('/'),
            self.config.database,
            self.config.table
        )
    }

    fn post_json<T: Serialize>(&self, url: String, body: &T) {
        match serde_json::to_string(body) {
            Ok(payload) => dispatch(
                Arc::clone(&self.transport),
                OutboundRequest::post_json(url, &self.config.write_key, payload),
            ),
            Err(err) => warn!("failed to serialize analytics payload: {err}"),
        }
    }
}

fn resolve_key(accessor: &dyn ConfigAccessor, key: &str) -> String {
    accessor.get_value(key).unwrap_or_else(|| {
        warn!("analytics configuration key '{key}' is not set");
        String::new()
    })
}

impl AnalyticsProvider for TreasureDataProvider {
    fn start_session(&mut self, _attributes: &[EventAttribute]) -> bool {
        if !self.session_started && !self.config.write_key.is_empty() {
            self.session_started = true;
            self.session_id = format!(
                "{}-{}",
                self.user_id,
                Utc::now().format(SESSION_TIME_FORMAT)
            );
            info!(
                "session started for user ({}) with session id ({})",
                self.user_id, self.session_id
            );
        }

        if self.session_started {
            let body = SessionStartBody {
                start_time: Utc::now().timestamp(),
            };
            self.post_json(self.sessions_url(), &body);
        }

        self.session_started
    }

    fn end_session(&mut self) {
        if !self.session_started {
            return;
        }

        let body = SessionEndBody {
            end_time: Utc::now().timestamp(),
        };
        self.post_json(self.sessions_url(), &body);

        self.session_started = false;
        self.session_id.clear();
        info!("session ended");
    }

    fn flush_events(&mut self) {
        // Events are posted as they are recorded; nothing is held back.
    }

    fn record_event(&mut self, event_name: &str, attributes: &[EventAttribute]) {
        if !self.session_started {
            warn!("record_event called while a session is not started. Ignoring.");
            return;
        }
        if event_name.is_empty() {
            return;
        }

        let now = Utc::now().timestamp();

        if attributes.is_empty() {
            let body = EventBody {
                player_time: now,
                action: event_name,
                category: None,
                label: None,
                value: None,
            };
            self.post_json(self.events_url(), &body);
            return;
        }

        let mut category = None;
        let mut label = None;
        let mut value = None;
        for attribute in attributes {
            match attribute.name.as_str() {
                "Category" if !attribute.value.is_empty() => {
                    category = Some(attribute.value.as_str());
                }
                "Label" if !attribute.value.is_empty() => {
                    label = Some(attribute.value.as_str());
                }
                // Unparsable values fall back to zero.
                "Value" => value = Some(attribute.value.parse::<f32>().unwrap_or(0.0)),
                _ => {}
            }
        }
        debug!(
            "action='{}' category='{}' label='{}' value='{}'",
            event_name,
            category.unwrap_or(""),
            label.unwrap_or(""),
            value.unwrap_or(0.0)
        );

        let body = EventBody {
            player_time: now,
            action: event_name,
            category,
            label,
            value,
        };
        self.post_json(self.events_url(), &body);
    }

    fn set_user_id(&mut self, user_id: &str) {
        if self.session_started {
            warn!("set_user_id called while a session is in progress. Ignoring.");
        } else {
            self.user_id = user_id.to_owned();
            info!("user is now ({})", self.user_id);
        }
    }

    fn user_id(&self) -> &str {
        &self.user_id
    }

    fn session_id(&self) -> &str {
        &self.session_id
    }

    fn set_session_id(&mut self, _session_id: &str) -> bool {
        // The session id stays derived from the user id and start time.
        true
    }

    fn set_age(&mut self, age: i32) {
        self.age = Some(age);
    }

    fn set_location(&mut self, location: &str) {
        self.location = location.to_owned();
    }

    fn set_gender(&mut self, gender: &str) {
        self.gender = gender.to_owned();
    }

    fn set_build_info(&mut self, build_info: &str) {
        self.build_info = build_info.to_owned();
    }
}

impl Drop for TreasureDataProvider {
    fn drop(&mut self) {
        if self.session_started {
            self.end_session();
        }
    }
}
