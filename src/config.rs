// ABOUTME: Environment-backed configuration accessor for the analytics provider
// ABOUTME: Maps the factory's configuration keys onto TD_ANALYTICS_* variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment-based configuration.
//!
//! Hosts with their own configuration layer implement
//! [`ConfigAccessor`](crate::providers::core::ConfigAccessor) directly;
//! hosts configured through the environment can hand
//! [`EnvConfigAccessor`] to the provider factory instead.

use crate::providers::core::{config_keys, ConfigAccessor};
use std::env;
use tracing::debug;

/// Environment variable holding the ingestion write key.
pub const ENV_WRITE_KEY: &str = "TD_ANALYTICS_API_KEY";

/// Environment variable holding the destination database name.
pub const ENV_DATABASE: &str = "TD_ANALYTICS_DATABASE";

/// Environment variable holding the destination table name.
pub const ENV_TABLE: &str = "TD_ANALYTICS_TABLE";

/// Resolves provider configuration keys from the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvConfigAccessor;

impl ConfigAccessor for EnvConfigAccessor {
    fn get_value(&self, key: &str) -> Option<String> {
        let var = match key {
            config_keys::API_KEY => ENV_WRITE_KEY,
            config_keys::DATABASE => ENV_DATABASE,
            config_keys::TABLE => ENV_TABLE,
            _ => {
                debug!("unknown analytics configuration key '{key}'");
                return None;
            }
        };
        env::var(var).ok()
    }
}
