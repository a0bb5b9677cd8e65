// ABOUTME: Tests for the environment-backed configuration accessor
// ABOUTME: Verifies factory key mapping onto TD_ANALYTICS_* variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
#![allow(missing_docs)]

use serial_test::serial;
use std::env;
use td_analytics::{
    config::{ENV_DATABASE, ENV_TABLE, ENV_WRITE_KEY},
    config_keys, ConfigAccessor, EnvConfigAccessor, TreasureDataProvider,
};

fn clear_env() {
    env::remove_var(ENV_WRITE_KEY);
    env::remove_var(ENV_DATABASE);
    env::remove_var(ENV_TABLE);
}

#[test]
#[serial]
fn resolves_factory_keys_from_environment() {
    clear_env();
    env::set_var(ENV_WRITE_KEY, "wk/secret");
    env::set_var(ENV_DATABASE, "game_analytics");
    env::set_var(ENV_TABLE, "events");

    let accessor = EnvConfigAccessor;
    assert_eq!(
        accessor.get_value(config_keys::API_KEY).as_deref(),
        Some("wk/secret")
    );
    assert_eq!(
        accessor.get_value(config_keys::DATABASE).as_deref(),
        Some("game_analytics")
    );
    assert_eq!(
        accessor.get_value(config_keys::TABLE).as_deref(),
        Some("events")
    );

    clear_env();
}

#[test]
#[serial]
fn unset_variables_and_unknown_keys_resolve_to_none() {
    clear_env();

    let accessor = EnvConfigAccessor;
    assert!(accessor.get_value(config_keys::API_KEY).is_none());
    assert!(accessor.get_value("Endpoint").is_none());
}

#[test]
#[serial]
fn factory_accepts_the_environment_accessor() {
    clear_env();
    env::set_var(ENV_WRITE_KEY, "wk/secret");
    env::set_var(ENV_DATABASE, "game_analytics");

    let accessor = EnvConfigAccessor;
    let provider = TreasureDataProvider::create(Some(&accessor)).expect("provider is created");
    assert_eq!(provider.config().write_key, "wk/secret");
    assert_eq!(provider.config().database, "game_analytics");
    // Unset table falls back to empty, matching an unset host delegate key.
    assert_eq!(provider.config().table, "");

    clear_env();
}
