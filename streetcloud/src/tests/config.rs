// Unit tests for API configuration and URL assembly.

use crate::config::{API_ORIGIN_ENV, ApiConfig};

use serial_test::serial;

#[test]
#[serial]
fn given_clean_environment_when_built_then_production_defaults_apply() {
    unsafe { std::env::remove_var(API_ORIGIN_ENV) };

    let config = ApiConfig::from_env();

    assert_eq!(config.origin(), "https://api.streetcloud.io");
    assert_eq!(config.version(), "2.0");
    assert_eq!(config.api_url(), "https://api.streetcloud.io/v2.0");
}

/// **VALUE**: Verifies the environment override is honored at construction.
///
/// **WHY THIS MATTERS**: The override is read exactly once, when the config
/// is built; a config captured by a client must never change under it
/// mid-call.
#[test]
#[serial]
fn given_origin_override_when_built_then_env_value_wins() {
    unsafe { std::env::set_var(API_ORIGIN_ENV, "https://api.eu.streetcloud.io") };

    let config = ApiConfig::from_env();

    unsafe { std::env::remove_var(API_ORIGIN_ENV) };

    assert_eq!(config.origin(), "https://api.eu.streetcloud.io");
    assert_eq!(config.api_url(), "https://api.eu.streetcloud.io/v2.0");
}

#[test]
#[serial]
fn given_empty_origin_override_when_built_then_default_applies() {
    unsafe { std::env::set_var(API_ORIGIN_ENV, "") };

    let config = ApiConfig::from_env();

    unsafe { std::env::remove_var(API_ORIGIN_ENV) };

    assert_eq!(config.origin(), "https://api.streetcloud.io");
}

#[test]
fn given_custom_origin_and_version_when_built_then_api_url_reflects_both() {
    let config = ApiConfig::from_env()
        .with_origin("http://127.0.0.1:8080")
        .with_version("1.0");

    assert_eq!(config.api_url(), "http://127.0.0.1:8080/v1.0");
}

#[test]
fn given_endpoint_segment_when_resolved_then_version_path_is_preserved() {
    let config = ApiConfig::from_env().with_origin("http://127.0.0.1:8080");

    let url = config.endpoint("vehicles").expect("endpoint");

    assert_eq!(url.as_str(), "http://127.0.0.1:8080/v2.0/vehicles");
}
