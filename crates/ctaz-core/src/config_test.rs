use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "CTAZ_ENV"));
}

#[test]
fn build_app_config_uses_defaults_with_empty_env() {
    let map = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.business_path.to_str(), Some("./config/business.yaml"));
    assert!(cfg.mapbox_access_token.is_none());
    assert_eq!(cfg.geocoder_base_url, "https://api.mapbox.com");
    assert_eq!(cfg.http_timeout_secs, 10);
    assert_eq!(cfg.user_agent, "ctaz/0.1 (service-area-map)");
    assert_eq!(cfg.quote_base_url, "http://localhost:3000");
    assert_eq!(cfg.rate_limit_max_requests, 30);
    assert_eq!(cfg.rate_limit_window_secs, 60);
}

#[test]
fn build_app_config_fails_with_invalid_bind_addr() {
    let mut map = HashMap::new();
    map.insert("CTAZ_BIND_ADDR", "not-a-socket-addr");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CTAZ_BIND_ADDR"),
        "expected InvalidEnvVar(CTAZ_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn production_requires_mapbox_token() {
    let mut map = HashMap::new();
    map.insert("CTAZ_ENV", "production");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "MAPBOX_ACCESS_TOKEN"),
        "expected MissingEnvVar(MAPBOX_ACCESS_TOKEN), got: {result:?}"
    );
}

#[test]
fn blank_mapbox_token_counts_as_missing() {
    let mut map = HashMap::new();
    map.insert("CTAZ_ENV", "production");
    map.insert("MAPBOX_ACCESS_TOKEN", "   ");
    assert!(build_app_config(lookup_from_map(&map)).is_err());
}

#[test]
fn production_with_token_succeeds() {
    let mut map = HashMap::new();
    map.insert("CTAZ_ENV", "production");
    map.insert("MAPBOX_ACCESS_TOKEN", "pk.test");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Production);
    assert_eq!(cfg.mapbox_access_token.as_deref(), Some("pk.test"));
}

#[test]
fn debug_output_redacts_mapbox_token() {
    let mut map = HashMap::new();
    map.insert("MAPBOX_ACCESS_TOKEN", "pk.secret-value");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let debug = format!("{cfg:?}");
    assert!(!debug.contains("pk.secret-value"));
    assert!(debug.contains("[redacted]"));
}

#[test]
fn http_timeout_secs_override() {
    let mut map = HashMap::new();
    map.insert("CTAZ_HTTP_TIMEOUT_SECS", "3");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.http_timeout_secs, 3);
}

#[test]
fn http_timeout_secs_invalid() {
    let mut map = HashMap::new();
    map.insert("CTAZ_HTTP_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CTAZ_HTTP_TIMEOUT_SECS"),
        "expected InvalidEnvVar(CTAZ_HTTP_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn rate_limit_overrides() {
    let mut map = HashMap::new();
    map.insert("CTAZ_RATE_LIMIT_MAX_REQUESTS", "5");
    map.insert("CTAZ_RATE_LIMIT_WINDOW_SECS", "10");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.rate_limit_max_requests, 5);
    assert_eq!(cfg.rate_limit_window_secs, 10);
}

#[test]
fn rate_limit_window_must_be_positive() {
    let mut map = HashMap::new();
    map.insert("CTAZ_RATE_LIMIT_WINDOW_SECS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CTAZ_RATE_LIMIT_WINDOW_SECS"),
        "expected InvalidEnvVar(CTAZ_RATE_LIMIT_WINDOW_SECS), got: {result:?}"
    );
}

#[test]
fn business_path_override() {
    let mut map = HashMap::new();
    map.insert("CTAZ_BUSINESS_PATH", "/etc/ctaz/business.yaml");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.business_path.to_str(), Some("/etc/ctaz/business.yaml"));
}
