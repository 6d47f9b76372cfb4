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
fn parse_environment_known_values() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "KYF_ENV"));
}

#[test]
fn environment_picks_default_log_level() {
    for (env, level) in [("development", "debug"), ("test", "warn"), ("production", "info")] {
        let mut map = HashMap::new();
        map.insert("KYF_ENV", env);
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.log_level, level, "KYF_ENV={env}");
    }
}

#[test]
fn explicit_log_level_wins_over_environment() {
    let mut map = HashMap::new();
    map.insert("KYF_ENV", "production");
    map.insert("KYF_LOG_LEVEL", "kyf_client=trace");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Production);
    assert_eq!(cfg.log_level, "kyf_client=trace");
}

#[test]
fn build_app_config_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.api_base_url, "http://localhost:8000");
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "debug");
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.user_agent, "kyf/0.1 (fan-intake)");
    assert_eq!(cfg.overlap_policy, OverlapPolicy::Supersede);
}

#[test]
fn api_base_url_override_drops_trailing_slash() {
    let mut map = HashMap::new();
    map.insert("KYF_API_BASE_URL", "https://intake.example.com/api/");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.api_base_url, "https://intake.example.com/api");
}

#[test]
fn api_base_url_without_scheme_fails() {
    let mut map = HashMap::new();
    map.insert("KYF_API_BASE_URL", "localhost:8000");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "KYF_API_BASE_URL"),
        "expected InvalidEnvVar(KYF_API_BASE_URL), got: {result:?}"
    );
}

#[test]
fn request_timeout_override() {
    let mut map = HashMap::new();
    map.insert("KYF_REQUEST_TIMEOUT_SECS", "5");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.request_timeout_secs, 5);
}

#[test]
fn request_timeout_invalid() {
    let mut map = HashMap::new();
    map.insert("KYF_REQUEST_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "KYF_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(KYF_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn request_timeout_zero_fails() {
    let mut map = HashMap::new();
    map.insert("KYF_REQUEST_TIMEOUT_SECS", "0");
    assert!(build_app_config(lookup_from_map(&map)).is_err());
}

#[test]
fn overlap_policy_reject() {
    let mut map = HashMap::new();
    map.insert("KYF_OVERLAP_POLICY", "Reject");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.overlap_policy, OverlapPolicy::Reject);
}

#[test]
fn overlap_policy_unknown_fails() {
    let mut map = HashMap::new();
    map.insert("KYF_OVERLAP_POLICY", "queue");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "KYF_OVERLAP_POLICY"),
        "expected InvalidEnvVar(KYF_OVERLAP_POLICY), got: {result:?}"
    );
}

#[test]
fn user_agent_and_log_level_overrides() {
    let mut map = HashMap::new();
    map.insert("KYF_USER_AGENT", "custom-agent/2.0");
    map.insert("KYF_LOG_LEVEL", "debug");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.user_agent, "custom-agent/2.0");
    assert_eq!(cfg.log_level, "debug");
}
