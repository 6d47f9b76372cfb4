use crate::app_config::{AppConfig, Environment, OverlapPolicy};
use crate::ConfigError;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_USER_AGENT: &str = "kyf/0.1 (fan-intake)";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build configuration from the provided env-var lookup function, so tests
/// can drive it with a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let api_base_url = parse_base_url(&or_default("KYF_API_BASE_URL", DEFAULT_API_BASE_URL))?;
    let env = parse_environment(&or_default("KYF_ENV", "development"))?;
    let log_level = or_default("KYF_LOG_LEVEL", env.default_log_level());
    let request_timeout_secs = parse_u64("KYF_REQUEST_TIMEOUT_SECS", "30")?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "KYF_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    let user_agent = or_default("KYF_USER_AGENT", DEFAULT_USER_AGENT);
    let overlap_policy = parse_overlap_policy(&or_default("KYF_OVERLAP_POLICY", "supersede"))?;

    Ok(AppConfig {
        api_base_url,
        env,
        log_level,
        request_timeout_secs,
        user_agent,
        overlap_policy,
    })
}

fn parse_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::InvalidEnvVar {
            var: "KYF_API_BASE_URL".to_string(),
            reason: format!("expected an http(s) URL, got \"{raw}\""),
        });
    }
    Ok(trimmed.to_string())
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "KYF_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

fn parse_overlap_policy(s: &str) -> Result<OverlapPolicy, ConfigError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "supersede" => Ok(OverlapPolicy::Supersede),
        "reject" => Ok(OverlapPolicy::Reject),
        other => Err(ConfigError::InvalidEnvVar {
            var: "KYF_OVERLAP_POLICY".to_string(),
            reason: format!("expected \"supersede\" or \"reject\", got \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
