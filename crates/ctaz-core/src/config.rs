use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
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
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can feed a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("CTAZ_ENV", "development"))?;

    let mapbox_access_token = lookup("MAPBOX_ACCESS_TOKEN")
        .ok()
        .filter(|t| !t.trim().is_empty());
    if env == Environment::Production && mapbox_access_token.is_none() {
        return Err(ConfigError::MissingEnvVar("MAPBOX_ACCESS_TOKEN".to_string()));
    }

    let bind_addr = parse_addr("CTAZ_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("CTAZ_LOG_LEVEL", "info");
    let business_path = PathBuf::from(or_default("CTAZ_BUSINESS_PATH", "./config/business.yaml"));
    let geocoder_base_url = or_default("CTAZ_GEOCODER_BASE_URL", "https://api.mapbox.com");
    let http_timeout_secs = parse_u64("CTAZ_HTTP_TIMEOUT_SECS", "10")?;
    let user_agent = or_default("CTAZ_USER_AGENT", "ctaz/0.1 (service-area-map)");
    let quote_base_url = or_default("CTAZ_QUOTE_BASE_URL", "http://localhost:3000");
    let rate_limit_max_requests = parse_usize("CTAZ_RATE_LIMIT_MAX_REQUESTS", "30")?;
    let rate_limit_window_secs = parse_u64("CTAZ_RATE_LIMIT_WINDOW_SECS", "60")?;

    if rate_limit_window_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "CTAZ_RATE_LIMIT_WINDOW_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        business_path,
        mapbox_access_token,
        geocoder_base_url,
        http_timeout_secs,
        user_agent,
        quote_base_url,
        rate_limit_max_requests,
        rate_limit_window_secs,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "CTAZ_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
