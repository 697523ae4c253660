use std::path::PathBuf;

use crate::app_config::{AppConfig, DEFAULT_BASE_URL, DEFAULT_IG_APP_ID, DEFAULT_USER_AGENT};
use crate::profile::Credentials;
use crate::ConfigError;

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
    build_app_config(|key| std::env::var(key), default_session_dir())
}

/// `<platform config dir>/igscan`, falling back to `./.igscan` when the
/// platform has no config directory.
fn default_session_dir() -> PathBuf {
    dirs::config_dir().map_or_else(|| PathBuf::from(".igscan"), |dir| dir.join("igscan"))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F, default_session_dir: PathBuf) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let optional = |var: &str| -> Option<String> { lookup(var).ok().filter(|v| !v.is_empty()) };

    let or_default =
        |var: &str, default: &str| -> String { optional(var).unwrap_or_else(|| default.to_string()) };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let login_username = optional("IG_USERNAME").map(|u| u.trim().to_owned());
    let credentials = match (login_username.as_deref(), optional("IG_PASSWORD")) {
        (Some(user), Some(pass)) => Credentials::new(user, &pass),
        _ => None,
    };
    let session_blob = optional("IG_SESSION");

    let session_dir = optional("IGSCAN_SESSION_DIR").map_or(default_session_dir, PathBuf::from);
    let base_url = or_default("IGSCAN_BASE_URL", DEFAULT_BASE_URL);
    let user_agent = or_default("IGSCAN_USER_AGENT", DEFAULT_USER_AGENT);
    let ig_app_id = or_default("IGSCAN_APP_ID", DEFAULT_IG_APP_ID);
    let log_level = or_default("IGSCAN_LOG_LEVEL", "info");

    let request_timeout_secs = parse_u64("IGSCAN_REQUEST_TIMEOUT_SECS", "30")?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "IGSCAN_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    Ok(AppConfig {
        credentials,
        login_username,
        session_blob,
        session_dir,
        base_url,
        user_agent,
        ig_app_id,
        request_timeout_secs,
        log_level,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
