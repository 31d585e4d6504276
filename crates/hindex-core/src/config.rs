use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::ConfigError;

/// Process-level configuration shared by the CLI and the server.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Directory the JSON artifacts are written to and served from.
    pub data_dir: PathBuf,
    /// Directory of static files served at `/web`.
    pub web_dir: PathBuf,
    pub settings_path: PathBuf,
    pub sources_path: PathBuf,
    pub gdelt_timeout_secs: u64,
    pub gdelt_max_retries: u32,
    pub gdelt_backoff_base_ms: u64,
    pub gdelt_user_agent: String,
}

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process, without touching `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup.
///
/// The parsing/validation logic is decoupled from the real environment so
/// tests can drive it with a plain `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
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

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
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

    let bind_addr = parse_addr("HINDEX_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("HINDEX_LOG_LEVEL", "info");
    let data_dir = PathBuf::from(or_default("HINDEX_DATA_DIR", "./data"));
    let web_dir = PathBuf::from(or_default("HINDEX_WEB_DIR", "./web"));
    let settings_path = PathBuf::from(or_default(
        "HINDEX_SETTINGS_PATH",
        "./config/settings.yaml",
    ));
    let sources_path = PathBuf::from(or_default("HINDEX_SOURCES_PATH", "./config/sources.yaml"));

    let gdelt_timeout_secs = parse_u64("HINDEX_GDELT_TIMEOUT_SECS", "30")?;
    let gdelt_max_retries = parse_u32("HINDEX_GDELT_MAX_RETRIES", "3")?;
    let gdelt_backoff_base_ms = parse_u64("HINDEX_GDELT_BACKOFF_BASE_MS", "1000")?;
    let gdelt_user_agent = or_default("HINDEX_GDELT_USER_AGENT", "hindex/0.1 (humanity-index)");

    Ok(AppConfig {
        bind_addr,
        log_level,
        data_dir,
        web_dir,
        settings_path,
        sources_path,
        gdelt_timeout_secs,
        gdelt_max_retries,
        gdelt_backoff_base_ms,
        gdelt_user_agent,
    })
}
