//! Environment-driven configuration loading.

use thiserror::Error;

use crate::app_config::AppConfig;

/// Default Apify actor id for the TikTok scraper. Safe to ship; overridable
/// via `TIKTOK_ACTOR_ID`.
const DEFAULT_TIKTOK_ACTOR_ID: &str = "GdWCkxBtKWOsKjdch";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

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

/// Load application configuration from environment variables already in the
/// process, without touching `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// The core parsing/validation logic, decoupled from the actual environment
/// so tests can drive it with a plain `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

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

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<f64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    Ok(AppConfig {
        lark_app_id: require("LARK_APP_ID")?,
        lark_app_secret: require("LARK_APP_SECRET")?,
        lark_base_id: require("LARK_BASE_ID")?,
        apify_token: require("APIFY_TOKEN")?,
        tiktok_actor_id: or_default("TIKTOK_ACTOR_ID", DEFAULT_TIKTOK_ACTOR_ID),
        gemini_api_key: require("GEMINI_API_KEY")?,
        gemini_model: or_default("GEMINI_MODEL", "gemini-2.5-flash"),
        scrape_timeout_secs: parse_u64("SCRAPE_TIMEOUT_SECS", "600")?,
        media_timeout_secs: parse_u64("MEDIA_TIMEOUT_SECS", "30")?,
        analysis_min_engagement_rate: parse_f64("ANALYSIS_MIN_ENGAGEMENT_RATE", "5.0")?,
        analysis_min_views: parse_u64("ANALYSIS_MIN_VIEWS", "10000")?,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
