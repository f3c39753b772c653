use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if any env var holds an invalid value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files; useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if any env var holds an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup, no `set_var`/`remove_var` needed.
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

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
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

    let env = parse_environment(&or_default("SHELFSCAN_ENV", "development"));

    let bind_addr = parse_addr("SHELFSCAN_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("SHELFSCAN_LOG_LEVEL", "info");
    let catalog_path = PathBuf::from(or_default(
        "SHELFSCAN_CATALOG_PATH",
        "./config/catalog.yaml",
    ));

    let confidence_threshold = parse_f64("SHELFSCAN_CONFIDENCE_THRESHOLD", "0.6")?;
    if !(0.0..=1.0).contains(&confidence_threshold) {
        return Err(ConfigError::InvalidEnvVar {
            var: "SHELFSCAN_CONFIDENCE_THRESHOLD".to_string(),
            reason: format!("{confidence_threshold} is outside [0, 1]"),
        });
    }

    let max_suggestions = parse_usize("SHELFSCAN_MAX_SUGGESTIONS", "5")?;
    let suggest_limit = parse_usize("SHELFSCAN_SUGGEST_LIMIT", "10")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        catalog_path,
        confidence_threshold,
        max_suggestions,
        suggest_limit,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}
