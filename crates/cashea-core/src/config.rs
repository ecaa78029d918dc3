use std::path::PathBuf;

use crate::app_config::{AppConfig, BankSmoothingConfig};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to a value that cannot be parsed.
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
/// Returns `ConfigError` if a variable is set to a value that cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable is optional. Source directories default to the
/// `SAMPLE_*` folders under `CASHEA_DATA_DIR`, and the index files are
/// written next to them unless `CASHEA_OUTPUT_DIR` says otherwise.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let dir_or = |var: &str, default: PathBuf| -> PathBuf {
        lookup(var).map_or(default, PathBuf::from)
    };

    let parse_bool = |var: &str, default: bool| -> Result<bool, ConfigError> {
        match lookup(var) {
            Err(_) => Ok(default),
            Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(true),
                "0" | "false" | "no" | "off" => Ok(false),
                other => Err(ConfigError::InvalidEnvVar {
                    var: var.to_string(),
                    reason: format!("expected a boolean, got '{other}'"),
                }),
            },
        }
    };

    let parse_probability = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let raw = or_default(var, default);
        let value = raw
            .trim()
            .parse::<f64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })?;
        if !(0.0..=1.0).contains(&value) {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("{value} is outside [0, 1]"),
            });
        }
        Ok(value)
    };

    let parse_seed = |var: &str| -> Result<Option<u64>, ConfigError> {
        lookup(var)
            .ok()
            .map(|raw| {
                raw.trim()
                    .parse::<u64>()
                    .map_err(|e| ConfigError::InvalidEnvVar {
                        var: var.to_string(),
                        reason: e.to_string(),
                    })
            })
            .transpose()
    };

    let data_dir = PathBuf::from(or_default("CASHEA_DATA_DIR", "./public"));
    let merchants_dir = dir_or("CASHEA_MERCHANTS_DIR", data_dir.join("SAMPLE_MERCHANTS"));
    let stores_dir = dir_or("CASHEA_STORES_DIR", data_dir.join("SAMPLE_STORE"));
    let clients_dir = dir_or("CASHEA_CLIENTS_DIR", data_dir.join("SAMPLE_CLIENT"));
    let output_dir = dir_or("CASHEA_OUTPUT_DIR", data_dir.clone());
    let log_level = or_default("CASHEA_LOG_LEVEL", "info");

    let bank_smoothing = BankSmoothingConfig {
        enabled: parse_bool("CASHEA_BANK_SMOOTHING", true)?,
        probability: parse_probability("CASHEA_BANK_SMOOTHING_PROBABILITY", "0.6")?,
        seed: parse_seed("CASHEA_SEED")?,
    };

    Ok(AppConfig {
        data_dir,
        merchants_dir,
        stores_dir,
        clients_dir,
        output_dir,
        log_level,
        bank_smoothing,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
