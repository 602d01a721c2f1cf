//! Configuration loader
//!
//! Loads [`ClientConfig`] from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If `IRKIT_API_URL` is unset, falls back to loading from file
//! 3. Probes a few paths for config files
//! 4. With no file either, uses [`ClientConfig::default`]
//!
//! ## Environment Variables
//! - `IRKIT_API_URL`: Base URL of the relay API (required for env loading)
//! - `IRKIT_HTTP_TIMEOUT_SECS`: Whole-request timeout in seconds
//! - `IRKIT_HTTP_CONNECT_TIMEOUT_SECS`: Connect timeout in seconds
//!
//! ## File Locations
//! 1. `./irkit.json` or `./irkit.toml` (current working directory)
//! 2. `./config.json` or `./config.toml` (current working directory)
//! 3. The same names next to the executable

use std::path::{Path, PathBuf};

use irkit_domain::constants::{DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS};
use irkit_domain::{ClientConfig, IrkitError, Result};

/// Base URL of the relay API.
pub const ENV_API_URL: &str = "IRKIT_API_URL";
/// Whole-request timeout in seconds.
pub const ENV_TIMEOUT_SECS: &str = "IRKIT_HTTP_TIMEOUT_SECS";
/// Connect timeout in seconds.
pub const ENV_CONNECT_TIMEOUT_SECS: &str = "IRKIT_HTTP_CONNECT_TIMEOUT_SECS";

const CONFIG_FILE_NAMES: [&str; 4] = ["irkit.json", "irkit.toml", "config.json", "config.toml"];

/// Load configuration with automatic fallback strategy
///
/// # Errors
/// Returns `IrkitError::Config` if an environment value or a discovered
/// config file is invalid.
pub fn load() -> Result<ClientConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            return Ok(config);
        }
        Err(e) => {
            tracing::debug!(error = %e, "Failed to load from environment, trying file");
        }
    }

    match probe_config_paths() {
        Some(path) => load_from_file(Some(path)),
        None => {
            tracing::info!("No configuration found, using defaults");
            Ok(ClientConfig::default())
        }
    }
}

/// Load configuration from environment variables
///
/// `IRKIT_API_URL` must be set; the timeouts fall back to their defaults.
///
/// # Errors
/// Returns `IrkitError::Config` if the URL is missing or a timeout is not a
/// positive integer.
pub fn load_from_env() -> Result<ClientConfig> {
    let base_url = env_var(ENV_API_URL)?;
    let timeout_secs = env_secs(ENV_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS)?;
    let connect_timeout_secs = env_secs(ENV_CONNECT_TIMEOUT_SECS, DEFAULT_CONNECT_TIMEOUT_SECS)?;

    Ok(ClientConfig { base_url, timeout_secs, connect_timeout_secs })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `IrkitError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<ClientConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(IrkitError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            IrkitError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| IrkitError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content, format chosen by extension
fn parse_config(contents: &str, path: &Path) -> Result<ClientConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    let config: ClientConfig = match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| IrkitError::Config(format!("Invalid TOML format: {}", e)))?,
        "json" => serde_json::from_str(contents)
            .map_err(|e| IrkitError::Config(format!("Invalid JSON format: {}", e)))?,
        _ => {
            return Err(IrkitError::Config(format!("Unsupported config format: {}", extension)))
        }
    };

    if config.base_url.is_empty() {
        return Err(IrkitError::Config("base_url must not be empty".to_string()));
    }

    Ok(config)
}

/// Probe the standard locations for a configuration file
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(CONFIG_FILE_NAMES.iter().map(|name| cwd.join(name)));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(CONFIG_FILE_NAMES.iter().map(|name| exe_dir.join(name)));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    match std::env::var(key) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(IrkitError::Config(format!("Missing required environment variable: {}", key))),
    }
}

/// Parse a positive number of seconds, or `default` when unset
fn env_secs(key: &str, default: u64) -> Result<u64> {
    let Ok(raw) = std::env::var(key) else {
        return Ok(default);
    };

    match raw.trim().parse::<u64>() {
        Ok(0) => Err(IrkitError::Config(format!("{} must be greater than zero", key))),
        Ok(secs) => Ok(secs),
        Err(e) => Err(IrkitError::Config(format!("Invalid {}: {}", key, e))),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use once_cell::sync::Lazy;

    use super::*;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    fn clear_env() {
        std::env::remove_var(ENV_API_URL);
        std::env::remove_var(ENV_TIMEOUT_SECS);
        std::env::remove_var(ENV_CONNECT_TIMEOUT_SECS);
    }

    #[test]
    fn test_load_from_env_all_vars_set() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");

        std::env::set_var(ENV_API_URL, "http://localhost:8080");
        std::env::set_var(ENV_TIMEOUT_SECS, "90");
        std::env::set_var(ENV_CONNECT_TIMEOUT_SECS, "3");

        let result = load_from_env();
        assert!(result.is_ok(), "Should load config from env vars, error: {:?}", result.err());

        let config = result.unwrap();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 90);
        assert_eq!(config.connect_timeout_secs, 3);

        clear_env();
    }

    #[test]
    fn test_load_from_env_uses_default_timeouts() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var(ENV_API_URL, "http://localhost:8080");

        let config = load_from_env().unwrap();
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.connect_timeout_secs, DEFAULT_CONNECT_TIMEOUT_SECS);

        clear_env();
    }

    #[test]
    fn test_load_from_env_missing_url() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        let err = load_from_env().unwrap_err();
        assert!(matches!(err, IrkitError::Config(_)), "Should be a Config error");
    }

    #[test]
    fn test_load_from_env_invalid_number() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");

        std::env::set_var(ENV_API_URL, "http://localhost:8080");
        std::env::set_var(ENV_TIMEOUT_SECS, "not-a-number");

        let err = load_from_env().unwrap_err();
        assert!(matches!(err, IrkitError::Config(_)), "Should be a Config error");

        clear_env();
    }

    #[test]
    fn test_load_from_env_rejects_zero_timeout() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");

        std::env::set_var(ENV_API_URL, "http://localhost:8080");
        std::env::set_var(ENV_CONNECT_TIMEOUT_SECS, "0");

        let err = load_from_env().unwrap_err();
        assert!(err.to_string().contains("greater than zero"));

        clear_env();
    }

    #[test]
    fn test_parse_config_rejects_unknown_extension() {
        let result = parse_config("base_url: x", Path::new("irkit.yaml"));
        assert!(matches!(result, Err(IrkitError::Config(msg)) if msg.contains("Unsupported")));
    }

    #[test]
    fn test_parse_config_rejects_empty_base_url() {
        let result = parse_config(r#"{"base_url": ""}"#, Path::new("irkit.json"));
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_config_toml_defaults() {
        let config = parse_config("timeout_secs = 120\n", Path::new("irkit.toml")).unwrap();
        assert_eq!(config.base_url, "https://api.getirkit.com");
        assert_eq!(config.timeout_secs, 120);
    }
}
