//! Application configuration loaded from environment variables.

use std::path::PathBuf;
use std::time::Duration;

use client::ClientConfig;

use crate::args::Cli;

/// Default location of the local state file.
pub const DEFAULT_STATE_FILE: &str = ".pizzaria/state.json";

/// CLI configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `PIZZARIA_API_URL`: backend base URL (default: `"http://127.0.0.1:5000"`)
/// - `PIZZARIA_TIMEOUT_SECS`: per-request timeout (default: `10`)
/// - `PIZZARIA_STATE_FILE`: local state file (default: `".pizzaria/state.json"`)
/// - `RUST_LOG`: tracing filter directive (default: `"warn"`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub timeout: Duration,
    pub state_file: PathBuf,
    pub log_level: String,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_url: std::env::var("PIZZARIA_API_URL").unwrap_or(defaults.api_url),
            timeout: std::env::var("PIZZARIA_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            state_file: std::env::var_os("PIZZARIA_STATE_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.state_file),
            log_level: std::env::var("RUST_LOG").unwrap_or(defaults.log_level),
        }
    }

    /// Applies command-line overrides on top of this configuration.
    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        if let Some(url) = &cli.api_url {
            self.api_url = url.clone();
        }
        if let Some(secs) = cli.timeout_secs
            && secs > 0
        {
            self.timeout = Duration::from_secs(secs);
        }
        if let Some(path) = &cli.state_file {
            self.state_file = path.clone();
        }
        self
    }

    /// Returns the HTTP client settings.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.api_url.clone()).with_timeout(self.timeout)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: client::config::DEFAULT_BASE_URL.to_string(),
            timeout: client::config::DEFAULT_TIMEOUT,
            state_file: PathBuf::from(DEFAULT_STATE_FILE),
            log_level: "warn".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use serial_test::serial;

    use super::*;

    const VARS: [&str; 4] = [
        "PIZZARIA_API_URL",
        "PIZZARIA_TIMEOUT_SECS",
        "PIZZARIA_STATE_FILE",
        "RUST_LOG",
    ];

    fn clear_env() {
        for var in VARS {
            // SAFETY: tests touching the environment run serially.
            unsafe { std::env::remove_var(var) };
        }
    }

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.api_url, "http://127.0.0.1:5000");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.state_file, PathBuf::from(".pizzaria/state.json"));
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    #[serial]
    fn test_from_env_without_vars_uses_defaults() {
        clear_env();
        assert_eq!(Config::from_env(), Config::default());
    }

    #[test]
    #[serial]
    fn test_from_env_reads_vars() {
        clear_env();
        // SAFETY: tests touching the environment run serially.
        unsafe {
            std::env::set_var("PIZZARIA_API_URL", "http://pizza.local:8080");
            std::env::set_var("PIZZARIA_TIMEOUT_SECS", "3");
            std::env::set_var("PIZZARIA_STATE_FILE", "/tmp/pizza.json");
        }

        let config = Config::from_env();
        clear_env();

        assert_eq!(config.api_url, "http://pizza.local:8080");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.state_file, PathBuf::from("/tmp/pizza.json"));
    }

    #[test]
    #[serial]
    fn test_invalid_timeout_falls_back() {
        clear_env();
        // SAFETY: tests touching the environment run serially.
        unsafe { std::env::set_var("PIZZARIA_TIMEOUT_SECS", "soon") };
        let config = Config::from_env();
        clear_env();

        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_flags_override_env() {
        let cli = Cli::parse_from([
            "pizzaria",
            "--api-url",
            "http://other:5000",
            "--timeout-secs",
            "2",
            "menu",
        ]);
        let config = Config::default().with_overrides(&cli);

        assert_eq!(config.api_url, "http://other:5000");
        assert_eq!(config.timeout, Duration::from_secs(2));
        assert_eq!(config.state_file, PathBuf::from(DEFAULT_STATE_FILE));
        assert_eq!(config.client_config().timeout, Duration::from_secs(2));
    }
}
