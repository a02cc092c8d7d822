//! Configuration management for the gym admin toolkit

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Prefix for environment overrides, e.g. `GYMADMIN_API__BASE_URL`
pub const ENV_PREFIX: &str = "GYMADMIN";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backend API configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Local session configuration
    #[serde(default)]
    pub auth: AuthConfig,

    /// List view defaults
    #[serde(default)]
    pub listing: ListingConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the REST backend
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Use the in-memory mock client instead of HTTP
    #[serde(default)]
    pub use_mock: bool,

    /// Artificial latency of the mock client in milliseconds
    #[serde(default = "default_mock_delay_ms")]
    pub mock_delay_ms: u64,

    /// Directory of JSON fixtures used to seed the mock client
    #[serde(default)]
    pub mock_data_dir: Option<PathBuf>,
}

/// Local session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// JSON file listing the accounts that may log in
    #[serde(default = "default_fixture_path")]
    pub fixture_path: PathBuf,

    /// File backing the session store
    #[serde(default = "default_session_path")]
    pub session_path: PathBuf,
}

/// List view defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingConfig {
    /// Items per page when the caller does not say
    #[serde(default = "default_per_page")]
    pub default_per_page: usize,

    /// Products with fewer units than this count as low stock
    #[serde(default = "default_low_stock_threshold")]
    pub low_stock_threshold: u32,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (json or pretty)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

const fn default_mock_delay_ms() -> u64 {
    500
}

fn default_fixture_path() -> PathBuf {
    PathBuf::from("fixtures/users.json")
}

fn default_session_path() -> PathBuf {
    PathBuf::from(".gym-admin/session.json")
}

const fn default_per_page() -> usize {
    10
}

const fn default_low_stock_threshold() -> u32 {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            use_mock: false,
            mock_delay_ms: default_mock_delay_ms(),
            mock_data_dir: None,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            fixture_path: default_fixture_path(),
            session_path: default_session_path(),
        }
    }
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            default_per_page: default_per_page(),
            low_stock_threshold: default_low_stock_threshold(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from an optional file and `GYMADMIN_*` environment variables
    ///
    /// Without an explicit path, `gym-admin.toml` in the working directory is
    /// read if it exists. Nested keys use a double underscore in the
    /// environment, e.g. `GYMADMIN_API__USE_MOCK=true`.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or parsed.
    pub fn load(path: Option<&Path>) -> crate::Result<Self> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("gym-admin").required(false),
        };

        let config = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let loaded: Self = config.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Reject settings the rest of the toolkit cannot work with
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Configuration`] naming the offending key.
    pub fn validate(&self) -> crate::Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(crate::Error::Configuration {
                message: "api.base_url must not be empty".to_string(),
            });
        }
        if self.api.timeout_secs == 0 {
            return Err(crate::Error::Configuration {
                message: "api.timeout_secs must be positive".to_string(),
            });
        }
        if self.listing.default_per_page == 0 {
            return Err(crate::Error::Configuration {
                message: "listing.default_per_page must be positive".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_default() {
        let config = Config::default();

        assert_eq!(config.api.base_url, "http://localhost:5000/api");
        assert_eq!(config.api.timeout_secs, 30);
        assert!(!config.api.use_mock);
        assert_eq!(config.api.mock_delay_ms, 500);
        assert!(config.api.mock_data_dir.is_none());

        assert_eq!(config.auth.fixture_path, PathBuf::from("fixtures/users.json"));
        assert_eq!(config.listing.default_per_page, 10);
        assert_eq!(config.listing.low_stock_threshold, 5);

        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "pretty");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_config_deserialization() {
        let json_str = r#"{
            "api": {"base_url": "https://gym.example.com/api", "use_mock": true},
            "listing": {}
        }"#;

        let config: Config = serde_json::from_str(json_str).unwrap();

        assert_eq!(config.api.base_url, "https://gym.example.com/api");
        assert!(config.api.use_mock);
        assert_eq!(config.api.timeout_secs, 30); // Uses default
        assert_eq!(config.listing.default_per_page, 10);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[api]\nbase_url = \"http://backend:8080\"\nmock_delay_ms = 0\n\n[listing]\ndefault_per_page = 12"
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();

        assert_eq!(config.api.base_url, "http://backend:8080");
        assert_eq!(config.api.mock_delay_ms, 0);
        assert_eq!(config.listing.default_per_page, 12);
        assert_eq!(config.listing.low_stock_threshold, 5);
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let result = Config::load(Some(Path::new("/nonexistent/gym-admin.toml")));
        assert!(matches!(result, Err(crate::Error::Configuration { .. })));
    }

    #[test]
    fn test_validate_rejects_zero_page_size() {
        let mut config = Config::default();
        config.listing.default_per_page = 0;

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("default_per_page"));
    }

    #[test]
    fn test_validate_rejects_blank_base_url() {
        let mut config = Config::default();
        config.api.base_url = "  ".to_string();

        assert!(config.validate().is_err());
    }
}
