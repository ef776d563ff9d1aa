//! Application configuration management.
//!
//! All configuration is environment-supplied: connection string, database
//! name, bind address, CORS origins, and logging settings. Every value has
//! a documented local-development default, so the server starts with no
//! environment at all against `mongodb://localhost:27017/portfolio_db`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{FolioError, FolioResult};

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub http: HttpConfig,

    /// Document store settings.
    #[serde(default)]
    pub store: StoreConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Whether to insert fixture data into empty collections at startup.
    #[serde(default = "default_true")]
    pub seed_on_startup: bool,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Interface to bind (e.g. "127.0.0.1" or "0.0.0.0").
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origins. A single "*" entry allows any origin.
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

/// Document store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// MongoDB connection string.
    #[serde(default = "default_mongo_url")]
    pub uri: String,

    /// Database name holding the three collections.
    #[serde(default = "default_db_name")]
    pub database: String,

    /// Connection/server-selection timeout in milliseconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_ms: u64,

    /// Per-operation time bound in milliseconds. Every repository round
    /// trip runs under this limit.
    #[serde(default = "default_op_timeout")]
    pub op_timeout_ms: u64,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for log files. If empty, uses "./logs".
    #[serde(default)]
    pub directory: String,

    /// Enable JSON structured logging output for the file layer.
    #[serde(default)]
    pub json_output: bool,
}

// Default value functions for serde

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_mongo_url() -> String {
    "mongodb://localhost:27017".to_string()
}

fn default_db_name() -> String {
    "portfolio_db".to_string()
}

fn default_connect_timeout() -> u64 {
    5_000
}

fn default_op_timeout() -> u64 {
    10_000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            http: HttpConfig::default(),
            store: StoreConfig::default(),
            logging: LoggingConfig::default(),
            seed_on_startup: true,
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            uri: default_mongo_url(),
            database: default_db_name(),
            connect_timeout_ms: default_connect_timeout(),
            op_timeout_ms: default_op_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: String::new(),
            json_output: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from process environment variables.
    pub fn from_env() -> FolioResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// The lookup indirection keeps parsing testable without mutating the
    /// process environment. Recognized variables: `MONGO_URL`, `DB_NAME`,
    /// `FOLIO_HOST`, `FOLIO_PORT`, `CORS_ORIGINS` (comma-separated),
    /// `LOG_LEVEL`, `LOG_DIR`, `LOG_JSON`, `STORE_CONNECT_TIMEOUT_MS`,
    /// `STORE_OP_TIMEOUT_MS`, `SEED_ON_STARTUP`.
    pub fn from_lookup<F>(lookup: F) -> FolioResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = AppConfig::default();

        if let Some(uri) = lookup("MONGO_URL") {
            config.store.uri = uri;
        }
        if let Some(name) = lookup("DB_NAME") {
            config.store.database = name;
        }
        if let Some(host) = lookup("FOLIO_HOST") {
            config.http.host = host;
        }
        if let Some(port) = lookup("FOLIO_PORT") {
            config.http.port = parse_var("FOLIO_PORT", &port)?;
        }
        if let Some(origins) = lookup("CORS_ORIGINS") {
            config.http.cors_origins = origins
                .split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect();
        }
        if let Some(level) = lookup("LOG_LEVEL") {
            config.logging.level = level;
        }
        if let Some(dir) = lookup("LOG_DIR") {
            config.logging.directory = dir;
        }
        if let Some(json) = lookup("LOG_JSON") {
            config.logging.json_output = parse_bool("LOG_JSON", &json)?;
        }
        if let Some(ms) = lookup("STORE_CONNECT_TIMEOUT_MS") {
            config.store.connect_timeout_ms = parse_var("STORE_CONNECT_TIMEOUT_MS", &ms)?;
        }
        if let Some(ms) = lookup("STORE_OP_TIMEOUT_MS") {
            config.store.op_timeout_ms = parse_var("STORE_OP_TIMEOUT_MS", &ms)?;
        }
        if let Some(seed) = lookup("SEED_ON_STARTUP") {
            config.seed_on_startup = parse_bool("SEED_ON_STARTUP", &seed)?;
        }

        Ok(config)
    }

    /// The socket address string to bind the HTTP listener on.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.http.host, self.http.port)
    }

    /// Get the effective log directory, using the configured path or "./logs".
    pub fn effective_log_dir(&self) -> PathBuf {
        if self.logging.directory.is_empty() {
            PathBuf::from("logs")
        } else {
            PathBuf::from(&self.logging.directory)
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, raw: &str) -> FolioResult<T> {
    raw.trim()
        .parse()
        .map_err(|_| FolioError::Config(format!("invalid value for {name}: {raw:?}")))
}

fn parse_bool(name: &str, raw: &str) -> FolioResult<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(FolioError::Config(format!(
            "invalid value for {name}: {raw:?} (expected true/false)"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.store.uri, "mongodb://localhost:27017");
        assert_eq!(config.store.database, "portfolio_db");
        assert_eq!(config.bind_addr(), "127.0.0.1:8000");
        assert_eq!(config.http.cors_origins, vec!["*"]);
        assert!(config.seed_on_startup);
    }

    #[test]
    fn test_empty_environment_falls_back_to_defaults() {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.store.uri, AppConfig::default().store.uri);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_environment_overrides() {
        let lookup = lookup_from(&[
            ("MONGO_URL", "mongodb://db.internal:27017"),
            ("DB_NAME", "portfolio_prod"),
            ("FOLIO_PORT", "9000"),
            ("CORS_ORIGINS", "https://a.example, https://b.example"),
            ("LOG_JSON", "true"),
            ("STORE_OP_TIMEOUT_MS", "2500"),
        ]);
        let config = AppConfig::from_lookup(lookup).unwrap();
        assert_eq!(config.store.uri, "mongodb://db.internal:27017");
        assert_eq!(config.store.database, "portfolio_prod");
        assert_eq!(config.http.port, 9000);
        assert_eq!(
            config.http.cors_origins,
            vec!["https://a.example", "https://b.example"]
        );
        assert!(config.logging.json_output);
        assert_eq!(config.store.op_timeout_ms, 2500);
    }

    #[test]
    fn test_invalid_port_is_a_config_error() {
        let lookup = lookup_from(&[("FOLIO_PORT", "not-a-port")]);
        let err = AppConfig::from_lookup(lookup).unwrap_err();
        assert!(matches!(err, FolioError::Config(_)));
    }

    #[test]
    fn test_invalid_bool_is_a_config_error() {
        let lookup = lookup_from(&[("SEED_ON_STARTUP", "maybe")]);
        assert!(AppConfig::from_lookup(lookup).is_err());
    }

    #[test]
    fn test_effective_log_dir() {
        let mut config = AppConfig::default();
        assert_eq!(config.effective_log_dir(), PathBuf::from("logs"));
        config.logging.directory = "/var/log/folio".to_string();
        assert_eq!(config.effective_log_dir(), PathBuf::from("/var/log/folio"));
    }
}
