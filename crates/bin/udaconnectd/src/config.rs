//! Daemon settings: an optional `udaconnect.toml`, then `UDACONNECT_*`
//! environment variables on top.

use std::path::Path;

use serde::Deserialize;
use udaconnect_adapter_http_axum::error::ErrorPolicy;
use udaconnect_adapter_storage_sqlite_sqlx::pool::DEFAULT_MAX_CONNECTIONS;

/// File read from the working directory when present.
pub const CONFIG_FILE: &str = "udaconnect.toml";

/// Everything `main` needs to start serving.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub http: HttpConfig,
}

/// Listening socket.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Persons/locations database.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// sqlx `SQLite` URL.
    pub url: String,
    pub max_connections: u32,
}

/// `tracing-subscriber` filter.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directives, e.g. `udaconnectd=info,tower_http=debug`.
    pub filter: String,
}

/// API behavior.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// `typed` answers 400/404/500; `collapsed` answers every failure with 400.
    pub error_policy: ErrorPolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:udaconnect.db?mode=rwc".to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "udaconnectd=info,udaconnect=info,tower_http=debug".to_string(),
        }
    }
}

/// Why the settings could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read udaconnect.toml")]
    Io(#[from] std::io::Error),
    #[error("cannot parse udaconnect.toml")]
    Parse(#[from] toml::de::Error),
    #[error("{name}={value:?} is not valid: {reason}")]
    Env {
        name: &'static str,
        value: String,
        reason: String,
    },
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
    #[error("invalid logging.filter")]
    Filter(#[from] tracing_subscriber::filter::ParseError),
}

/// Where environment overrides are read from; a closure in tests.
type Lookup<'a> = &'a dyn Fn(&str) -> Option<String>;

impl Config {
    /// Read [`CONFIG_FILE`], apply the process environment, and validate.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for an unreadable or malformed file, an
    /// unparseable environment value, or an invalid result.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file(CONFIG_FILE)?;
        config.apply_env(&|name: &str| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(toml::from_str(&content)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(err.into()),
        }
    }

    fn apply_env(&mut self, lookup: Lookup<'_>) -> Result<(), ConfigError> {
        if let Some(bind) = lookup("UDACONNECT_BIND") {
            let Some((host, port)) = bind.rsplit_once(':') else {
                return Err(env_error("UDACONNECT_BIND", &bind, "expected host:port"));
            };
            self.server.host = host.to_string();
            self.server.port = parse_env("UDACONNECT_BIND", port)?;
        }
        if let Some(host) = lookup("UDACONNECT_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("UDACONNECT_PORT") {
            self.server.port = parse_env("UDACONNECT_PORT", &port)?;
        }
        if let Some(url) = lookup("UDACONNECT_DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(size) = lookup("UDACONNECT_DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = parse_env("UDACONNECT_DATABASE_MAX_CONNECTIONS", &size)?;
        }
        // RUST_LOG wins over the UdaConnect-specific variable
        if let Some(filter) = lookup("RUST_LOG").or_else(|| lookup("UDACONNECT_LOG")) {
            self.logging.filter = filter;
        }
        if let Some(policy) = lookup("UDACONNECT_ERROR_POLICY") {
            self.http.error_policy = parse_env("UDACONNECT_ERROR_POLICY", &policy)?;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Invalid("server.port must be non-zero"));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid("database.max_connections must be non-zero"));
        }
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::Invalid("database.url must not be empty"));
        }
        tracing_subscriber::EnvFilter::try_new(&self.logging.filter)?;
        Ok(())
    }

    /// `host:port` to bind the listener to.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn env_error(name: &'static str, value: &str, reason: impl ToString) -> ConfigError {
    ConfigError::Env {
        name,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_env<T>(name: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|err| env_error(name, value, err))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn with_env(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        let mut config = Config::default();
        config.apply_env(&|name: &str| vars.get(name).cloned())?;
        config.validate()?;
        Ok(config)
    }

    #[test]
    fn should_listen_on_port_5000_by_default() {
        let config = Config::default();
        assert_eq!(config.bind_addr(), "0.0.0.0:5000");
        assert_eq!(config.database.url, "sqlite:udaconnect.db?mode=rwc");
        assert_eq!(config.database.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(config.http.error_policy, ErrorPolicy::Typed);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_fill_missing_sections_with_defaults() {
        let config: Config = toml::from_str("[server]\nport = 8080").unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.database.url, "sqlite:udaconnect.db?mode=rwc");
        assert_eq!(config.http.error_policy, ErrorPolicy::Typed);
    }

    #[test]
    fn should_read_every_section_from_toml() {
        let config: Config = toml::from_str(
            "
            [server]
            host = '127.0.0.1'
            port = 9090

            [database]
            url = 'sqlite:test.db'
            max_connections = 2

            [logging]
            filter = 'debug'

            [http]
            error_policy = 'collapsed'
            ",
        )
        .unwrap();

        assert_eq!(config.bind_addr(), "127.0.0.1:9090");
        assert_eq!(config.database.url, "sqlite:test.db");
        assert_eq!(config.database.max_connections, 2);
        assert_eq!(config.logging.filter, "debug");
        assert_eq!(config.http.error_policy, ErrorPolicy::Collapsed);
    }

    #[test]
    fn should_reject_unknown_error_policy_in_toml() {
        assert!(toml::from_str::<Config>("[http]\nerror_policy = 'lenient'").is_err());
    }

    #[test]
    fn should_reject_malformed_toml() {
        assert!(toml::from_str::<Config>("invalid {{{").is_err());
    }

    #[test]
    fn should_fall_back_to_defaults_without_a_file() {
        let config = Config::from_file("definitely-missing-udaconnect.toml").unwrap();
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn should_override_from_environment() {
        let config = with_env(&[
            ("UDACONNECT_BIND", "127.0.0.1:7000"),
            ("UDACONNECT_DATABASE_URL", "sqlite::memory:"),
            ("UDACONNECT_DATABASE_MAX_CONNECTIONS", "3"),
            ("UDACONNECT_ERROR_POLICY", "collapsed"),
            ("UDACONNECT_LOG", "warn"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr(), "127.0.0.1:7000");
        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.database.max_connections, 3);
        assert_eq!(config.http.error_policy, ErrorPolicy::Collapsed);
        assert_eq!(config.logging.filter, "warn");
    }

    #[test]
    fn should_let_host_and_port_refine_bind() {
        let config = with_env(&[
            ("UDACONNECT_BIND", "127.0.0.1:7000"),
            ("UDACONNECT_PORT", "7001"),
        ])
        .unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:7001");
    }

    #[test]
    fn should_prefer_rust_log_over_udaconnect_log() {
        let config = with_env(&[("UDACONNECT_LOG", "warn"), ("RUST_LOG", "trace")]).unwrap();
        assert_eq!(config.logging.filter, "trace");
    }

    #[test]
    fn should_name_the_variable_when_env_value_is_invalid() {
        let err = with_env(&[("UDACONNECT_PORT", "http")]).unwrap_err();
        assert!(err.to_string().starts_with("UDACONNECT_PORT=\"http\""));

        let err = with_env(&[("UDACONNECT_ERROR_POLICY", "lenient")]).unwrap_err();
        assert!(err.to_string().contains("expected 'typed' or 'collapsed'"));

        assert!(with_env(&[("UDACONNECT_BIND", "no-port")]).is_err());
    }

    #[test]
    fn should_reject_zero_port_and_empty_pool() {
        assert!(with_env(&[("UDACONNECT_PORT", "0")]).is_err());
        assert!(with_env(&[("UDACONNECT_DATABASE_MAX_CONNECTIONS", "0")]).is_err());
    }

    #[test]
    fn should_reject_unparseable_log_filter() {
        let err = with_env(&[("UDACONNECT_LOG", "udaconnectd=notalevel")]).unwrap_err();
        assert!(matches!(err, ConfigError::Filter(_)));

        assert!(with_env(&[("RUST_LOG", "udaconnectd=debug,tower_http=warn")]).is_ok());
    }

    #[test]
    fn should_reject_blank_database_url() {
        let mut config = Config::default();
        config.database.url = "  ".to_string();
        assert!(config.validate().is_err());
    }
}
