use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use jsonwebtoken::Algorithm;

use crate::error::{Error, Result};

/// Environment variable holding the session-token signing key.
pub const SECRET_KEY_ENV: &str = "SCRIVENER_SECRET_KEY";

/// Placeholder key shipped for local development. Any key containing the
/// marker is refused in production mode.
pub const DEFAULT_SECRET_KEY: &str = "INSECURE-dev-secret-change-me";

const INSECURE_KEY_MARKER: &str = "INSECURE";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl FromStr for Environment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            other => Err(Error::Config(format!(
                "unknown environment '{other}' (expected 'development' or 'production')"
            ))),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Directory holding the credential database.
    pub data_dir: PathBuf,
    /// Directory the Markdown posts live in (inside the site project).
    pub content_dir: PathBuf,
    /// Root of the static site project; rebuilds run here.
    pub site_dir: PathBuf,
    pub secret_key: String,
    pub algorithm: Algorithm,
    pub token_ttl_minutes: i64,
    pub environment: Environment,
    /// Explicit CORS allow-list. When unset, development mode falls back to
    /// allowing any localhost origin and production allows none.
    pub allowed_origins: Option<Vec<String>>,
}

impl AppConfig {
    pub fn socket_addr(&self) -> std::result::Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }

    #[must_use]
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("scrivener.db")
    }

    #[must_use]
    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.token_ttl_minutes)
    }

    /// Startup gate: a production deployment must not run with the
    /// placeholder signing key.
    pub fn validate(&self) -> Result<()> {
        if self.secret_key.is_empty() {
            return Err(Error::Config("signing key cannot be empty".into()));
        }
        if self.environment.is_production() && self.secret_key.contains(INSECURE_KEY_MARKER) {
            return Err(Error::Config(format!(
                "production deployment with the insecure default signing key; \
                 set {SECRET_KEY_ENV} to a strong random value"
            )));
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            data_dir: PathBuf::from("./data"),
            content_dir: PathBuf::from("./site/src/contents/posts"),
            site_dir: PathBuf::from("./site"),
            secret_key: DEFAULT_SECRET_KEY.to_string(),
            algorithm: Algorithm::HS256,
            token_ttl_minutes: 60 * 24,
            environment: Environment::Development,
            allowed_origins: None,
        }
    }
}

/// Parses a signing algorithm name like "HS256".
pub fn parse_algorithm(name: &str) -> Result<Algorithm> {
    Algorithm::from_str(name)
        .map_err(|_| Error::Config(format!("unknown signing algorithm '{name}'")))
}

/// Splits a comma-separated origin list, dropping empty entries.
#[must_use]
pub fn parse_allowed_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid_in_development() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_insecure_key_refused_in_production() {
        let config = AppConfig {
            environment: Environment::Production,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_strong_key_accepted_in_production() {
        let config = AppConfig {
            environment: Environment::Production,
            secret_key: "u6xX7mE2pQ9rT4vY8zB1nC3k".to_string(),
            ..AppConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_key_refused() {
        let config = AppConfig {
            secret_key: String::new(),
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_environment_from_str() {
        assert_eq!(
            "development".parse::<Environment>().unwrap(),
            Environment::Development
        );
        assert_eq!(
            "prod".parse::<Environment>().unwrap(),
            Environment::Production
        );
        assert!("staging".parse::<Environment>().is_err());
    }

    #[test]
    fn test_parse_allowed_origins() {
        let origins = parse_allowed_origins("https://blog.example.com, https://www.example.com,");
        assert_eq!(
            origins,
            vec!["https://blog.example.com", "https://www.example.com"]
        );
    }
}
