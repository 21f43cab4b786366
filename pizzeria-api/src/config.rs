use std::env;
use std::net::{AddrParseError, SocketAddr};

pub const DEFAULT_DATABASE_URL: &str = "app.db";
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:5555";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid LISTEN_ADDR {value:?}: {source}")]
    InvalidListenAddr {
        value: String,
        source: AddrParseError,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: SocketAddr,
}

impl Config {
    /// Reads `DATABASE_URL` (or `DB_URI`) and `LISTEN_ADDR`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL")
            .or_else(|| lookup("DB_URI"))
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        let listen = lookup("LISTEN_ADDR").unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
        let listen_addr = listen
            .parse()
            .map_err(|source| ConfigError::InvalidListenAddr {
                value: listen.clone(),
                source,
            })?;

        Ok(Self {
            database_url,
            listen_addr,
        })
    }

    pub fn with_overrides(
        mut self,
        database_url: Option<String>,
        listen_addr: Option<SocketAddr>,
    ) -> Self {
        if let Some(database_url) = database_url {
            self.database_url = database_url;
        }
        if let Some(listen_addr) = listen_addr {
            self.listen_addr = listen_addr;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.database_url, "app.db");
        assert_eq!(config.listen_addr, "0.0.0.0:5555".parse().unwrap());
    }

    #[test]
    fn test_database_url_precedence() {
        let config = Config::from_lookup(lookup(&[("DB_URI", "legacy.db")])).unwrap();
        assert_eq!(config.database_url, "legacy.db");

        let config = Config::from_lookup(lookup(&[
            ("DB_URI", "legacy.db"),
            ("DATABASE_URL", "pizzeria.db"),
        ]))
        .unwrap();
        assert_eq!(config.database_url, "pizzeria.db");
    }

    #[test]
    fn test_invalid_listen_addr() {
        let err = Config::from_lookup(lookup(&[("LISTEN_ADDR", "localhost")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidListenAddr { value, .. } if value == "localhost"));
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[]))
            .unwrap()
            .with_overrides(Some(":memory:".to_string()), Some("127.0.0.1:8080".parse().unwrap()));
        assert_eq!(config.database_url, ":memory:");
        assert_eq!(config.listen_addr.port(), 8080);
    }
}
