//! Process configuration from environment variables (`.env` honoured by the binary).

use crate::error::ConfigError;
use std::net::SocketAddr;
use std::str::FromStr;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://app.db";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5555";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_BODY_LIMIT: usize = 64 * 1024;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// `DATABASE_URL`. SQLite file is created when missing.
    pub database_url: String,
    /// `BIND_ADDR`.
    pub bind_addr: SocketAddr,
    /// `DB_MAX_CONNECTIONS`.
    pub max_connections: u32,
    /// `BODY_LIMIT_BYTES`.
    pub body_limit: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from any variable source; unset variables fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.into());
        let bind_addr = parse_var(&lookup, "BIND_ADDR", DEFAULT_BIND_ADDR)?;
        let max_connections: u32 = parse_var(&lookup, "DB_MAX_CONNECTIONS", &DEFAULT_MAX_CONNECTIONS.to_string())?;
        if max_connections == 0 {
            return Err(ConfigError::Invalid {
                var: "DB_MAX_CONNECTIONS",
                value: "0".into(),
            });
        }
        let body_limit = parse_var(&lookup, "BODY_LIMIT_BYTES", &DEFAULT_BODY_LIMIT.to_string())?;
        Ok(AppConfig {
            database_url,
            bind_addr,
            max_connections,
            body_limit,
        })
    }
}

fn parse_var<F, T>(lookup: &F, var: &'static str, default: &str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let raw = lookup(var).unwrap_or_else(|| default.to_string());
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { var, value: raw.clone() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AppConfig::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.database_url, "sqlite://app.db");
        assert_eq!(config.bind_addr.port(), 5555);
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.body_limit, 65536);
    }

    #[test]
    fn overrides_are_parsed() {
        let config = config_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("BIND_ADDR", "0.0.0.0:8080"),
            ("DB_MAX_CONNECTIONS", "2"),
        ])
        .unwrap();
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.bind_addr.to_string(), "0.0.0.0:8080");
        assert_eq!(config.max_connections, 2);
    }

    #[test]
    fn invalid_values_are_reported() {
        let err = config_from(&[("BIND_ADDR", "nowhere")]).unwrap_err();
        assert_eq!(err.to_string(), "invalid value for BIND_ADDR: 'nowhere'");
        assert!(config_from(&[("DB_MAX_CONNECTIONS", "0")]).is_err());
    }
}
