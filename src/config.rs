use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

/// Application-level constants
pub const APP_NAME: &str = "Citamed";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DATABASE_PATH: &str = "citamed.db";
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

pub fn default_log_filter() -> &'static str {
    "info"
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("TOKEN_SECRET must be set (it signs session tokens)")]
    MissingTokenSecret,

    #[error("Invalid value for {var}: {value}")]
    Invalid { var: &'static str, value: String },
}

/// Process configuration, read from the environment once at startup.
/// The token secret and database location are read-only afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub database_path: PathBuf,
    pub token_secret: String,
    pub token_ttl_secs: i64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Parameterized over the variable source so tests don't have to
    /// mutate the process environment.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host: IpAddr = match lookup("HOST") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                var: "HOST",
                value: raw,
            })?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };

        let port: u16 = match lookup("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                var: "PORT",
                value: raw,
            })?,
            None => DEFAULT_PORT,
        };

        let database_path = lookup("DATABASE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH));

        let token_secret = lookup("TOKEN_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingTokenSecret)?;

        let ttl_hours: i64 = match lookup("TOKEN_TTL_HOURS") {
            Some(raw) => match raw.parse() {
                Ok(hours) if hours > 0 => hours,
                _ => {
                    return Err(ConfigError::Invalid {
                        var: "TOKEN_TTL_HOURS",
                        value: raw,
                    })
                }
            },
            None => DEFAULT_TOKEN_TTL_HOURS,
        };

        Ok(Self {
            bind_addr: SocketAddr::new(host, port),
            database_path,
            token_secret,
            token_ttl_secs: ttl_hours * 3600,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |var| {
            pairs
                .iter()
                .find(|(k, _)| *k == var)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn defaults_apply_when_only_secret_is_set() {
        let cfg = Config::from_lookup(vars(&[("TOKEN_SECRET", "s3cret")])).unwrap();
        assert_eq!(cfg.bind_addr.port(), DEFAULT_PORT);
        assert_eq!(cfg.database_path, PathBuf::from(DEFAULT_DATABASE_PATH));
        assert_eq!(cfg.token_ttl_secs, DEFAULT_TOKEN_TTL_HOURS * 3600);
    }

    #[test]
    fn missing_secret_is_an_error() {
        assert!(matches!(
            Config::from_lookup(vars(&[])),
            Err(ConfigError::MissingTokenSecret)
        ));
    }

    #[test]
    fn empty_secret_is_an_error() {
        assert!(matches!(
            Config::from_lookup(vars(&[("TOKEN_SECRET", "")])),
            Err(ConfigError::MissingTokenSecret)
        ));
    }

    #[test]
    fn explicit_values_override_defaults() {
        let cfg = Config::from_lookup(vars(&[
            ("TOKEN_SECRET", "s3cret"),
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("DATABASE_PATH", "/tmp/clinic.db"),
            ("TOKEN_TTL_HOURS", "2"),
        ]))
        .unwrap();
        assert_eq!(cfg.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(cfg.database_path, PathBuf::from("/tmp/clinic.db"));
        assert_eq!(cfg.token_ttl_secs, 7200);
    }

    #[test]
    fn bad_port_is_an_error() {
        assert!(matches!(
            Config::from_lookup(vars(&[("TOKEN_SECRET", "s"), ("PORT", "http")])),
            Err(ConfigError::Invalid { var: "PORT", .. })
        ));
    }

    #[test]
    fn zero_ttl_is_an_error() {
        assert!(matches!(
            Config::from_lookup(vars(&[("TOKEN_SECRET", "s"), ("TOKEN_TTL_HOURS", "0")])),
            Err(ConfigError::Invalid {
                var: "TOKEN_TTL_HOURS",
                ..
            })
        ));
    }
}
