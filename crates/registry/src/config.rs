//! Store connection settings.
//!
//! # Environment Variables
//!
//! All optional; a `.env` file in the working directory is read first.
//! - `DB_NAME` - database name (default: company_db)
//! - `DB_USER` - role to connect as (default: postgres)
//! - `DB_PASSWORD` - password (default: postgres)
//! - `DB_HOST` - server host (default: localhost)
//! - `DB_PORT` - server port (default: 5432)

use sqlx::postgres::PgConnectOptions;
use thiserror::Error;

const DEFAULT_DBNAME: &str = "company_db";
const DEFAULT_USER: &str = "postgres";
const DEFAULT_PASSWORD: &str = "postgres";
const DEFAULT_HOST: &str = "localhost";
const DEFAULT_PORT: u16 = 5432;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid port in DB_PORT: '{0}'")]
    InvalidPort(String),
}

/// Connection parameters for the registry's store.
#[derive(Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    pub dbname: String,
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            dbname: DEFAULT_DBNAME.to_string(),
            user: DEFAULT_USER.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl std::fmt::Debug for RegistryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryConfig")
            .field("dbname", &self.dbname)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}

impl RegistryConfig {
    /// Load from the process environment.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup; unset variables fall back to
    /// their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("DB_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            None => defaults.port,
        };

        Ok(Self {
            dbname: lookup("DB_NAME").unwrap_or(defaults.dbname),
            user: lookup("DB_USER").unwrap_or(defaults.user),
            password: lookup("DB_PASSWORD").unwrap_or(defaults.password),
            host: lookup("DB_HOST").unwrap_or(defaults.host),
            port,
        })
    }

    /// Options for opening a connection with these settings.
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.dbname)
    }

    /// libpq key/value connection string, e.g. for `psql`.
    pub fn connection_string(&self) -> String {
        format!(
            "dbname={} user={} password={} host={} port={}",
            self.dbname, self.user, self.password, self.host, self.port
        )
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn unset_variables_use_defaults() {
        let config = RegistryConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, RegistryConfig::default());
        assert_eq!(config.dbname, "company_db");
        assert_eq!(config.port, 5432);
    }

    #[test]
    fn variables_override_defaults() {
        let config = RegistryConfig::from_lookup(lookup_from(&[
            ("DB_NAME", "hr"),
            ("DB_HOST", "db.internal"),
            ("DB_PORT", "6543"),
        ]))
        .unwrap();

        assert_eq!(config.dbname, "hr");
        assert_eq!(config.host, "db.internal");
        assert_eq!(config.port, 6543);
        assert_eq!(config.user, "postgres");
    }

    #[test]
    fn non_numeric_port_is_rejected() {
        let err = RegistryConfig::from_lookup(lookup_from(&[("DB_PORT", "fivefour")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort(p) if p == "fivefour"));
    }

    #[test]
    fn connection_string_lists_every_parameter() {
        let config = RegistryConfig::default();
        assert_eq!(
            config.connection_string(),
            "dbname=company_db user=postgres password=postgres host=localhost port=5432"
        );
    }

    #[test]
    fn connect_options_carry_settings() {
        let config = RegistryConfig { port: 6000, ..RegistryConfig::default() };
        let options = config.connect_options();
        assert_eq!(options.get_host(), "localhost");
        assert_eq!(options.get_port(), 6000);
        assert_eq!(options.get_database(), Some("company_db"));
        assert_eq!(options.get_username(), "postgres");
    }

    #[test]
    fn debug_output_hides_password() {
        let config = RegistryConfig { password: "hunter2".into(), ..RegistryConfig::default() };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
