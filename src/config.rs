//! Connection parameters and behavior toggles, read from the process
//! environment (with a best-effort `.env` load).
//!
//! Recognized variables:
//! - `SHELTERLITE_DB_HOST`, `SHELTERLITE_DB_PORT`, `SHELTERLITE_DB_USER`,
//!   `SHELTERLITE_DB_PASSWORD`, `SHELTERLITE_DB_NAME`
//! - `SHELTERLITE_LENIENT` — swallow store faults into neutral results
//!   (default true, the legacy behavior)
//! - `SHELTERLITE_USE_CACHE` — read cache on/off (default true; off is the
//!   legacy "simple" manager)
//! - `SHELTERLITE_DB_FILTERS` — filtered views query the store instead of
//!   masking in memory (default false)

use crate::errors::DbError;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub user: Option<String>,
    pub password: Option<String>,
    pub db_name: String,
    pub lenient: bool,
    pub use_cache: bool,
    pub db_filters: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 27017,
            user: None,
            password: None,
            db_name: "aac".to_string(),
            lenient: true,
            use_cache: true,
            db_filters: false,
        }
    }
}

impl Config {
    /// Reads configuration from the environment. Unparsable values are a
    /// `Config` error; this path is fatal and propagated, never swallowed.
    pub fn from_env() -> Result<Self, DbError> {
        let _ = dotenvy::dotenv();
        let mut cfg = Self::default();
        if let Ok(v) = std::env::var("SHELTERLITE_DB_HOST") {
            cfg.host = v;
        }
        if let Ok(v) = std::env::var("SHELTERLITE_DB_PORT") {
            cfg.port = v
                .parse()
                .map_err(|_| DbError::Config(format!("invalid SHELTERLITE_DB_PORT: {v}")))?;
        }
        if let Ok(v) = std::env::var("SHELTERLITE_DB_USER") {
            cfg.user = Some(v);
        }
        if let Ok(v) = std::env::var("SHELTERLITE_DB_PASSWORD") {
            cfg.password = Some(v);
        }
        if let Ok(v) = std::env::var("SHELTERLITE_DB_NAME") {
            cfg.db_name = v;
        }
        if let Ok(v) = std::env::var("SHELTERLITE_LENIENT") {
            cfg.lenient = parse_flag("SHELTERLITE_LENIENT", &v)?;
        }
        if let Ok(v) = std::env::var("SHELTERLITE_USE_CACHE") {
            cfg.use_cache = parse_flag("SHELTERLITE_USE_CACHE", &v)?;
        }
        if let Ok(v) = std::env::var("SHELTERLITE_DB_FILTERS") {
            cfg.db_filters = parse_flag("SHELTERLITE_DB_FILTERS", &v)?;
        }
        cfg.validate()?;
        Ok(cfg)
    }

    /// Checks the connection parameters are usable.
    pub fn validate(&self) -> Result<(), DbError> {
        if self.host.trim().is_empty() {
            return Err(DbError::Config("database host must not be empty".to_string()));
        }
        if self.db_name.trim().is_empty() {
            return Err(DbError::Config("database name must not be empty".to_string()));
        }
        Ok(())
    }
}

pub(crate) fn parse_flag(name: &str, value: &str) -> Result<bool, DbError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        other => Err(DbError::Config(format!("invalid {name}: {other}"))),
    }
}
