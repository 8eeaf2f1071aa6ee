// todoweb/src/config.rs
use std::net::{IpAddr, Ipv4Addr};

use crate::services::password::COST_RANGE;
use crate::session::DEFAULT_SESSION_MAX_AGE;

/// Env files read at startup. Missing files are skipped, variables already
/// present in the environment win.
pub const ENV_FILES: [&str; 2] = ["database.env", "host.env"];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("invalid value {value:?} for {name}")]
    Invalid { name: &'static str, value: String },
    #[error("failed to load {file}: {source}")]
    EnvFile {
        file: &'static str,
        #[source]
        source: dotenvy::Error,
    },
    #[error("no randomness available to generate the session key")]
    SecretKey,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Storage {
    Postgres { url: String },
    Memory,
}

impl Storage {
    pub fn label(&self) -> &'static str {
        match self {
            Storage::Postgres { .. } => "postgres",
            Storage::Memory => "memory",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub host: IpAddr,
    pub port: u16,
    pub storage: Storage,
    /// `ENV=production`: session cookies get the `Secure` flag.
    pub production: bool,
    pub session_max_age: i64,
    pub bcrypt_cost: u32,
}

impl Settings {
    /// Loads the env files, then reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        for file in ENV_FILES {
            match dotenvy::from_filename(file) {
                Ok(_) => {}
                Err(e) if e.not_found() => {}
                Err(source) => return Err(ConfigError::EnvFile { file, source }),
            }
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let host = match var("HOST") {
            None => IpAddr::V4(Ipv4Addr::LOCALHOST),
            Some(h) if h.eq_ignore_ascii_case("localhost") => IpAddr::V4(Ipv4Addr::LOCALHOST),
            Some(h) => h
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid { name: "HOST", value: h })?,
        };
        let port = parse_or("PORT", var("PORT"), 8000u16)?;

        let storage = match var("STORAGE").as_deref().map(str::to_ascii_lowercase).as_deref() {
            None | Some("postgres") => Storage::Postgres { url: database_url(&var)? },
            Some("memory") => Storage::Memory,
            Some(other) => {
                return Err(ConfigError::Invalid { name: "STORAGE", value: other.to_string() })
            }
        };

        let production = var("ENV").map_or(false, |env| env == "production");
        let session_max_age = parse_or("SESSION_MAX_AGE", var("SESSION_MAX_AGE"), DEFAULT_SESSION_MAX_AGE)?;
        if session_max_age <= 0 {
            return Err(ConfigError::Invalid {
                name: "SESSION_MAX_AGE",
                value: session_max_age.to_string(),
            });
        }
        let bcrypt_cost = parse_or("BCRYPT_COST", var("BCRYPT_COST"), bcrypt::DEFAULT_COST)?;
        if !COST_RANGE.contains(&bcrypt_cost) {
            return Err(ConfigError::Invalid {
                name: "BCRYPT_COST",
                value: bcrypt_cost.to_string(),
            });
        }

        Ok(Settings {
            host,
            port,
            storage,
            production,
            session_max_age,
            bcrypt_cost,
        })
    }

    /// In-memory settings for tests and local experiments.
    pub fn memory() -> Self {
        Settings {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 8000,
            storage: Storage::Memory,
            production: false,
            session_max_age: DEFAULT_SESSION_MAX_AGE,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

fn parse_or<T: std::str::FromStr>(
    name: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}

fn database_url(var: &dyn Fn(&str) -> Option<String>) -> Result<String, ConfigError> {
    if let Some(url) = var("DATABASE_URL") {
        return Ok(url);
    }

    let host = var("DB_HOST").ok_or(ConfigError::Missing("DB_HOST"))?;
    let port = var("DB_PORT").ok_or(ConfigError::Missing("DB_PORT"))?;
    let user = var("DB_USER").ok_or(ConfigError::Missing("DB_USER"))?;
    let password = var("DB_PASSWORD").ok_or(ConfigError::Missing("DB_PASSWORD"))?;
    let name = var("DB_NAME").ok_or(ConfigError::Missing("DB_NAME"))?;

    Ok(format!(
        "postgres://{}:{}@{}:{}/{}?sslmode=disable",
        user, password, host, port, name
    ))
}
