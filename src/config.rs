use std::env;
use thiserror::Error;

const DEFAULT_PORT: u16 = 8081;
const DEFAULT_BODY_LIMIT: usize = 2 * 1024 * 1024;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("DATABASE_URL not set")]
    MissingDatabaseUrl,
    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub body_limit: usize,
    pub max_connections: u32,
    /// Read numbered plain-text quizzes when embedded JSON is unrecoverable.
    pub quiz_plain_text_fallback: bool,
}

impl Config {
    /// Reads the process environment (`.env` is loaded by `main`).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = get("DATABASE_URL")
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingDatabaseUrl)?;

        Ok(Config {
            database_url,
            port: parsed(&get, "PORT", DEFAULT_PORT)?,
            body_limit: parsed(&get, "BODY_LIMIT_BYTES", DEFAULT_BODY_LIMIT)?,
            max_connections: parsed(&get, "DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?,
            quiz_plain_text_fallback: flag(&get, "QUIZ_PLAIN_TEXT_FALLBACK")?,
        })
    }
}

fn parsed<T: std::str::FromStr>(
    get: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match get(name) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}

fn flag(get: &impl Fn(&str) -> Option<String>, name: &'static str) -> Result<bool, ConfigError> {
    match get(name).as_deref().map(str::trim) {
        None | Some("") => Ok(false),
        Some("1" | "true" | "yes" | "on") => Ok(true),
        Some("0" | "false" | "no" | "off") => Ok(false),
        Some(other) => Err(ConfigError::Invalid { name, value: other.to_string() }),
    }
}
