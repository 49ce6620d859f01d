use log::LevelFilter;
use std::{env, path::PathBuf};
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "http://localhost:7000/api";
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("SUBDASH_API_URL must start with http:// or https://, got {0}")]
    InvalidApiUrl(String),

    #[error("SUBDASH_LOG_LEVEL must be one of off, error, warn, info, debug, trace; got {0}")]
    InvalidLogLevel(String),

    #[error("SUBDASH_ADMIN_USERNAME must not be empty")]
    EmptyAdminUsername,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub session_file: PathBuf,
    /// Username that unlocks the admin surface. A UI convenience only; the
    /// backend enforces who may manage plans.
    pub admin_username: String,
    pub log_level: LevelFilter,
}

impl Config {
    /// Reads `SUBDASH_*` variables. Call `dotenv::dotenv()` first to pick up `.env`.
    pub fn from_env() -> Result<Config, ConfigError> {
        Config::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = match lookup("SUBDASH_API_URL") {
            Some(url) => validate_api_url(&url)?,
            None => DEFAULT_API_URL.to_string(),
        };

        let session_file = match lookup("SUBDASH_SESSION_FILE") {
            Some(path) if !path.trim().is_empty() => PathBuf::from(path),
            _ => default_session_file(lookup("HOME")),
        };

        let admin_username = match lookup("SUBDASH_ADMIN_USERNAME") {
            Some(name) if name.trim().is_empty() => return Err(ConfigError::EmptyAdminUsername),
            Some(name) => name.trim().to_string(),
            None => DEFAULT_ADMIN_USERNAME.to_string(),
        };

        let log_level = match lookup("SUBDASH_LOG_LEVEL") {
            Some(level) => match level.trim().parse::<LevelFilter>() {
                Ok(level) => level,
                Err(_) => return Err(ConfigError::InvalidLogLevel(level)),
            },
            None => LevelFilter::Warn,
        };

        Ok(Config {
            api_url,
            session_file,
            admin_username,
            log_level,
        })
    }

    pub fn with_api_url(mut self, url: &str) -> Result<Config, ConfigError> {
        self.api_url = validate_api_url(url)?;
        Ok(self)
    }
}

pub fn validate_api_url(url: &str) -> Result<String, ConfigError> {
    let url = url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ConfigError::InvalidApiUrl(url.to_string()));
    }
    Ok(url.trim_end_matches('/').to_string())
}

fn default_session_file(home: Option<String>) -> PathBuf {
    match home {
        Some(home) if !home.is_empty() => PathBuf::from(home).join(".subdash").join("session.json"),
        _ => PathBuf::from(".subdash-session.json"),
    }
}
