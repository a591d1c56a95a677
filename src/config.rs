use std::env;

use thiserror::Error;

const DEFAULT_SQLITE_PATH: &str = "scrumer.db";
const DEFAULT_SERVER_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unsupported DB_DRIVER `{0}`, only `sqlite` is available")]
    UnsupportedDriver(String),
    #[error("invalid value `{value}` for {key}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub server_address: String,
}

impl Config {
    // Reads the process environment; call `dotenv()` first to pick up `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok().filter(|value| !value.is_empty()))
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let driver = lookup("DB_DRIVER").unwrap_or_else(|| "sqlite".to_string());
        if driver != "sqlite" {
            return Err(ConfigError::UnsupportedDriver(driver));
        }

        let database_url = match lookup("DATABASE_URL") {
            Some(url) => url,
            None => {
                let path = lookup("DB_SQLITE_PATH").unwrap_or_else(|| DEFAULT_SQLITE_PATH.to_string());
                format!("sqlite://{path}?mode=rwc")
            }
        };

        let max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(value) => match value.parse::<u32>() {
                Ok(count) if count > 0 => count,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "DB_MAX_CONNECTIONS",
                        value,
                    })
                }
            },
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let server_address = lookup("SERVER_ADDRESS").unwrap_or_else(|| DEFAULT_SERVER_ADDRESS.to_string());

        Ok(Config {
            database_url,
            max_connections,
            server_address,
        })
    }
}
