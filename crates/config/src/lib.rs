use dotenv::dotenv;
use std::collections::HashMap;
use std::env;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Invalid {name}: {reason}")]
    InvalidValue { name: &'static str, reason: String },
}

/// Where entities and relations are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Sqlite,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(StorageBackend::Sqlite),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(format!("unknown storage backend '{}'", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: String,
    pub storage_backend: StorageBackend,
    pub api_host: String,
    pub api_port: u16,
    pub popular_default_count: i64,
}

impl Config {
    /// Load configuration from the process environment, after an optional `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        dotenv().ok();
        Self::from_vars(&env::vars().collect())
    }

    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let get = |name: &str, default: &str| {
            vars.get(name)
                .cloned()
                .unwrap_or_else(|| default.to_string())
        };

        Ok(Config {
            database_path: get("DATABASE_PATH", "filmrate.db"),
            storage_backend: parse("STORAGE_BACKEND", &get("STORAGE_BACKEND", "sqlite"))?,
            api_host: get("API_HOST", "127.0.0.1"),
            api_port: parse("API_PORT", &get("API_PORT", "8080"))?,
            popular_default_count: parse(
                "POPULAR_DEFAULT_COUNT",
                &get("POPULAR_DEFAULT_COUNT", "10"),
            )?,
        })
    }

    pub fn api_address(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }
}

fn parse<T>(name: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: ToString,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        name,
        reason: e.to_string(),
    })
}
