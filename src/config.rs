use anyhow::{Context, Result};
use std::net::{IpAddr, SocketAddr};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_DATABASE_URL: &str = "sqlite://companies.db?mode=rwc";
const DEFAULT_MAX_CONNECTIONS: u32 = 1;

/// Server configuration loaded from environment variables.
///
/// | Env Var                    | Default                          |
/// |----------------------------|----------------------------------|
/// | `HOST`                     | `0.0.0.0`                        |
/// | `PORT`                     | `5000`                           |
/// | `DATABASE_URL`             | `sqlite://companies.db?mode=rwc` |
/// | `DATABASE_MAX_CONNECTIONS` | `1`                              |
#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StorageConfig {
    /// sea-orm connection string, e.g. `sqlite://companies.db?mode=rwc`
    pub database_url: String,
    /// Upper bound on simultaneously open storage handles.
    pub max_connections: u32,
}

impl StorageConfig {
    /// Private in-memory store, used by tests.
    pub fn in_memory() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let host: IpAddr = match var("HOST") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("HOST must be an IP address, got {raw:?}"))?,
            None => DEFAULT_HOST.parse().context("default HOST")?,
        };

        let port: u16 = match var("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("PORT must be a number, got {raw:?}"))?,
            None => DEFAULT_PORT,
        };

        let database_url = var("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let max_connections = match var("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw.trim().parse::<u32>().ok().filter(|n| *n > 0).with_context(|| {
                format!("DATABASE_MAX_CONNECTIONS must be a positive number, got {raw:?}")
            })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            host,
            port,
            storage: StorageConfig {
                database_url,
                max_connections,
            },
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
