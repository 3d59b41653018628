use std::net::{IpAddr, SocketAddr};

use anyhow::{Context, Result};

/// Process configuration, read from the environment (after `.env` is loaded).
///
/// | Env var        | Default             |
/// |----------------|---------------------|
/// | `DATABASE_URL` | `sqlite://todos.db` |
/// | `HOST`         | `127.0.0.1`         |
/// | `PORT`         | `3000`              |
/// | `DEBUG`        | `false`             |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    pub addr: SocketAddr,
    /// Request inspection: verbose per-request tracing with headers.
    pub debug: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let database_url = var("DATABASE_URL").unwrap_or_else(|| "sqlite://todos.db".to_string());
        let host: IpAddr = var("HOST")
            .unwrap_or_else(|| "127.0.0.1".to_string())
            .parse()
            .context("HOST must be an IP address")?;
        let port: u16 = var("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .context("PORT must be a valid u16")?;
        let debug = var("DEBUG").is_some_and(|v| v == "true");
        Ok(Self { database_url, addr: SocketAddr::new(host, port), debug })
    }

    /// Default `EnvFilter` directive when `RUST_LOG` is unset.
    pub fn default_log_filter(&self) -> &'static str {
        if self.debug { "debug" } else { "info" }
    }
}
