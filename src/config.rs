use std::env;
use std::net::SocketAddr;

use anyhow::{Context, Result};

const DEV_SECRET_KEY: &str = "dev-key-change-me-for-anything-beyond-local-development!";

/// Externally supplied configuration with safe local-development defaults.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub secret_key: String,
    pub bind_addr: SocketAddr,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://finance.db?mode=rwc".to_string());

        let secret_key = match env::var("SECRET_KEY") {
            Ok(key) => key,
            Err(_) => {
                tracing::warn!("SECRET_KEY not set, using the development default");
                DEV_SECRET_KEY.to_string()
            }
        };

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
            .parse::<SocketAddr>()
            .context("BIND_ADDR is not a valid socket address")?;

        Ok(Config {
            database_url,
            secret_key,
            bind_addr,
        })
    }
}
