//! Server configuration loaded from environment variables

use anyhow::{Context, Result};

/// Top-level configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
}

/// Database settings
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// SQLite connection URL, e.g. `sqlite://marginalia.db`
    pub url: String,
}

/// HTTP server settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: "sqlite://marginalia.db".to_string(),
            },
            server: ServerConfig { port: 5000 },
        }
    }
}

impl Config {
    /// Load configuration from the environment, falling back to defaults
    /// for unset variables.
    pub fn from_env() -> Result<Self> {
        let defaults = Config::default();

        let url = std::env::var("DATABASE_URL").unwrap_or(defaults.database.url);

        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("invalid PORT value: {}", raw))?,
            Err(_) => defaults.server.port,
        };

        Ok(Self {
            database: DatabaseConfig { url },
            server: ServerConfig { port },
        })
    }
}
