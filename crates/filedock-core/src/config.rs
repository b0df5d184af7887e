//! Configuration module
//!
//! Environment-backed configuration for the ingestion service and the CLI.
//! The storage base path and the public base URL are resolved here once and
//! injected into the components that need them; nothing reads them from
//! ambient state after startup.

use std::env;

use anyhow::Context;

// Common constants
const DB_MAX_CONNECTIONS: u32 = 10;
const DB_TIMEOUT_SECS: u64 = 30;
const MAX_FILE_SIZE_BYTES: usize = 100 * 1024 * 1024; // 100 MiB

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    /// Root directory files are written under.
    pub storage_path: String,
    /// Base URL serving URLs are derived from.
    pub public_base_url: String,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub max_file_size_bytes: usize,
    pub environment: String,
}

impl Config {
    /// Load configuration from the environment (and `.env` when present).
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let database_url =
            env::var("DATABASE_URL").context("DATABASE_URL environment variable is required")?;
        let storage_path =
            env::var("STORAGE_PATH").context("STORAGE_PATH environment variable is required")?;
        let public_base_url = env::var("PUBLIC_BASE_URL")
            .context("PUBLIC_BASE_URL environment variable is required")?;

        let db_max_connections = env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DB_MAX_CONNECTIONS);
        let db_timeout_seconds = env::var("DB_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DB_TIMEOUT_SECS);
        let max_file_size_bytes = env::var("MAX_FILE_SIZE_BYTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(MAX_FILE_SIZE_BYTES);

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let config = Config {
            database_url,
            storage_path,
            public_base_url,
            db_max_connections,
            db_timeout_seconds,
            max_file_size_bytes,
            environment,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.database_url.trim().is_empty() {
            anyhow::bail!("DATABASE_URL must not be empty");
        }
        if self.storage_path.trim().is_empty() {
            anyhow::bail!("STORAGE_PATH must not be empty");
        }
        if self.public_base_url.trim().is_empty() {
            anyhow::bail!("PUBLIC_BASE_URL must not be empty");
        }
        if self.max_file_size_bytes == 0 {
            anyhow::bail!("MAX_FILE_SIZE_BYTES must be greater than zero");
        }
        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }
}
