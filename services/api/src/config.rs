//! Service configuration read from the process environment

use anyhow::{Context, Result, bail};
use common::database::DatabaseConfig;
use config::{Config, Environment};
use serde::Deserialize;
use std::{path::PathBuf, str::FromStr};

/// Default directory uploaded images are written to and served from
pub const DEFAULT_IMAGES_DIR: &str = "images";

/// Default cap on an upload request body (10 MiB)
pub const DEFAULT_UPLOAD_LIMIT_BYTES: usize = 10 * 1024 * 1024;

/// Which repository implementation backs the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreKind {
    #[default]
    Postgres,
    Memory,
}

impl FromStr for StoreKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreKind::Postgres),
            "memory" => Ok(StoreKind::Memory),
            other => bail!("Unknown STORE '{}', expected 'postgres' or 'memory'", other),
        }
    }
}

/// Raw values pulled from the environment
#[derive(Debug, Deserialize)]
struct ServiceSettings {
    port: u16,
    images_dir: Option<String>,
    upload_limit_bytes: Option<usize>,
    store: Option<String>,
}

/// Service configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    /// Port the HTTP listener binds on all interfaces
    pub port: u16,
    pub images_dir: PathBuf,
    pub upload_limit_bytes: usize,
    pub store: StoreKind,
}

impl AppConfig {
    /// Create a new AppConfig from environment variables
    ///
    /// # Environment Variables
    /// - `DATABASE_URL`: PostgreSQL connection URL (required)
    /// - `PORT`: Listen port (required)
    /// - `IMAGES_DIR`: Upload directory (default: `images`)
    /// - `UPLOAD_LIMIT_BYTES`: Maximum upload body size (default: 10 MiB)
    /// - `STORE`: `postgres` (default) or `memory`
    pub fn from_env() -> Result<Self> {
        let database = DatabaseConfig::from_env()?;

        let settings: ServiceSettings = Config::builder()
            .add_source(Environment::default().try_parsing(true))
            .build()?
            .try_deserialize()
            .context("PORT environment variable not set or invalid")?;

        let store = match settings.store.as_deref() {
            Some(value) => value.parse()?,
            None => StoreKind::default(),
        };

        Ok(AppConfig {
            database,
            port: settings.port,
            images_dir: PathBuf::from(
                settings
                    .images_dir
                    .unwrap_or_else(|| DEFAULT_IMAGES_DIR.to_string()),
            ),
            upload_limit_bytes: settings
                .upload_limit_bytes
                .unwrap_or(DEFAULT_UPLOAD_LIMIT_BYTES),
            store,
        })
    }
}
