//! Application state shared across handlers

use anyhow::Result;
use common::database::{self, init_pool, run_migrations};
use sqlx::PgPool;
use std::{path::PathBuf, sync::Arc};
use tracing::{info, warn};

use crate::{
    config::{AppConfig, DEFAULT_UPLOAD_LIMIT_BYTES, StoreKind},
    repositories::{
        CategoryRepository, MemoryStore, PgCategoryRepository, PgPostRepository,
        PgUserRepository, PostRepository, UserRepository,
    },
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub user_repository: Arc<dyn UserRepository>,
    pub post_repository: Arc<dyn PostRepository>,
    pub category_repository: Arc<dyn CategoryRepository>,
    /// Where uploads land and `/images` serves from
    pub images_dir: PathBuf,
    pub upload_limit_bytes: usize,
}

impl AppState {
    /// State backed by PostgreSQL repositories sharing one pool
    pub fn postgres(pool: PgPool, images_dir: impl Into<PathBuf>) -> Self {
        Self {
            user_repository: Arc::new(PgUserRepository::new(pool.clone())),
            post_repository: Arc::new(PgPostRepository::new(pool.clone())),
            category_repository: Arc::new(PgCategoryRepository::new(pool)),
            images_dir: images_dir.into(),
            upload_limit_bytes: DEFAULT_UPLOAD_LIMIT_BYTES,
        }
    }

    /// State backed by a fresh in-memory store
    pub fn in_memory(images_dir: impl Into<PathBuf>) -> Self {
        let store = MemoryStore::new();

        Self {
            user_repository: Arc::new(store.clone()),
            post_repository: Arc::new(store.clone()),
            category_repository: Arc::new(store),
            images_dir: images_dir.into(),
            upload_limit_bytes: DEFAULT_UPLOAD_LIMIT_BYTES,
        }
    }

    /// Build the state the configuration asks for, connecting and migrating
    /// the database when PostgreSQL is selected
    pub async fn from_config(config: &AppConfig) -> Result<Self> {
        let state = match config.store {
            StoreKind::Postgres => {
                let pool = init_pool(&config.database).await?;

                if database::health_check(&pool).await? {
                    info!("Database connection successful");
                } else {
                    anyhow::bail!("Failed to connect to database");
                }

                run_migrations(&pool).await?;
                Self::postgres(pool, &config.images_dir)
            }
            StoreKind::Memory => {
                warn!("Using the in-memory store; all data is lost on shutdown");
                Self::in_memory(&config.images_dir)
            }
        };

        Ok(state.with_upload_limit(config.upload_limit_bytes))
    }

    pub fn with_upload_limit(mut self, bytes: usize) -> Self {
        self.upload_limit_bytes = bytes;
        self
    }
}
