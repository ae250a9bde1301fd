use crate::models::anime::{AnimeRecord, NewAnime};
use anyhow::{Context, Result};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

pub mod memory;
pub mod migrator;
pub mod repositories;

pub use memory::InMemoryStore;

/// Failure talking to the backing store.
///
/// Kept separate from "no such row" (`Ok(None)`) so callers never mistake an
/// outage for a miss.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl From<DbErr> for StoreError {
    fn from(err: DbErr) -> Self {
        Self::Unavailable(err.to_string())
    }
}

/// Read/write contract the lookup core and the front ends depend on.
///
/// `list_all_titles` must yield rows in ascending `id` order: the fuzzy
/// resolver breaks score ties by first-seen row.
#[async_trait::async_trait]
pub trait AnimeStore: Send + Sync {
    async fn get_by_id(&self, id: i32) -> Result<Option<AnimeRecord>, StoreError>;

    async fn get_by_title(&self, title: &str) -> Result<Option<AnimeRecord>, StoreError>;

    async fn list_all_titles(&self) -> Result<Vec<(i32, String)>, StoreError>;

    async fn insert(&self, anime: NewAnime) -> Result<AnimeRecord, StoreError>;

    /// Cheap connectivity probe for readiness checks.
    async fn ping(&self) -> Result<(), StoreError>;
}

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let in_memory = db_url.contains(":memory:");

        if !in_memory {
            let path_str = db_url.trim_start_matches("sqlite://").trim_start_matches("sqlite:");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent()
                && !parent.as_os_str().is_empty()
            {
                tokio::fs::create_dir_all(parent).await.with_context(|| {
                    format!("Failed to create database directory: {}", parent.display())
                })?;
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)
                    .with_context(|| format!("Failed to create database file: {path_str}"))?;
            }
        }

        // Every pooled connection to `:memory:` would open its own empty database.
        let (max_connections, min_connections) = if in_memory {
            (1, 1)
        } else {
            (max_connections, min_connections)
        };

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    fn anime_repo(&self) -> repositories::anime::AnimeRepository {
        repositories::anime::AnimeRepository::new(self.conn.clone())
    }

    pub async fn count_anime(&self) -> Result<u64, StoreError> {
        self.anime_repo().count().await
    }
}

#[async_trait::async_trait]
impl AnimeStore for Store {
    async fn get_by_id(&self, id: i32) -> Result<Option<AnimeRecord>, StoreError> {
        self.anime_repo().get(id).await
    }

    async fn get_by_title(&self, title: &str) -> Result<Option<AnimeRecord>, StoreError> {
        self.anime_repo().get_by_title(title).await
    }

    async fn list_all_titles(&self) -> Result<Vec<(i32, String)>, StoreError> {
        self.anime_repo().list_titles().await
    }

    async fn insert(&self, anime: NewAnime) -> Result<AnimeRecord, StoreError> {
        self.anime_repo().add(anime).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }
}
