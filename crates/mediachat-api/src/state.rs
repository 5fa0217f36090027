//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by both CLI and REST API.
//! Services are generic over the store and generator traits, but AppState pins
//! them to the SQLite stores and the template generator.

use std::path::PathBuf;
use std::sync::Arc;

use mediachat_core::generation::orchestrator::GenerationOrchestrator;
use mediachat_core::generation::template::TemplateGenerator;
use mediachat_core::session::service::SessionService;
use mediachat_infra::config::{load_global_config, resolve_data_dir, resolve_generation_timeout};
use mediachat_infra::sqlite::identity::SqliteIdentityStore;
use mediachat_infra::sqlite::pool::{database_url, DatabasePool};
use mediachat_infra::sqlite::session::SqliteSessionStore;
use mediachat_types::config::GlobalConfig;

/// Concrete type aliases for the service generics pinned to infra implementations.
pub type ConcreteSessionService = SessionService<SqliteSessionStore>;

pub type ConcreteOrchestrator = GenerationOrchestrator<SqliteSessionStore, TemplateGenerator>;

/// Shared application state holding all services.
///
/// Used by both CLI commands and REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub session_service: Arc<ConcreteSessionService>,
    pub orchestrator: Arc<ConcreteOrchestrator>,
    pub identity_store: Arc<SqliteIdentityStore>,
    pub config: Arc<GlobalConfig>,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Initialize the application state from the resolved data directory.
    pub async fn init() -> anyhow::Result<Self> {
        Self::open(resolve_data_dir()).await
    }

    /// Initialize the application state rooted at `data_dir`: load config,
    /// connect to the DB, wire services.
    pub async fn open(data_dir: PathBuf) -> anyhow::Result<Self> {
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_global_config(&data_dir).await;
        let db_pool = DatabasePool::new(&database_url(&data_dir)).await?;

        let session_service = SessionService::new(SqliteSessionStore::new(db_pool.clone()));

        // The orchestrator owns its own service over the same pool.
        let orchestrator = GenerationOrchestrator::new(
            SessionService::new(SqliteSessionStore::new(db_pool.clone())),
            TemplateGenerator::new(),
        )
        .with_timeout(resolve_generation_timeout(&config));

        let identity_store = SqliteIdentityStore::new(db_pool);

        tracing::debug!(data_dir = %data_dir.display(), "Application state initialized");

        Ok(Self {
            session_service: Arc::new(session_service),
            orchestrator: Arc::new(orchestrator),
            identity_store: Arc::new(identity_store),
            config: Arc::new(config),
            data_dir,
        })
    }

    /// Path of the SQLite database file.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join("mediachat.db")
    }
}
