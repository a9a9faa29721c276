//! Application state wiring the importer together.
//!
//! The importer is generic over repository/hasher traits; AppState pins it
//! to the concrete infra implementations (SQLite repositories, SHA-256
//! hashing, JSON state file).

use std::path::PathBuf;
use std::sync::Arc;

use memolog_core::import::Importer;
use memolog_infra::config::load_global_config;
use memolog_infra::hash::Sha256ContentHasher;
use memolog_infra::resolve_data_dir;
use memolog_infra::sqlite::nutrition::SqliteNutritionRepository;
use memolog_infra::sqlite::pool::DatabasePool;
use memolog_infra::sqlite::weight::SqliteWeightRepository;
use memolog_infra::sqlite::workout::SqliteWorkoutRepository;
use memolog_infra::state_file::JsonStateStore;

/// Concrete type alias for the importer pinned to infra implementations.
pub type ConcreteImporter = Importer<
    SqliteWeightRepository,
    SqliteNutritionRepository,
    SqliteWorkoutRepository,
    Sha256ContentHasher,
>;

/// Shared application state for all operating modes.
pub struct AppState {
    pub importer: Arc<ConcreteImporter>,
    pub state_store: Arc<JsonStateStore>,
    pub watch_dir: PathBuf,
    pub debounce_ms: u64,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Initialize the application state: load config, connect to the
    /// database, wire the importer.
    ///
    /// `dir_override` (from `--dir`) wins over the configured watch
    /// directory, which in turn defaults to `{data_dir}/notes`.
    pub async fn init(dir_override: Option<PathBuf>) -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_global_config(&data_dir).await;

        let db_url = config.database_url.clone().unwrap_or_else(|| {
            format!("sqlite://{}?mode=rwc", data_dir.join("memolog.db").display())
        });
        let db_pool = DatabasePool::new(&db_url).await?;

        let watch_dir = dir_override
            .or(config.watch_dir.clone())
            .unwrap_or_else(|| data_dir.join("notes"));
        tokio::fs::create_dir_all(&watch_dir).await?;

        let importer = Importer::new(
            SqliteWeightRepository::new(db_pool.clone()),
            SqliteNutritionRepository::new(db_pool.clone()),
            SqliteWorkoutRepository::new(db_pool.clone()),
            Sha256ContentHasher::new(),
        );

        let state_store = JsonStateStore::new(data_dir.join("watcher-state.json"));

        Ok(Self {
            importer: Arc::new(importer),
            state_store: Arc::new(state_store),
            watch_dir,
            debounce_ms: config.debounce_ms,
            db_pool,
        })
    }
}
