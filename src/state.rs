use std::sync::Arc;

use crate::config::settings::AppConfig;
use crate::infrastructure::db::memory::MemoryStore;
use crate::infrastructure::db::pool::DbPool;
use crate::modules::genre::repository::{GenreRepository, PgGenreRepository};
use crate::modules::movie::repository::{MovieRepository, PgMovieRepository};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub genres: Arc<dyn GenreRepository>,
    pub movies: Arc<dyn MovieRepository>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        genres: Arc<dyn GenreRepository>,
        movies: Arc<dyn MovieRepository>,
    ) -> Self {
        Self {
            config,
            genres,
            movies,
        }
    }

    pub fn postgres(config: AppConfig, db: DbPool) -> Self {
        Self::new(
            config,
            Arc::new(PgGenreRepository::new(db.clone())),
            Arc::new(PgMovieRepository::new(db)),
        )
    }

    pub fn with_memory_store(config: AppConfig) -> Self {
        let store = MemoryStore::new();
        Self::new(config, Arc::new(store.clone()), Arc::new(store))
    }

    /// Fresh in-memory state with default configuration.
    pub fn in_memory() -> Self {
        Self::with_memory_store(AppConfig::in_memory())
    }
}
