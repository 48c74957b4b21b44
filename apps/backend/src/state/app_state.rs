use std::fmt;
use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::cache::{NoopCache, SharedCache};

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    /// Database connection (absent in tests that never touch storage)
    db: Option<DatabaseConnection>,
    pub cache: SharedCache,
}

impl AppState {
    pub fn new(db: DatabaseConnection, cache: SharedCache) -> Self {
        Self {
            db: Some(db),
            cache,
        }
    }

    pub fn without_db(cache: SharedCache) -> Self {
        Self { db: None, cache }
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }

    /// Same database, different cache.
    pub fn with_cache(&self, cache: SharedCache) -> Self {
        Self {
            db: self.db.clone(),
            cache,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::without_db(Arc::new(NoopCache))
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("db", &self.db.is_some())
            .finish_non_exhaustive()
    }
}
