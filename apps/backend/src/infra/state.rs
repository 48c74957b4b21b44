use std::sync::Arc;

use crate::cache::{build_cache, NoopCache};
use crate::config::cache::CacheKind;
use crate::config::db::DbKind;
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::state::app_state::AppState;

/// Builder for creating AppState instances (used in both tests and main)
#[derive(Default)]
pub struct StateBuilder {
    db_kind: Option<DbKind>,
    cache_kind: Option<CacheKind>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_db(mut self, kind: DbKind) -> Self {
        self.db_kind = Some(kind);
        self
    }

    pub fn with_cache(mut self, kind: CacheKind) -> Self {
        self.cache_kind = Some(kind);
        self
    }

    /// Connect, migrate and assemble the state. Without a cache kind the
    /// state carries a [`NoopCache`].
    pub async fn build(self) -> Result<AppState, AppError> {
        let cache = match &self.cache_kind {
            Some(kind) => build_cache(kind).await?,
            None => Arc::new(NoopCache),
        };
        match self.db_kind {
            Some(kind) => {
                let conn = bootstrap_db(kind).await?;
                Ok(AppState::new(conn, cache))
            }
            None => Ok(AppState::without_db(cache)),
        }
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
