use std::env;

use crate::error::AppError;

pub const DEFAULT_CACHE_CAPACITY: u64 = 10_000;

/// Cache backend selected at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheKind {
    /// In-process cache bounded to `capacity` entries
    Memory { capacity: u64 },
    Redis { url: String },
    None,
}

impl CacheKind {
    /// Reads `CACHE_KIND`, `REDIS_URL` and `CACHE_CAPACITY`.
    pub fn from_env() -> Result<Self, AppError> {
        let kind = env::var("CACHE_KIND").unwrap_or_else(|_| "memory".to_string());
        match kind.trim().to_ascii_lowercase().as_str() {
            "memory" => {
                let capacity = match env::var("CACHE_CAPACITY") {
                    Ok(raw) => raw.trim().parse::<u64>().map_err(|_| {
                        AppError::config(format!("CACHE_CAPACITY must be a number, got '{raw}'"))
                    })?,
                    Err(_) => DEFAULT_CACHE_CAPACITY,
                };
                Ok(CacheKind::Memory { capacity })
            }
            "redis" => {
                let url = env::var("REDIS_URL").map_err(|_| {
                    AppError::config("Required environment variable 'REDIS_URL' is not set")
                })?;
                Ok(CacheKind::Redis { url })
            }
            "none" => Ok(CacheKind::None),
            other => Err(AppError::config(format!("Unknown CACHE_KIND '{other}'"))),
        }
    }
}

impl Default for CacheKind {
    fn default() -> Self {
        CacheKind::Memory {
            capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}
