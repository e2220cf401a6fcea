// src/config.rs
//
// Application configuration
//
// Defaults, overridden by an optional JSON file, overridden by environment:
// - RESCUEPAWS_DB_PATH          database file (":memory:" for a throwaway store)
// - RESCUEPAWS_POOL_SIZE        max pooled connections
// - RESCUEPAWS_BUSY_TIMEOUT_MS  SQLite busy timeout

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{AppError, AppResult};

pub const ENV_DB_PATH: &str = "RESCUEPAWS_DB_PATH";
pub const ENV_POOL_SIZE: &str = "RESCUEPAWS_POOL_SIZE";
pub const ENV_BUSY_TIMEOUT_MS: &str = "RESCUEPAWS_BUSY_TIMEOUT_MS";

const IN_MEMORY: &str = ":memory:";

/// Where the document store lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    File(PathBuf),
    /// Private to the pool; gone when the pool is dropped
    InMemory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database file path; absent means the per-user data directory
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    #[serde(default = "default_pool_max_size")]
    pub pool_max_size: u32,

    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u32,
}

fn default_pool_max_size() -> u32 {
    15
}

fn default_busy_timeout_ms() -> u32 {
    5000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            pool_max_size: default_pool_max_size(),
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}

impl AppConfig {
    /// Throwaway store, used by tests and previews
    pub fn in_memory() -> Self {
        Self {
            database_path: Some(PathBuf::from(IN_MEMORY)),
            ..Self::default()
        }
    }

    pub fn with_database_path(path: impl Into<PathBuf>) -> Self {
        Self {
            database_path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Load from a JSON file; missing keys fall back to defaults
    pub fn from_json_file(path: &Path) -> AppResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults with environment overrides applied
    pub fn from_env() -> AppResult<Self> {
        Self::default().apply_env()
    }

    pub fn apply_env(self) -> AppResult<Self> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup (the environment in production)
    pub fn apply_overrides<F>(mut self, lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_DB_PATH) {
            self.database_path = Some(PathBuf::from(path));
        }
        if let Some(size) = lookup(ENV_POOL_SIZE) {
            self.pool_max_size = size.trim().parse().map_err(|_| {
                AppError::Other(format!("{} must be a positive integer, got '{}'", ENV_POOL_SIZE, size))
            })?;
        }
        if let Some(timeout) = lookup(ENV_BUSY_TIMEOUT_MS) {
            self.busy_timeout_ms = timeout.trim().parse().map_err(|_| {
                AppError::Other(format!(
                    "{} must be a non-negative integer, got '{}'",
                    ENV_BUSY_TIMEOUT_MS, timeout
                ))
            })?;
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> AppResult<()> {
        if self.pool_max_size == 0 {
            return Err(AppError::Other("Pool size must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Resolve the configured location
    ///
    /// Without an explicit path the database goes to
    /// {APP_DATA}/rescuepaws/rescuepaws.db
    pub fn database_location(&self) -> AppResult<DatabaseLocation> {
        match &self.database_path {
            Some(path) if path.as_os_str() == IN_MEMORY => Ok(DatabaseLocation::InMemory),
            Some(path) => Ok(DatabaseLocation::File(path.clone())),
            None => default_database_path().map(DatabaseLocation::File),
        }
    }
}

fn default_database_path() -> AppResult<PathBuf> {
    let app_data_dir = dirs::data_dir()
        .ok_or_else(|| AppError::Other("Could not determine app data directory".to_string()))?;

    Ok(app_data_dir.join("rescuepaws").join("rescuepaws.db"))
}
