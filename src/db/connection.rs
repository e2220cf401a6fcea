// src/db/connection.rs
//
// Database connection management
//
// PRINCIPLES:
// - Explicit connection pooling
// - No hidden connection creation
// - Clear error propagation
// - Thread-safe access

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;

use crate::config::{AppConfig, DatabaseLocation};
use crate::error::{AppError, AppResult};

/// Type alias for connection pool
pub type ConnectionPool = Pool<SqliteConnectionManager>;

/// Type alias for a pooled connection
pub type PooledConn = PooledConnection<SqliteConnectionManager>;

/// Create a connection pool
///
/// Every connection gets:
/// - Foreign keys enabled
/// - WAL journal (file databases)
/// - Busy timeout from the config
///
/// An in-memory store is private to a single connection, so its pool holds
/// exactly one.
pub fn create_connection_pool(config: &AppConfig) -> AppResult<ConnectionPool> {
    let busy_timeout = config.busy_timeout_ms;

    let (manager, max_size, in_memory) = match config.database_location()? {
        DatabaseLocation::File(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            log::info!("Opening document store at {}", path.display());

            let manager = SqliteConnectionManager::file(&path).with_init(move |conn| {
                conn.execute_batch(&format!(
                    "PRAGMA foreign_keys = ON;
                     PRAGMA journal_mode = WAL;
                     PRAGMA synchronous = NORMAL;
                     PRAGMA busy_timeout = {};",
                    busy_timeout
                ))?;
                Ok(())
            });
            (manager, config.pool_max_size, false)
        }
        DatabaseLocation::InMemory => {
            log::info!("Opening in-memory document store");

            let manager = SqliteConnectionManager::memory().with_init(|conn| {
                conn.execute_batch("PRAGMA foreign_keys = ON;")?;
                Ok(())
            });
            (manager, 1, true)
        }
    };

    let mut builder = Pool::builder().max_size(max_size);
    if in_memory {
        builder = builder.max_lifetime(None).idle_timeout(None);
    }

    let pool = builder
        .build(manager)
        .map_err(|e| AppError::Other(format!("Failed to create connection pool: {}", e)))?;

    Ok(pool)
}

/// Get a connection from the pool
///
/// This is a convenience wrapper that provides better error messages.
pub fn get_connection(pool: &ConnectionPool) -> AppResult<PooledConn> {
    pool.get()
        .map_err(|e| AppError::Pool(format!("Failed to get database connection: {}", e)))
}

/// Create a standalone connection (for testing)
///
/// This creates an in-memory database, useful for unit tests.
pub fn create_test_connection() -> AppResult<Connection> {
    let conn = Connection::open_in_memory().map_err(AppError::Database)?;

    conn.execute_batch("PRAGMA foreign_keys = ON;")
        .map_err(AppError::Database)?;

    Ok(conn)
}
