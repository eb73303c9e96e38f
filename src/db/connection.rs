// src/db/connection.rs
//
// Database connection management
//
// PRINCIPLES:
// - Explicit connection pooling
// - No hidden connection creation
// - Thread-safe access

use std::path::Path;
use std::time::Duration;

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};

/// Type alias for connection pool
pub type ConnectionPool = Pool<SqliteConnectionManager>;

/// Type alias for a pooled connection
pub type PooledConn = PooledConnection<SqliteConnectionManager>;

/// Create a connection pool for the configured database file
///
/// Every connection:
/// - enforces foreign keys (not default in SQLite)
/// - uses WAL journaling
/// - waits `busy_timeout_ms` on a locked database instead of failing
pub fn create_connection_pool(config: &AppConfig) -> AppResult<ConnectionPool> {
    let db_path = config.resolve_database_path()?;
    open_pool(&db_path, config.pool_max_size, config.busy_timeout_ms)
}

pub(crate) fn open_pool(db_path: &Path, max_size: u32, busy_timeout_ms: u32) -> AppResult<ConnectionPool> {
    let pragmas = format!(
        "PRAGMA foreign_keys = ON;
         PRAGMA journal_mode = WAL;
         PRAGMA synchronous = NORMAL;
         PRAGMA busy_timeout = {};",
        busy_timeout_ms
    );

    let manager = SqliteConnectionManager::file(db_path)
        .with_init(move |conn| conn.execute_batch(&pragmas));

    let pool = Pool::builder()
        .max_size(max_size)
        .connection_timeout(Duration::from_millis(u64::from(busy_timeout_ms).max(1000)))
        .build(manager)
        .map_err(|e| AppError::Pool(format!("Failed to create connection pool: {}", e)))?;

    log::debug!("Opened database {} (pool size {})", db_path.display(), max_size);
    Ok(pool)
}

/// Get a connection from the pool
pub fn get_connection(pool: &ConnectionPool) -> AppResult<PooledConn> {
    pool.get()
        .map_err(|e| AppError::Pool(format!("Failed to get database connection: {}", e)))
}

/// Test-only pool backed by a temporary database file.
/// The directory guard must outlive the pool.
#[cfg(test)]
pub(crate) fn create_test_pool() -> (tempfile::TempDir, ConnectionPool) {
    let dir = tempfile::tempdir().unwrap();
    let pool = open_pool(&dir.path().join("filmhub-test.db"), 4, 5000).unwrap();
    {
        let conn = pool.get().unwrap();
        crate::db::initialize_database(&conn).unwrap();
    }
    (dir, pool)
}
