//! Database layer for Lectern
//!
//! Provides:
//! - SeaORM entity models
//! - Repository pattern for data access
//! - A lazily-initialized shared connection handle

pub mod models;
mod repository;

pub use repository::Repository;

use crate::config::DatabaseConfig;
use crate::errors::{AppError, Result};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::info;

/// Lazily-initialized shared database handle.
///
/// One `Db` is created at startup and handed to every request via the
/// application state. The first `acquire()` dials the database; concurrent
/// callers arriving before that attempt resolves await the same in-flight
/// future rather than issuing redundant connection setups. Once established,
/// the connection is memoized for the rest of the process lifetime.
///
/// A failed attempt is not memoized: the next `acquire()` starts a fresh one.
pub struct Db {
    config: DatabaseConfig,
    conn: OnceCell<DatabaseConnection>,
    attempts: AtomicU64,
}

impl Db {
    /// Create a handle without connecting
    pub fn new(config: DatabaseConfig) -> Self {
        Self {
            config,
            conn: OnceCell::new(),
            attempts: AtomicU64::new(0),
        }
    }

    /// Wrap an already established connection, bypassing the dial.
    ///
    /// Used by tests that run against a prewired connection.
    pub fn from_connection(conn: DatabaseConnection) -> Self {
        Self {
            config: DatabaseConfig::default(),
            conn: OnceCell::new_with(Some(conn)),
            attempts: AtomicU64::new(0),
        }
    }

    /// Consume the handle, yielding the connection if one was established
    pub fn into_connection(self) -> Option<DatabaseConnection> {
        self.conn.into_inner()
    }

    /// Get the shared connection, establishing it on first use.
    ///
    /// Operations are never buffered against an unestablished connection;
    /// callers either get a live handle or a `DatabaseConnection` error.
    pub async fn acquire(&self) -> Result<&DatabaseConnection> {
        self.conn.get_or_try_init(|| self.connect()).await
    }

    /// Number of connection attempts issued so far
    pub fn connection_attempts(&self) -> u64 {
        self.attempts.load(Ordering::Relaxed)
    }

    /// Whether the shared connection has been established
    pub fn is_connected(&self) -> bool {
        self.conn.get().is_some()
    }

    async fn connect(&self) -> Result<DatabaseConnection> {
        self.attempts.fetch_add(1, Ordering::Relaxed);
        info!("Connecting to database...");

        let mut opts = ConnectOptions::new(&self.config.url);
        opts.max_connections(self.config.max_connections)
            .min_connections(self.config.min_connections)
            .connect_timeout(Duration::from_secs(self.config.connect_timeout_secs))
            .idle_timeout(Duration::from_secs(self.config.idle_timeout_secs))
            .sqlx_logging(false);

        let conn = Database::connect(opts)
            .await
            .map_err(|e| AppError::DatabaseConnection {
                message: format!("Failed to connect: {}", e),
            })?;

        info!("Database connection established");
        Ok(conn)
    }

    /// Ping the database to check connectivity
    pub async fn ping(&self) -> Result<()> {
        use sea_orm::ConnectionTrait;

        self.acquire()
            .await?
            .execute_unprepared("SELECT 1")
            .await
            .map_err(|e| AppError::DatabaseConnection {
                message: format!("Ping failed: {}", e),
            })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;

    // `acquire` rides on OnceCell::get_or_try_init; these tests pin down the
    // initialization semantics the handle relies on.

    #[tokio::test]
    async fn concurrent_initializers_share_one_attempt() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let cell = Arc::new(OnceCell::<u32>::new());

        let mut handles = Vec::new();
        for _ in 0..16 {
            let attempts = attempts.clone();
            let cell = cell.clone();
            handles.push(tokio::spawn(async move {
                *cell
                    .get_or_init(|| async {
                        attempts.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(Duration::from_millis(10)).await;
                        7u32
                    })
                    .await
            }));
        }

        for handle in handles {
            assert_eq!(handle.await.unwrap(), 7);
        }
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_attempt_is_not_memoized() {
        let attempts = AtomicUsize::new(0);
        let cell = OnceCell::<u32>::new();

        let first: std::result::Result<&u32, &str> = cell
            .get_or_try_init(|| async {
                attempts.fetch_add(1, Ordering::SeqCst);
                Err("refused")
            })
            .await;
        assert!(first.is_err());
        assert!(cell.get().is_none());

        let second: std::result::Result<&u32, &str> = cell
            .get_or_try_init(|| async {
                attempts.fetch_add(1, Ordering::SeqCst);
                Ok(42)
            })
            .await;
        assert_eq!(second.unwrap(), &42);
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn new_handle_has_no_connection() {
        let db = Db::new(crate::config::AppConfig::default().database);
        assert!(!db.is_connected());
        assert_eq!(db.connection_attempts(), 0);
    }
}
