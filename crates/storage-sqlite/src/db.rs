//! Connection pooling and migrations.

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use diesel::connection::{Connection, SimpleConnection};
use diesel::r2d2::{self, ConnectionManager, Pool, PooledConnection};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use log::{error, info};

use crate::errors::{IntoCore, StorageError};
use tradewise_core::errors::{DataSourceError, DatabaseError, Result};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

const DB_FILE_NAME: &str = "tradewise.db";

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

/// Creates the database directory if needed and enables WAL.
/// Returns the resolved database path.
pub fn init(app_data_dir: &str) -> Result<String> {
    let db_path = get_db_path(app_data_dir);
    prepare_database(&db_path)?;
    Ok(db_path)
}

fn prepare_database(db_path: &str) -> Result<()> {
    if let Some(db_dir) = Path::new(db_path).parent() {
        if !db_dir.as_os_str().is_empty() && !db_dir.exists() {
            fs::create_dir_all(db_dir).map_err(StorageError::from)?;
        }
    }

    let mut conn = SqliteConnection::establish(db_path).map_err(StorageError::from)?;
    conn.batch_execute("PRAGMA journal_mode = WAL;")
        .map_err(StorageError::from)?;
    Ok(())
}

pub fn create_pool(db_path: &str) -> Result<Arc<DbPool>> {
    let manager = ConnectionManager::<SqliteConnection>::new(db_path);
    let pool = Pool::builder()
        .max_size(4)
        .connection_timeout(Duration::from_secs(10))
        .connection_customizer(Box::new(BusyTimeout))
        .build(manager)
        .map_err(|e| DatabaseError::PoolCreationFailed(e.to_string()))?;
    Ok(Arc::new(pool))
}

pub fn run_migrations(pool: &DbPool) -> Result<()> {
    let mut connection = get_connection(pool)?;

    let applied = connection
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| {
            error!("Trade table migration failed: {}", e);
            StorageError::MigrationFailed(e.to_string())
        })?;
    if !applied.is_empty() {
        info!("Applied {} trade table migration(s)", applied.len());
    }

    Ok(())
}

/// `DATABASE_URL` when set, otherwise `tradewise.db` inside `app_data_dir`.
pub fn get_db_path(app_data_dir: &str) -> String {
    resolve_db_path(std::env::var("DATABASE_URL").ok(), app_data_dir)
}

fn resolve_db_path(database_url: Option<String>, app_data_dir: &str) -> String {
    database_url
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| {
            Path::new(app_data_dir)
                .join(DB_FILE_NAME)
                .to_string_lossy()
                .into_owned()
        })
}

pub fn get_connection(pool: &DbPool) -> Result<DbConnection> {
    pool.get().into_core()
}

/// Runs a synchronous Diesel read on the blocking thread pool so concurrent
/// lookups overlap and callers can time them out.
pub(crate) async fn run_blocking<T, F>(source_name: &'static str, read: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(read).await.map_err(|e| {
        DataSourceError::Unavailable {
            source_name: source_name.to_string(),
            message: format!("read task failed: {}", e),
        }
    })?
}

#[derive(Debug)]
struct BusyTimeout;

impl r2d2::CustomizeConnection<SqliteConnection, r2d2::Error> for BusyTimeout {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> std::result::Result<(), r2d2::Error> {
        conn.batch_execute("PRAGMA busy_timeout = 5000;")
            .map_err(r2d2::Error::QueryError)
    }
}

/// Migrated pool over a fresh database file in a temporary directory.
#[cfg(test)]
pub(crate) fn test_pool() -> (tempfile::TempDir, Arc<DbPool>) {
    let dir = tempfile::tempdir().expect("temp dir");
    let db_path = dir.path().join("test.db").to_string_lossy().into_owned();
    let pool = create_pool(&db_path).expect("pool");
    run_migrations(&pool).expect("migrations");
    (dir, pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;
    use tradewise_core::errors::Error;

    #[test]
    fn test_migrations_are_idempotent() {
        let (_dir, pool) = test_pool();
        run_migrations(&pool).unwrap();
    }

    #[test]
    fn test_db_path_defaults_to_data_dir() {
        let path = resolve_db_path(None, "/var/lib/tradewise");
        assert_eq!(
            Path::new(&path),
            Path::new("/var/lib/tradewise").join("tradewise.db")
        );
    }

    #[test]
    fn test_database_url_overrides_db_path() {
        let path = resolve_db_path(Some("/tmp/other.db".to_string()), "/var/lib/tradewise");
        assert_eq!(path, "/tmp/other.db");

        let blank = resolve_db_path(Some("  ".to_string()), "data");
        assert!(blank.ends_with("tradewise.db"));
    }

    #[test]
    fn test_prepare_database_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("nested").join("data");
        let db_path = resolve_db_path(None, &data_dir.to_string_lossy());

        prepare_database(&db_path).unwrap();

        assert!(data_dir.is_dir());
        assert!(Path::new(&db_path).exists());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_blocking_reads_overlap() {
        let started = Instant::now();
        let slow = |n: u32| {
            run_blocking("slow_source", move || {
                std::thread::sleep(Duration::from_millis(150));
                Ok(n)
            })
        };

        let (a, b, c) = futures::join!(slow(1), slow(2), slow(3));

        assert_eq!((a.unwrap(), b.unwrap(), c.unwrap()), (1, 2, 3));
        assert!(started.elapsed() < Duration::from_millis(400));
    }

    #[tokio::test]
    async fn test_blocking_read_can_be_timed_out() {
        let read = run_blocking("slow_source", || {
            std::thread::sleep(Duration::from_millis(300));
            Ok(())
        });

        let outcome = tokio::time::timeout(Duration::from_millis(20), read).await;

        assert!(outcome.is_err());
    }

    #[tokio::test]
    async fn test_panicking_read_reports_unavailable_source() {
        let outcome: Result<()> = run_blocking("broken_source", || panic!("boom")).await;

        match outcome {
            Err(Error::DataSource(DataSourceError::Unavailable { source_name, .. })) => {
                assert_eq!(source_name, "broken_source");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }
}
