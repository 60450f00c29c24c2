use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager, CustomizeConnection};
use domain::{default_genres, default_ratings, DomainError};
use std::time::Duration;
use tracing::info;

pub mod schema;
pub use schema::*;

pub type SqlitePool = r2d2::Pool<ConnectionManager<SqliteConnection>>;

/// Pragmas applied to every pooled connection when it is opened.
#[derive(Debug, Clone, Copy)]
pub struct ConnectionOptions {
    pub busy_timeout: Option<Duration>,
    pub enable_wal: bool,
    pub enable_foreign_keys: bool,
}

impl ConnectionOptions {
    /// File databases: writers wait for the lock instead of failing with `SQLITE_BUSY`.
    pub fn file() -> Self {
        Self {
            busy_timeout: Some(Duration::from_secs(5)),
            enable_wal: true,
            enable_foreign_keys: true,
        }
    }

    /// `:memory:` databases have no journal file to switch to WAL.
    pub fn memory() -> Self {
        Self {
            enable_wal: false,
            ..Self::file()
        }
    }
}

impl CustomizeConnection<SqliteConnection, r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), r2d2::Error> {
        // busy_timeout goes first so the WAL switch itself can wait for the lock
        if let Some(timeout) = self.busy_timeout {
            conn.batch_execute(&format!("PRAGMA busy_timeout = {};", timeout.as_millis()))
                .map_err(r2d2::Error::QueryError)?;
        }
        if self.enable_wal {
            conn.batch_execute("PRAGMA journal_mode = WAL; PRAGMA synchronous = NORMAL;")
                .map_err(r2d2::Error::QueryError)?;
        }
        if self.enable_foreign_keys {
            conn.batch_execute("PRAGMA foreign_keys = ON;")
                .map_err(r2d2::Error::QueryError)?;
        }
        Ok(())
    }
}

pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens (or creates) the SQLite file and makes sure tables and reference rows exist.
    pub fn new(database_path: &str) -> Result<Self, DomainError> {
        let manager = ConnectionManager::<SqliteConnection>::new(database_path);
        let pool = r2d2::Pool::builder()
            .connection_customizer(Box::new(ConnectionOptions::file()))
            .build(manager)
            .map_err(repository_error)?;
        let database = Database { pool };
        database.initialize()?;
        info!(path = database_path, "SQLite database ready");
        Ok(database)
    }

    /// A private in-memory database. Every SQLite `:memory:` connection is its own
    /// database, so the pool is limited to a single connection.
    pub fn in_memory() -> Result<Self, DomainError> {
        let manager = ConnectionManager::<SqliteConnection>::new(":memory:");
        let pool = r2d2::Pool::builder()
            .max_size(1)
            .connection_customizer(Box::new(ConnectionOptions::memory()))
            .idle_timeout(None)
            .max_lifetime(None)
            .build(manager)
            .map_err(repository_error)?;
        let database = Database { pool };
        database.initialize()?;
        Ok(database)
    }

    pub fn get_pool(&self) -> &SqlitePool {
        &self.pool
    }

    fn initialize(&self) -> Result<(), DomainError> {
        let mut conn = self.pool.get().map_err(repository_error)?;
        conn.batch_execute(CREATE_TABLES).map_err(repository_error)?;

        conn.immediate_transaction::<_, diesel::result::Error, _>(|conn| {
            for genre in default_genres() {
                diesel::insert_or_ignore_into(genres::table)
                    .values((genres::id.eq(genre.id), genres::name.eq(genre.name)))
                    .execute(conn)?;
            }
            for rating in default_ratings() {
                diesel::insert_or_ignore_into(ratings::table)
                    .values((ratings::id.eq(rating.id), ratings::name.eq(rating.name)))
                    .execute(conn)?;
            }
            Ok(())
        })
        .map_err(repository_error)
    }
}

/// Runs a diesel closure on a pooled connection without blocking the async runtime.
pub(crate) async fn run_blocking<T, F>(pool: &SqlitePool, query: F) -> Result<T, DomainError>
where
    T: Send + 'static,
    F: FnOnce(&mut SqliteConnection) -> QueryResult<T> + Send + 'static,
{
    let pool = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut conn = pool.get().map_err(repository_error)?;
        query(&mut conn).map_err(repository_error)
    })
    .await
    .map_err(repository_error)?
}

pub(crate) fn repository_error(e: impl std::fmt::Display) -> DomainError {
    DomainError::RepositoryError(e.to_string())
}

/// Row id assigned by the most recent insert on this connection.
pub(crate) fn last_insert_rowid(conn: &mut SqliteConnection) -> QueryResult<i64> {
    diesel::select(diesel::dsl::sql::<diesel::sql_types::BigInt>(
        "last_insert_rowid()",
    ))
    .get_result::<i64>(conn)
}
