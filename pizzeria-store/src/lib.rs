use std::time::Duration;

use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::info;

pub mod error;
pub mod models;
pub mod pizzas;
pub mod restaurant_pizzas;
pub mod restaurants;
pub mod schema;

pub use error::StoreError;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy)]
struct ConnectionOptions {
    busy_timeout: Duration,
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        configure_connection(conn, self.busy_timeout).map_err(diesel::r2d2::Error::QueryError)
    }
}

/// SQLite leaves foreign keys unenforced unless every connection opts in.
pub fn configure_connection(
    conn: &mut SqliteConnection,
    busy_timeout: Duration,
) -> Result<(), diesel::result::Error> {
    conn.batch_execute(&format!(
        "PRAGMA foreign_keys = ON; PRAGMA busy_timeout = {};",
        busy_timeout.as_millis()
    ))
}

fn is_in_memory(database_url: &str) -> bool {
    database_url == ":memory:"
        || database_url.starts_with("file::memory:")
        || database_url.contains("mode=memory")
}

pub fn establish_pool(database_url: &str) -> Result<DbPool, StoreError> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    let builder = DbPool::builder().connection_customizer(Box::new(ConnectionOptions {
        busy_timeout: BUSY_TIMEOUT,
    }));

    // Each in-memory connection is its own database, so the pool must hold
    // exactly one that lives as long as the pool.
    let builder = if is_in_memory(database_url) {
        builder.max_size(1).idle_timeout(None).max_lifetime(None)
    } else {
        builder
    };

    Ok(builder.build(manager)?)
}

pub fn run_migrations(conn: &mut SqliteConnection) -> Result<Vec<String>, StoreError> {
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| StoreError::Migration(e.to_string()))?;
    Ok(applied.into_iter().map(|v| v.to_string()).collect())
}

/// Shared handle to the database. Cloning is cheap; every clone uses the
/// same pool.
#[derive(Clone)]
pub struct Store {
    pool: DbPool,
}

impl Store {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn connect(database_url: &str) -> Result<Self, StoreError> {
        Ok(Self::new(establish_pool(database_url)?))
    }

    /// Runs `f` with a pooled connection on the blocking thread pool.
    pub async fn run<F, T>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T, StoreError> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            f(&mut *conn)
        })
        .await
        .map_err(|e| StoreError::Blocking(e.to_string()))?
    }

    pub async fn migrate(&self) -> Result<Vec<String>, StoreError> {
        let applied = self.run(run_migrations).await?;
        if applied.is_empty() {
            info!("database schema is up to date");
        }
        for version in &applied {
            info!(version = %version, "applied migration");
        }
        Ok(applied)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use diesel::{Connection, SqliteConnection};

    use super::{configure_connection, run_migrations, BUSY_TIMEOUT};

    pub fn connection() -> SqliteConnection {
        let mut conn = SqliteConnection::establish(":memory:").unwrap();
        configure_connection(&mut conn, BUSY_TIMEOUT).unwrap();
        run_migrations(&mut conn).unwrap();
        conn
    }
}
