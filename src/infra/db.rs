//! SQLite connection manager and migrations.
//!
//! `DbPool` owns at most one open `Connection`. It is opened lazily on the
//! first `acquire`, reopened after `close`, and handed out behind a guard so
//! the lock is released on every exit path. All callers run on the UI thread;
//! the mutex is what a future multi-threaded caller would contend on.

use crate::error::AppError;
use rusqlite::Connection;
use std::fmt;
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Where the database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbLocation {
    File(PathBuf),
    /// Private in-memory database. Closing it discards its contents.
    Memory,
}

impl fmt::Display for DbLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Memory => f.write_str(":memory:"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub location: DbLocation,
}

impl DbConfig {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            location: DbLocation::File(path.into()),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            location: DbLocation::Memory,
        }
    }
}

pub struct DbPool {
    location: DbLocation,
    conn: Mutex<Option<Connection>>,
}

/// Exclusive access to the open connection for the duration of one operation.
pub struct ConnGuard<'a> {
    slot: MutexGuard<'a, Option<Connection>>,
}

impl Deref for ConnGuard<'_> {
    type Target = Connection;

    fn deref(&self) -> &Connection {
        // acquire() only builds a guard after filling the slot
        self.slot.as_ref().expect("connection present while guarded")
    }
}

impl DbPool {
    /// Build the manager without touching the database.
    pub fn new(config: DbConfig) -> Self {
        Self {
            location: config.location,
            conn: Mutex::new(None),
        }
    }

    pub fn location(&self) -> &DbLocation {
        &self.location
    }

    fn slot(&self) -> MutexGuard<'_, Option<Connection>> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Return the live connection, opening (and migrating) it if none is held.
    pub fn acquire(&self) -> Result<ConnGuard<'_>, AppError> {
        let mut slot = self.slot();
        if slot.is_none() {
            let conn = open_connection(&self.location).map_err(|e| {
                log::error!("Cannot open database at {}: {}", self.location, e);
                e
            })?;
            log::info!("Database connection established: {}", self.location);
            *slot = Some(conn);
        }
        Ok(ConnGuard { slot })
    }

    /// True while a handle is held. Never opens one.
    pub fn is_connected(&self) -> bool {
        self.slot().is_some()
    }

    /// Release the held handle. A no-op when already closed.
    pub fn close(&self) {
        let mut slot = self.slot();
        if let Some(conn) = slot.take() {
            match conn.close() {
                Ok(()) => log::info!("Database connection closed: {}", self.location),
                Err((_, e)) => log::error!("Error closing database {}: {}", self.location, e),
            }
        }
    }

    /// Startup health check: acquire and run a trivial probe.
    pub fn test_connection(&self) -> bool {
        let probe = self.acquire().and_then(|conn| {
            conn.query_row("SELECT 1", [], |r| r.get::<_, i64>(0))
                .map_err(AppError::from)
        });
        match probe {
            Ok(_) => {
                log::info!("Connection test succeeded: {}", self.location);
                true
            }
            Err(e) => {
                log::error!("Connection test failed: {}", e);
                false
            }
        }
    }
}

fn open_connection(location: &DbLocation) -> Result<Connection, AppError> {
    let mut conn = match location {
        DbLocation::File(path) => {
            ensure_parent_dir(path)?;
            Connection::open(path).map_err(|e| AppError::Connection(e.to_string()))?
        }
        DbLocation::Memory => {
            Connection::open_in_memory().map_err(|e| AppError::Connection(e.to_string()))?
        }
    };
    run_migrations(&mut conn)
        .map_err(|e| AppError::Connection(format!("migration failed: {}", e)))?;
    Ok(conn)
}

fn ensure_parent_dir(path: &Path) -> Result<(), AppError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent)
            .map_err(|e| AppError::Connection(format!("{}: {}", parent.display(), e))),
        _ => Ok(()),
    }
}

const MIGRATIONS: &[(i32, &str)] = &[(1, include_str!("../../migrations/0001_init.sql"))];

fn run_migrations(conn: &mut Connection) -> Result<(), AppError> {
    let tx = conn.transaction()?;

    tx.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (version INTEGER PRIMARY KEY, applied_at TEXT NOT NULL DEFAULT (datetime('now')))",
        [],
    )?;

    let applied: Vec<i32> = tx
        .prepare("SELECT version FROM schema_migrations ORDER BY version")?
        .query_map([], |r| r.get(0))?
        .collect::<Result<Vec<_>, _>>()?;

    for (version, sql) in MIGRATIONS {
        if applied.contains(version) {
            continue;
        }
        // The version row is recorded below, not by the script itself
        let statements = sql
            .split(';')
            .map(str::trim)
            .filter(|s| !s.is_empty() && !s.contains("INSERT INTO schema_migrations"));
        for stmt in statements {
            tx.execute(stmt, [])?;
        }
        tx.execute(
            "INSERT INTO schema_migrations (version, applied_at) VALUES (?1, datetime('now'))",
            [version],
        )?;
        log::info!("Applied migration {}", version);
    }

    tx.commit()?;
    Ok(())
}

/// In-memory pool, already opened and migrated. For tests.
pub fn init_test_db() -> DbPool {
    let pool = DbPool::new(DbConfig::in_memory());
    if let Err(e) = pool.acquire() {
        panic!("in-memory database failed to open: {}", e);
    }
    pool
}
