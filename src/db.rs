//! Database initialization and the process-wide connection cache.

use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use rusqlite::Connection;

use crate::{Error, transaction::create_transaction_table};

/// Set up the application database tables on `connection`.
///
/// Safe to call on every connection open, tables are only created if they do
/// not already exist.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    create_transaction_table(connection)?;

    Ok(())
}

/// Where a [ConnectionCache] opens its database from.
#[derive(Debug, Clone)]
enum Source {
    /// A SQLite database file on disk.
    File(PathBuf),
    /// An in-memory database, used for tests.
    Memory,
}

/// A lazily initialized, memoized SQLite connection.
///
/// The connection is opened and initialized on the first call to
/// [ConnectionCache::acquire] and reused for every call after that. If opening
/// the database fails, nothing is memoized and the next call retries from
/// scratch. The mutex around the cached slot doubles as an initialization
/// guard, so only one open attempt is ever in flight.
#[derive(Debug)]
pub struct ConnectionCache {
    source: Source,
    slot: Mutex<Option<Arc<Mutex<Connection>>>>,
}

impl ConnectionCache {
    /// Create a cache that opens the SQLite database file at `path`.
    ///
    /// The file is not opened until the first call to
    /// [ConnectionCache::acquire].
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            source: Source::File(path.as_ref().to_path_buf()),
            slot: Mutex::new(None),
        }
    }

    /// Create a cache backed by an in-memory SQLite database.
    pub fn in_memory() -> Self {
        Self {
            source: Source::Memory,
            slot: Mutex::new(None),
        }
    }

    /// Get the cached database connection, opening and initializing it first
    /// if necessary.
    ///
    /// # Errors
    /// Returns [Error::Unavailable] if the database cannot be opened,
    /// [Error::DatabaseLockError] if the cache lock is poisoned, or an SQL
    /// error if the schema cannot be created.
    pub fn acquire(&self) -> Result<Arc<Mutex<Connection>>, Error> {
        let mut slot = self.slot.lock().map_err(|_| Error::DatabaseLockError)?;

        if let Some(connection) = slot.as_ref() {
            return Ok(Arc::clone(connection));
        }

        let connection = match &self.source {
            Source::File(path) => Connection::open(path).map_err(|error| Error::Unavailable {
                path: path.display().to_string(),
                reason: error.to_string(),
            })?,
            Source::Memory => {
                Connection::open_in_memory().map_err(|error| Error::Unavailable {
                    path: ":memory:".to_owned(),
                    reason: error.to_string(),
                })?
            }
        };

        initialize(&connection)?;

        let connection = Arc::new(Mutex::new(connection));
        *slot = Some(Arc::clone(&connection));

        Ok(connection)
    }
}
