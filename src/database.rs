//! The local SQLite file that holds trips and expenses.
//!
//! The file is opened lazily: nothing touches the disk until the first store
//! operation, after which the same connection is reused for the lifetime of
//! the [Database] (and every clone of it).

use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex, OnceLock},
};

use rusqlite::Connection;

use crate::{
    Error,
    stores::sqlite::{create_expense_table, create_trip_table},
};

/// The fixed name of the store.
pub const DB_NAME: &str = "travel-expense-db";

/// The schema version written by this version of the application.
pub const DB_VERSION: i64 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Location {
    File(PathBuf),
    InMemory,
}

#[derive(Debug)]
struct LazyConnection {
    location: Location,
    /// Empty until the first successful open.
    connection: Mutex<Option<Arc<Mutex<Connection>>>>,
}

/// A lazily opened, memoized handle to the store file.
///
/// Cloning a `Database` is cheap and every clone shares the same connection.
#[derive(Debug, Clone)]
pub struct Database {
    inner: Arc<LazyConnection>,
}

impl Database {
    /// Create a handle to the store file at `path`.
    ///
    /// The file is not opened (or created) until it is first used.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::with_location(Location::File(path.into()))
    }

    /// Create a handle to a fresh in-memory store.
    ///
    /// The store lives as long as the last clone of the handle.
    pub fn in_memory() -> Self {
        Self::with_location(Location::InMemory)
    }

    fn with_location(location: Location) -> Self {
        Self {
            inner: Arc::new(LazyConnection {
                location,
                connection: Mutex::new(None),
            }),
        }
    }

    /// The path used when no other path is configured, relative to the
    /// working directory.
    pub fn default_path() -> PathBuf {
        PathBuf::from(format!("{DB_NAME}.sqlite"))
    }

    /// The process-wide store.
    ///
    /// The first call decides the path; later calls return the same handle
    /// and ignore `path`.
    pub fn shared(path: impl AsRef<Path>) -> &'static Database {
        static SHARED: OnceLock<Database> = OnceLock::new();

        SHARED.get_or_init(|| {
            tracing::debug!("Creating shared store handle for {:?}", path.as_ref());
            Database::open(path.as_ref())
        })
    }

    /// The path of the store file, or `None` for an in-memory store.
    pub fn path(&self) -> Option<&Path> {
        match &self.inner.location {
            Location::File(path) => Some(path),
            Location::InMemory => None,
        }
    }

    /// Get the shared connection, opening the store file on first use.
    ///
    /// Concurrent first callers are serialized so only one connection is
    /// ever opened. If opening fails nothing is memoized and the next call
    /// tries again.
    ///
    /// # Errors
    ///
    /// Returns an:
    /// - [Error::StorageUnavailable] if the file cannot be opened or its
    ///   schema cannot be created,
    /// - [Error::UnsupportedSchemaVersion] if the file is from a newer version,
    /// - [Error::DatabaseLockError] if the lock is poisoned.
    pub fn connection(&self) -> Result<Arc<Mutex<Connection>>, Error> {
        let mut slot = self
            .inner
            .connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?;

        if let Some(connection) = slot.as_ref() {
            return Ok(connection.clone());
        }

        let connection = Arc::new(Mutex::new(self.connect()?));
        *slot = Some(connection.clone());

        Ok(connection)
    }

    /// Run `operation` with exclusive access to the connection.
    pub(crate) fn with_connection<T>(
        &self,
        operation: impl FnOnce(&Connection) -> Result<T, Error>,
    ) -> Result<T, Error> {
        let connection = self.connection()?;
        let connection = connection.lock().map_err(|_| Error::DatabaseLockError)?;

        operation(&connection)
    }

    fn connect(&self) -> Result<Connection, Error> {
        let connection = match &self.inner.location {
            Location::File(path) => {
                tracing::info!("Opening store at {}", path.display());
                Connection::open(path)
            }
            Location::InMemory => {
                tracing::debug!("Opening in-memory store");
                Connection::open_in_memory()
            }
        }
        .map_err(|error| {
            tracing::error!("Could not open store: {error}");
            Error::StorageUnavailable(error)
        })?;

        initialize(&connection)?;

        Ok(connection)
    }
}

/// Create the tables and indexes for trips and expenses.
///
/// Safe to call on a store that is already initialized.
///
/// # Errors
///
/// Returns an [Error::UnsupportedSchemaVersion] if the store was written by a
/// newer version, or an [Error::StorageUnavailable] if the schema could not
/// be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let version: i64 = connection
        .query_row("PRAGMA user_version;", [], |row| row.get(0))
        .map_err(Error::StorageUnavailable)?;

    if version > DB_VERSION {
        return Err(Error::UnsupportedSchemaVersion(version));
    }

    let transaction = connection
        .unchecked_transaction()
        .map_err(Error::StorageUnavailable)?;

    create_trip_table(&transaction).map_err(Error::StorageUnavailable)?;
    create_expense_table(&transaction).map_err(Error::StorageUnavailable)?;
    transaction
        .execute_batch(&format!("PRAGMA user_version = {DB_VERSION};"))
        .map_err(Error::StorageUnavailable)?;

    transaction.commit().map_err(Error::StorageUnavailable)?;

    Ok(())
}
