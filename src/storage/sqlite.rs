//! Implements a SQLite backed key-value store.

use std::path::Path;

use rusqlite::{Connection, OptionalExtension};

use crate::{Error, storage::KeyValueStore};

/// A key-value store backed by a single-table SQLite database.
///
/// This is the durable storage medium: each key holds one serialized record
/// list, and writes replace the whole value. The connection is owned rather
/// than shared because the tracker is single-user and single-threaded by
/// design.
#[derive(Debug)]
pub struct SqliteStore {
    connection: Connection,
}

impl SqliteStore {
    /// Open (creating if necessary) the database at `path` and ensure the
    /// storage table exists.
    ///
    /// # Errors
    /// Returns [Error::Sql] if the database cannot be opened or the table
    /// cannot be created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let connection = Connection::open(path)?;

        Self::with_connection(connection)
    }

    /// Open a store that lives only as long as the process.
    ///
    /// # Errors
    /// Returns [Error::Sql] if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self, Error> {
        let connection = Connection::open_in_memory()?;

        Self::with_connection(connection)
    }

    fn with_connection(connection: Connection) -> Result<Self, Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS storage (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            (),
        )?;

        Ok(Self { connection })
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        self.connection
            .prepare("SELECT value FROM storage WHERE key = :key")?
            .query_row(&[(":key", key)], |row| row.get(0))
            .optional()
            .map_err(|error| error.into())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Error> {
        self.connection.execute(
            "INSERT INTO storage (key, value) VALUES (?1, ?2)
                ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            (key, value),
        )?;

        Ok(())
    }
}
