//! Durable key/value store of string lists
//!
//! Backs the cached title-id lists and the favorites sets. Each key maps to
//! one JSON-encoded array of strings in a single SQLite table.

use crate::error::{Error, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// Key for the cached popular-title ids
pub const POPULAR_TITLES_KEY: &str = "popularTitles";
/// Key for the cached coming-soon title ids
pub const COMING_SOON_TITLES_KEY: &str = "comingSoonTitles";

/// File name of the database inside the data directory
pub const DB_FILE_NAME: &str = "moviedex.db";

/// SQLite-backed list store.
///
/// The connection sits behind a mutex, so a store can be shared across
/// tasks and each read-modify-write runs without interleaving.
#[derive(Debug)]
pub struct ListStore {
    conn: Mutex<Connection>,
}

impl ListStore {
    /// Opens (or creates) the database at `path` and initialises the schema.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        log::info!("List store: {}", path.display());
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    /// Opens `moviedex.db` inside `data_dir`.
    pub fn open_in(data_dir: &Path) -> Result<Self> {
        Self::open(&data_dir.join(DB_FILE_NAME))
    }

    /// Non-persistent store for tests and dry runs
    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| Error::Io(std::io::Error::other("list store lock poisoned")))
    }

    /// The list stored under `key`, empty when absent.
    pub fn get_list(&self, key: &str) -> Result<Vec<String>> {
        let conn = self.lock()?;
        read_list(&conn, key)
    }

    /// Replace the list stored under `key`.
    pub fn set_list(&self, key: &str, items: &[String]) -> Result<()> {
        let conn = self.lock()?;
        write_list(&conn, key, items)
    }

    /// Read, transform and write back the list under `key` while holding the lock.
    pub fn update_list<T>(
        &self,
        key: &str,
        update: impl FnOnce(&mut Vec<String>) -> T,
    ) -> Result<T> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        let mut items = read_list(&tx, key)?;
        let out = update(&mut items);
        write_list(&tx, key, &items)?;
        tx.commit()?;
        Ok(out)
    }

    pub fn popular_titles(&self) -> Result<Vec<String>> {
        self.get_list(POPULAR_TITLES_KEY)
    }

    pub fn set_popular_titles(&self, ids: &[String]) -> Result<()> {
        self.set_list(POPULAR_TITLES_KEY, ids)
    }

    pub fn coming_soon_titles(&self) -> Result<Vec<String>> {
        self.get_list(COMING_SOON_TITLES_KEY)
    }

    pub fn set_coming_soon_titles(&self, ids: &[String]) -> Result<()> {
        self.set_list(COMING_SOON_TITLES_KEY, ids)
    }

    /// Drop every stored list.
    pub fn clear(&self) -> Result<()> {
        let conn = self.lock()?;
        let removed = conn.execute("DELETE FROM string_lists", [])?;
        log::info!("Cleared {} stored lists", removed);
        Ok(())
    }
}

/// Creates the `string_lists` table if it does not already exist.
fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS string_lists (
            key         TEXT NOT NULL PRIMARY KEY,
            items       TEXT NOT NULL,
            updated_at  TEXT NOT NULL DEFAULT (datetime('now'))
        );",
    )
}

fn read_list(conn: &Connection, key: &str) -> Result<Vec<String>> {
    let raw: Option<String> = conn
        .query_row(
            "SELECT items FROM string_lists WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()?;

    match raw {
        Some(json) => serde_json::from_str(&json).map_err(|e| {
            log::warn!("Stored list {:?} is not a string array: {}", key, e);
            Error::Decoding(format!("stored list {:?}: {}", key, e))
        }),
        None => Ok(Vec::new()),
    }
}

fn write_list(conn: &Connection, key: &str, items: &[String]) -> Result<()> {
    let json = serde_json::to_string(items)?;
    conn.execute(
        "INSERT INTO string_lists (key, items, updated_at)
         VALUES (?1, ?2, datetime('now'))
         ON CONFLICT(key) DO UPDATE SET
            items      = excluded.items,
            updated_at = excluded.updated_at",
        params![key, json],
    )?;
    log::debug!("Stored {} items under {:?}", items.len(), key);
    Ok(())
}
