use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};

use crate::config::Config;
use crate::model::{DirectoryItem, StoredData};

pub const STORAGE_KEY: &str = "folder-launcher-directories";

#[derive(Debug)]
pub enum StoreError {
    Sqlite(rusqlite::Error),
    Serialize(serde_json::Error),
    Io(std::io::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(error) => write!(f, "sqlite error: {error}"),
            Self::Serialize(error) => write!(f, "serialize error: {error}"),
            Self::Io(error) => write!(f, "io error: {error}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

pub fn open_memory() -> Result<Connection, StoreError> {
    let conn = Connection::open_in_memory()?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn open_file(path: &Path) -> Result<Connection, StoreError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let conn = Connection::open(path)?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn open_from_config(config: &Config) -> Result<Connection, StoreError> {
    open_file(&config.store_db_path)
}

fn init_schema(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS storage (key TEXT PRIMARY KEY, value TEXT NOT NULL)",
        [],
    )?;
    Ok(())
}

pub fn read_value(db: &Connection, key: &str) -> Result<Option<String>, StoreError> {
    let value = db
        .query_row(
            "SELECT value FROM storage WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()?;
    Ok(value)
}

pub fn write_value(db: &Connection, key: &str, value: &str) -> Result<(), StoreError> {
    db.execute(
        "INSERT INTO storage (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

/// Reads the persisted collection. Nothing stored, unreadable storage or a
/// malformed document all yield an empty collection.
pub fn load_directories(db: &Connection) -> Vec<DirectoryItem> {
    let raw = match read_value(db, STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(error) => {
            crate::logging::warn(&format!("failed to read stored directories: {error}"));
            return Vec::new();
        }
    };

    if raw.trim().is_empty() {
        return Vec::new();
    }

    match serde_json::from_str::<StoredData>(&raw) {
        Ok(data) => data.directories,
        Err(error) => {
            crate::logging::warn(&format!("ignoring malformed stored directories: {error}"));
            Vec::new()
        }
    }
}

/// Overwrites the stored collection with `directories`.
pub fn persist_directories(db: &Connection, directories: &[DirectoryItem]) -> Result<(), StoreError> {
    let data = StoredData {
        directories: directories.to_vec(),
    };
    let raw = serde_json::to_string(&data)?;
    write_value(db, STORAGE_KEY, &raw)
}

/// Reconciles stored usage with a fresh scan.
///
/// Existing items whose path is gone from disk are dropped. Scanned paths not
/// yet known become new items with a frecency of 1. Known paths keep their
/// usage untouched. The result holds at most one item per path; duplicate
/// stored entries resolve to the last one seen.
pub fn merge_directories(existing: &[DirectoryItem], scanned: &[String]) -> Vec<DirectoryItem> {
    let mut merged: Vec<DirectoryItem> = Vec::with_capacity(existing.len() + scanned.len());
    let mut positions: HashMap<String, usize> = HashMap::with_capacity(merged.capacity());

    for item in existing {
        if !Path::new(&item.path).exists() {
            continue;
        }
        match positions.get(&item.path) {
            Some(&index) => merged[index] = item.clone(),
            None => {
                positions.insert(item.path.clone(), merged.len());
                merged.push(item.clone());
            }
        }
    }

    for path in scanned {
        if positions.contains_key(path) {
            continue;
        }
        positions.insert(path.clone(), merged.len());
        merged.push(DirectoryItem::discovered(path));
    }

    merged
}
