//! MiniDNA Storage Layer
//!
//! Implements the `ItemRepository` trait.
//!
//! # Architecture
//!
//! - `SqliteStore`: SQLite-backed catalogue, insertion order kept in an
//!   autoincrement column so "first item for a fingerprint" is well defined
//! - `MemoryStore`: process-local catalogue for tests and ephemeral runs
//!
//! Neither store enforces one canonical item per fingerprint. Two concurrent
//! submissions of the same product can both be stored as canonical.
//!
//! # Examples
//!
//! ```no_run
//! use minidna_store::SqliteStore;
//!
//! let store = SqliteStore::new(":memory:").unwrap();
//! // Store is now ready for item operations
//! ```

#![warn(missing_docs)]

mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use minidna_domain::traits::ItemRepository;
use minidna_domain::{IdentityKey, Item, ItemAttributes, ItemId, NewItem};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Attribute bundle could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Connection lock poisoned by a panicking writer
    #[error("Store lock error: {0}")]
    Lock(String),

    /// Blocking database task was cancelled or panicked
    #[error("Store task error: {0}")]
    Task(String),
}

const ITEM_COLUMNS: &str = "id, source_url, title, description, category, attributes, \
     fingerprint, canonical_id, confidence_score, created_at";

/// SQLite-based implementation of ItemRepository
///
/// The connection sits behind a mutex, so each statement runs alone and id
/// assignment in `create_item` is atomic. Repository calls run on tokio's
/// blocking pool and must be made from within a tokio runtime.
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Create a new SqliteStore with the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use minidna_store::SqliteStore;
    ///
    /// let store = SqliteStore::new("minidna.db").unwrap();
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.execute_batch(include_str!("schema.sql"))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Number of stored items
    pub fn item_count(&self) -> Result<usize, StoreError> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM items", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        lock_connection(&self.conn)
    }

    /// Run `f` against the connection on the blocking pool
    async fn with_connection<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&Connection) -> Result<T, StoreError> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = lock_connection(&conn)?;
            f(&*guard)
        })
        .await
        .map_err(|e| StoreError::Task(format!("Task join error: {}", e)))?
    }

    /// Convert ItemId to bytes for storage
    fn item_id_to_bytes(id: ItemId) -> Vec<u8> {
        id.value().to_be_bytes().to_vec()
    }

    /// Convert bytes to ItemId
    fn bytes_to_item_id(bytes: &[u8]) -> Result<ItemId, StoreError> {
        let arr: [u8; 16] = bytes.try_into().map_err(|_| {
            StoreError::InvalidData(format!("Expected 16 bytes for ItemId, got {}", bytes.len()))
        })?;
        Ok(ItemId::from_value(u128::from_be_bytes(arr)))
    }

    /// Map a row selected with `ITEM_COLUMNS` to an Item
    fn row_to_item(row: &Row<'_>) -> rusqlite::Result<Item> {
        let id_bytes: Vec<u8> = row.get(0)?;
        let id = Self::bytes_to_item_id(&id_bytes).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Blob, Box::new(e))
        })?;

        let attributes_json: String = row.get(5)?;
        let attributes: ItemAttributes = serde_json::from_str(&attributes_json).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(e))
        })?;

        let canonical_bytes: Option<Vec<u8>> = row.get(7)?;
        let canonical_id = canonical_bytes
            .map(|bytes| Self::bytes_to_item_id(&bytes))
            .transpose()
            .map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    7,
                    rusqlite::types::Type::Blob,
                    Box::new(e),
                )
            })?;

        let fingerprint: String = row.get(6)?;

        Ok(Item {
            id,
            source_url: row.get(1)?,
            title: row.get(2)?,
            description: row.get(3)?,
            category: row.get(4)?,
            attributes,
            fingerprint: IdentityKey::new(fingerprint),
            canonical_id,
            confidence_score: row.get(8)?,
            created_at: row.get::<_, i64>(9)? as u64,
        })
    }
}

fn lock_connection(conn: &Mutex<Connection>) -> Result<MutexGuard<'_, Connection>, StoreError> {
    conn.lock().map_err(|e| StoreError::Lock(e.to_string()))
}

pub(crate) fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

#[async_trait]
impl ItemRepository for SqliteStore {
    type Error = StoreError;

    async fn find_first_by_fingerprint(
        &self,
        key: &IdentityKey,
    ) -> Result<Option<Item>, Self::Error> {
        let key = key.as_str().to_string();
        self.with_connection(move |conn| {
            let sql = format!(
                "SELECT {} FROM items WHERE fingerprint = ?1 ORDER BY seq ASC LIMIT 1",
                ITEM_COLUMNS
            );
            let item = conn
                .query_row(&sql, params![key], Self::row_to_item)
                .optional()?;
            Ok(item)
        })
        .await
    }

    async fn create_item(&self, item: NewItem) -> Result<Item, Self::Error> {
        self.with_connection(move |conn| {
            let id = ItemId::new();
            let created_at = unix_now();
            let attributes_json = serde_json::to_string(&item.attributes)?;

            conn.execute(
                "INSERT INTO items (id, source_url, title, description, category, attributes,
                                    fingerprint, canonical_id, confidence_score, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                params![
                    Self::item_id_to_bytes(id),
                    &item.source_url,
                    &item.title,
                    &item.description,
                    &item.category,
                    attributes_json,
                    item.fingerprint.as_str(),
                    item.canonical_id.map(Self::item_id_to_bytes),
                    item.confidence_score,
                    created_at as i64,
                ],
            )?;

            debug!(item_id = %id, fingerprint = %item.fingerprint, "Item stored");
            Ok(item.into_item(id, created_at))
        })
        .await
    }

    async fn get_item(&self, id: ItemId) -> Result<Option<Item>, Self::Error> {
        self.with_connection(move |conn| {
            let sql = format!("SELECT {} FROM items WHERE id = ?1", ITEM_COLUMNS);
            let item = conn
                .query_row(&sql, params![Self::item_id_to_bytes(id)], Self::row_to_item)
                .optional()?;
            Ok(item)
        })
        .await
    }
}
