//! Embedded document store used as the driver under test.
//!
//! A single collection of JSON documents kept in SQLite. Each document is
//! stored as serialized text keyed by an integer id, which is enough surface
//! for the CRUD-style workloads: command round trips, point lookups, inserts
//! one at a time or in bulk, and full scans.

use rusqlite::{Connection, OptionalExtension, params};
use serde_json::Value;
use thiserror::Error;

const CREATE_COLLECTION: &str =
    "CREATE TABLE IF NOT EXISTS perftest (id INTEGER PRIMARY KEY, body TEXT NOT NULL)";
const DROP_COLLECTION: &str = "DROP TABLE IF EXISTS perftest";
const INSERT_DOCUMENT: &str = "INSERT INTO perftest (body) VALUES (?1)";
const FIND_BY_ID: &str = "SELECT body FROM perftest WHERE id = ?1";
const FIND_ALL: &str = "SELECT body FROM perftest ORDER BY id";
const COUNT: &str = "SELECT COUNT(*) FROM perftest";

/// Errors from the document store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Document encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("Unexpected command reply: {0}")]
    CommandFailed(i64),
}

/// Connection to a single-collection document store.
pub struct DocumentStore {
    conn: Connection,
}

impl DocumentStore {
    /// Open a private in-memory store with an empty collection.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        conn.execute(CREATE_COLLECTION, [])?;
        Ok(Self { conn })
    }

    /// Round-trip a trivial command to the engine.
    pub fn ping(&self) -> Result<(), StoreError> {
        let reply: i64 = self
            .conn
            .prepare_cached("SELECT 1")?
            .query_row([], |row| row.get(0))?;
        if reply != 1 {
            return Err(StoreError::CommandFailed(reply));
        }
        Ok(())
    }

    /// Drop the collection and recreate it empty.
    pub fn reset(&self) -> Result<(), StoreError> {
        self.conn.execute(DROP_COLLECTION, [])?;
        self.conn.execute(CREATE_COLLECTION, [])?;
        Ok(())
    }

    /// Insert one document, returning its id.
    pub fn insert_one(&self, doc: &Value) -> Result<i64, StoreError> {
        let body = serde_json::to_string(doc)?;
        self.conn.prepare_cached(INSERT_DOCUMENT)?.execute(params![body])?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Insert documents in a single transaction, returning how many were
    /// written. Ids continue from the current maximum.
    pub fn insert_many<'a, I>(&mut self, docs: I) -> Result<usize, StoreError>
    where
        I: IntoIterator<Item = &'a Value>,
    {
        let tx = self.conn.transaction()?;
        let mut inserted = 0;
        {
            let mut stmt = tx.prepare_cached(INSERT_DOCUMENT)?;
            for doc in docs {
                stmt.execute(params![serde_json::to_string(doc)?])?;
                inserted += 1;
            }
        }
        tx.commit()?;
        Ok(inserted)
    }

    /// Fetch a document by id.
    pub fn find_by_id(&self, id: i64) -> Result<Option<Value>, StoreError> {
        let body: Option<String> = self
            .conn
            .prepare_cached(FIND_BY_ID)?
            .query_row(params![id], |row| row.get(0))
            .optional()?;
        body.map(|b| serde_json::from_str(&b)).transpose().map_err(Into::into)
    }

    /// Decode every document in id order, handing each to `f`.
    ///
    /// Returns the number of documents visited.
    pub fn for_each_document<F>(&self, mut f: F) -> Result<usize, StoreError>
    where
        F: FnMut(Value),
    {
        let mut stmt = self.conn.prepare_cached(FIND_ALL)?;
        let mut rows = stmt.query([])?;
        let mut visited = 0;
        while let Some(row) = rows.next()? {
            let body: String = row.get(0)?;
            f(serde_json::from_str(&body)?);
            visited += 1;
        }
        Ok(visited)
    }

    /// Number of documents in the collection.
    pub fn count(&self) -> Result<usize, StoreError> {
        let count: i64 = self.conn.query_row(COUNT, [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or(0))
    }
}
