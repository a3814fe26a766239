//! Append-only quote persistence.
//!
//! Handlers reach the store only through the `QuoteStore` trait, which is shared
//! across request tasks as `Arc<dyn QuoteStore>`. The production implementation,
//! `SqliteQuoteStore`, keeps a single `rusqlite::Connection` behind a mutex and
//! runs each insert on the blocking pool so the caller can bound it with a
//! `Deadline`. A statement that outlives its deadline is abandoned by the
//! caller, not interrupted.
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};
use parking_lot::Mutex;
use quote_common::{QuoteError, Result};
use rusqlite::{params, Connection, OptionalExtension};

use crate::model::quote::{Quote, QuoteRecord};

/// Default database file, relative to the working directory.
pub const DEFAULT_DB_PATH: &str = "cotacoes.db";

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS cotacoes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    data DATETIME,
    valor TEXT
)";

const INSERT_QUOTE: &str = "INSERT INTO cotacoes (data, valor) VALUES (?1, ?2)";

/// Write side of the quote store.
#[async_trait]
pub trait QuoteStore: Send + Sync {
    /// Append `quote`, returning the generated row id.
    async fn insert(&self, quote: &Quote) -> Result<i64>;
}

/// SQLite-backed store with one `cotacoes` table.
#[derive(Clone)]
pub struct SqliteQuoteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteQuoteStore {
    /// Open (or create) the database file and ensure the table exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(init_error)?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")
            .map_err(init_error)?;
        info!("Opened quote store at {}", path.display());
        Self::init(conn)
    }

    /// Private in-memory database.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(init_error)?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(CREATE_TABLE).map_err(init_error)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Number of stored quotes.
    pub fn count(&self) -> Result<i64> {
        let conn = self.conn.lock();
        conn.query_row("SELECT COUNT(*) FROM cotacoes", [], |row| row.get(0))
            .map_err(|e| QuoteError::StoreRead(e.to_string()))
    }

    /// Most recently inserted quote, if any.
    pub fn latest(&self) -> Result<Option<QuoteRecord>> {
        let conn = self.conn.lock();
        conn.query_row(
            "SELECT id, data, valor FROM cotacoes ORDER BY id DESC LIMIT 1",
            [],
            |row| {
                Ok(QuoteRecord {
                    id: row.get(0)?,
                    timestamp: row.get(1)?,
                    bid: row.get(2)?,
                })
            },
        )
        .optional()
        .map_err(|e| QuoteError::StoreRead(e.to_string()))
    }
}

#[async_trait]
impl QuoteStore for SqliteQuoteStore {
    async fn insert(&self, quote: &Quote) -> Result<i64> {
        let conn = Arc::clone(&self.conn);
        let timestamp = quote.timestamp.to_rfc3339();
        let bid = quote.bid.clone();

        let id = tokio::task::spawn_blocking(move || -> Result<i64> {
            let conn = conn.lock();
            conn.execute(INSERT_QUOTE, params![timestamp, bid])
                .map_err(|e| QuoteError::StoreWrite(e.to_string()))?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(|e| QuoteError::StoreWrite(e.to_string()))??;

        debug!("Inserted quote row {}", id);
        Ok(id)
    }
}

fn init_error(err: rusqlite::Error) -> QuoteError {
    QuoteError::StoreInit(err.to_string())
}
