//! Database connection management.

use std::path::Path;
use std::time::Duration;

use rusqlite::functions::FunctionFlags;
use rusqlite::{Connection, OpenFlags};
use tracing::debug;

use super::error::{StoreError, StoreResult};
use super::schema::SCHEMA_SQL;

/// How long a connection waits on a locked database file before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Database open mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    /// Read-write access to an existing database file
    ReadWrite,
    /// Create new database if it doesn't exist
    Create,
}

/// SQLite connection to the inventory database.
///
/// One `ProductStore` is opened per request and dropped when the request
/// finishes; it is never shared between threads.
#[derive(Debug)]
pub struct ProductStore {
    pub(crate) conn: Connection,
}

impl ProductStore {
    /// Open or create a database at a custom path.
    pub fn open<P: AsRef<Path>>(path: P, mode: OpenMode) -> StoreResult<Self> {
        let path = path.as_ref();
        let flags = match mode {
            OpenMode::ReadWrite => {
                if !path.exists() {
                    return Err(StoreError::DatabaseNotFound(path.to_owned()));
                }
                OpenFlags::SQLITE_OPEN_READ_WRITE
            }
            OpenMode::Create => OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE,
        };

        let conn = Connection::open_with_flags(path, flags).map_err(|e| StoreError::DatabaseOpen {
            path: path.to_owned(),
            source: e,
        })?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        register_functions(&conn)?;
        let store = Self { conn };

        if mode == OpenMode::Create {
            store.configure_pragmas()?;
        }

        debug!("Opened database at {} ({:?})", path.display(), mode);
        Ok(store)
    }

    /// Create an in-memory database (for testing).
    ///
    /// The database is initialized with the full schema.
    pub fn open_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        register_functions(&conn)?;
        let store = Self { conn };
        store.create_schema()?;
        debug!("Created in-memory database");
        Ok(store)
    }

    /// Configure SQLite pragmas for concurrent request handling.
    fn configure_pragmas(&self) -> StoreResult<()> {
        self.conn.execute_batch(
            r#"
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            "#,
        )?;
        Ok(())
    }

    /// Create the products table if it does not exist yet.
    pub fn create_schema(&self) -> StoreResult<()> {
        self.conn.execute_batch(SCHEMA_SQL)?;
        debug!("Ensured products schema");
        Ok(())
    }

    /// Check if the database has the products table.
    pub fn has_schema(&self) -> StoreResult<bool> {
        let count: i32 = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='products'",
            [],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }
}

/// Install the SQL functions the queries rely on.
///
/// `fold_case(text)` lowercases with Unicode rules; SQLite's built-in
/// `lower()` only folds ASCII, so `Á` would never match `á`.
fn register_functions(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        "fold_case",
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let text = ctx.get::<Option<String>>(0)?;
            Ok(text.map(|t| t.to_lowercase()))
        },
    )
}
