//! Single connection behind `tokio::sync::Mutex`.
//! Every read and write is serialized through it.

use std::path::Path;

use quill_core::errors::QuillResult;
use rusqlite::Connection;
use tokio::sync::Mutex;

use super::migrations::run_migrations;
use super::pragmas::apply_pragmas;
use crate::to_storage_err;

pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    /// Open (or create) the database at `path` and bring its schema up to date.
    pub fn open(path: &Path, busy_timeout_ms: u32) -> QuillResult<Self> {
        let conn = Connection::open(path).map_err(|e| to_storage_err("open", e))?;
        Self::prepare(conn, busy_timeout_ms)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> QuillResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err("open", e))?;
        Self::prepare(conn, 0)
    }

    fn prepare(conn: Connection, busy_timeout_ms: u32) -> QuillResult<Self> {
        apply_pragmas(&conn, busy_timeout_ms)?;
        run_migrations(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Acquire the lock and execute a closure with the connection.
    pub async fn with_conn<F, T>(&self, f: F) -> QuillResult<T>
    where
        F: FnOnce(&Connection) -> QuillResult<T>,
    {
        let guard = self.conn.lock().await;
        f(&guard)
    }
}

impl std::fmt::Debug for WriteConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WriteConnection").finish_non_exhaustive()
    }
}
