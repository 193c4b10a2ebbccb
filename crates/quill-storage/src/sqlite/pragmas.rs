//! PRAGMA configuration applied to the report database connection.
//!
//! WAL mode, NORMAL sync, configurable busy_timeout, foreign_keys ON.

use quill_core::errors::QuillResult;
use rusqlite::Connection;

use crate::to_storage_err;

pub fn apply_pragmas(conn: &Connection, busy_timeout_ms: u32) -> QuillResult<()> {
    conn.execute_batch(&format!(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA cache_size = -16000;
        PRAGMA busy_timeout = {busy_timeout_ms};
        PRAGMA foreign_keys = ON;
        "
    ))
    .map_err(|e| to_storage_err("apply_pragmas", e))
}

/// Whether WAL mode is active. In-memory databases report `memory`.
pub fn verify_wal_mode(conn: &Connection) -> QuillResult<bool> {
    let mode: String = conn
        .pragma_query_value(None, "journal_mode", |row| row.get(0))
        .map_err(|e| to_storage_err("verify_wal_mode", e))?;
    Ok(mode.eq_ignore_ascii_case("wal"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_database_runs_in_wal_mode() {
        let dir = tempfile::tempdir().unwrap();
        let conn = Connection::open(dir.path().join("wal.db")).unwrap();
        apply_pragmas(&conn, 1_000).unwrap();
        assert!(verify_wal_mode(&conn).unwrap());
    }

    #[test]
    fn in_memory_database_reports_memory_journal() {
        let conn = Connection::open_in_memory().unwrap();
        apply_pragmas(&conn, 0).unwrap();
        assert!(!verify_wal_mode(&conn).unwrap());
    }
}
