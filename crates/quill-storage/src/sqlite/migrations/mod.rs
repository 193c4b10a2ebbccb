//! Schema migrations using PRAGMA user_version.

pub mod v001_reports;

use quill_core::errors::StorageError;
use rusqlite::Connection;

/// Ordered (sql, version) pairs.
const MIGRATIONS: &[(&str, u32)] = &[(v001_reports::MIGRATION_SQL, 1)];

/// Run all pending migrations.
pub fn run_migrations(conn: &Connection) -> Result<(), StorageError> {
    let current = current_version(conn)?;

    for (sql, version) in MIGRATIONS {
        if current < *version {
            conn.execute_batch(sql)
                .map_err(|e| StorageError::MigrationFailed {
                    version: *version,
                    reason: e.to_string(),
                })?;
            conn.pragma_update(None, "user_version", version)
                .map_err(|e| StorageError::MigrationFailed {
                    version: *version,
                    reason: e.to_string(),
                })?;
            tracing::info!(version = version, "applied migration");
        }
    }

    Ok(())
}

/// Current schema version.
pub fn current_version(conn: &Connection) -> Result<u32, StorageError> {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(|e| StorageError::MigrationFailed {
            version: 0,
            reason: e.to_string(),
        })
}

/// Highest version this build knows about.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |(_, v)| *v)
}
