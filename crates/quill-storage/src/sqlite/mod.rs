//! SQLite-backed report store.

pub mod migrations;
pub mod pragmas;
pub mod write_connection;

use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use quill_core::config::StorageConfig;
use quill_core::errors::QuillResult;
use quill_core::models::{NewReport, ReportKey, ReportRecord};
use quill_core::traits::IReportStore;
use quill_observability::store_span;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::Instrument;

pub use write_connection::WriteConnection;

use crate::{build_record, next_created_at, to_storage_err};

const SELECT_COLUMNS: &str =
    "id, subject, report_type, version, content, prompt_used, content_hash, created_at";

/// Report log persisted to SQLite. `created_at` is stored as RFC 3339 with
/// microseconds so lexical and chronological order agree.
#[derive(Debug)]
pub struct SqliteReportStore {
    writer: WriteConnection,
}

impl SqliteReportStore {
    pub fn open(path: &Path) -> QuillResult<Self> {
        Self::open_with(path, StorageConfig::default().busy_timeout_ms)
    }

    pub fn open_with(path: &Path, busy_timeout_ms: u32) -> QuillResult<Self> {
        Ok(Self {
            writer: WriteConnection::open(path, busy_timeout_ms)?,
        })
    }

    /// Open the database named by `[storage]`, relative to `root` unless
    /// the configured path is absolute.
    pub fn from_config(root: &Path, config: &StorageConfig) -> QuillResult<Self> {
        Self::open_with(&root.join(&config.db_path), config.busy_timeout_ms)
    }

    pub fn open_in_memory() -> QuillResult<Self> {
        Ok(Self {
            writer: WriteConnection::open_in_memory()?,
        })
    }

    pub async fn schema_version(&self) -> QuillResult<u32> {
        self.writer
            .with_conn(|conn| Ok(migrations::current_version(conn)?))
            .await
    }
}

fn format_ts(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_ts(raw: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(7, rusqlite::types::Type::Text, Box::new(e))
        })
}

fn row_to_record(row: &Row<'_>) -> rusqlite::Result<ReportRecord> {
    let created_at: String = row.get(7)?;
    Ok(ReportRecord {
        id: row.get(0)?,
        subject: row.get(1)?,
        report_type: row.get(2)?,
        version: row.get::<_, i64>(3)? as u64,
        content: row.get(4)?,
        prompt_used: row.get(5)?,
        content_hash: row.get(6)?,
        created_at: parse_ts(&created_at)?,
    })
}

fn insert_report(conn: &Connection, report: NewReport) -> QuillResult<ReportRecord> {
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| to_storage_err("append", e))?;

    let previous: Option<(i64, String)> = tx
        .query_row(
            "SELECT version, created_at FROM reports
             WHERE subject = ?1 AND report_type = ?2
             ORDER BY version DESC LIMIT 1",
            params![report.subject, report.report_type],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .optional()
        .map_err(|e| to_storage_err("append", e))?;

    let (version, previous_at) = match previous {
        Some((v, at)) => (
            v as u64 + 1,
            Some(parse_ts(&at).map_err(|e| to_storage_err("append", e))?),
        ),
        None => (1, None),
    };
    let record = build_record(report, version, next_created_at(previous_at));

    tx.execute(
        "INSERT INTO reports (id, subject, report_type, version, content, prompt_used, content_hash, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            record.id,
            record.subject,
            record.report_type,
            record.version as i64,
            record.content,
            record.prompt_used,
            record.content_hash,
            format_ts(&record.created_at),
        ],
    )
    .map_err(|e| to_storage_err("append", e))?;
    tx.commit().map_err(|e| to_storage_err("append", e))?;
    Ok(record)
}

impl IReportStore for SqliteReportStore {
    async fn append(&self, report: NewReport) -> QuillResult<ReportRecord> {
        let span = store_span!("append", report.key());
        self.writer
            .with_conn(|conn| insert_report(conn, report))
            .instrument(span)
            .await
    }

    async fn list(&self, subject: &str, report_type: &str) -> QuillResult<Vec<ReportRecord>> {
        let span = store_span!("list", ReportKey::new(subject, report_type));
        self.writer
            .with_conn(|conn| {
                let mut stmt = conn
                    .prepare_cached(&format!(
                        "SELECT {SELECT_COLUMNS} FROM reports
                         WHERE subject = ?1 AND report_type = ?2
                         ORDER BY version DESC"
                    ))
                    .map_err(|e| to_storage_err("list", e))?;
                let rows = stmt
                    .query_map(params![subject, report_type], row_to_record)
                    .map_err(|e| to_storage_err("list", e))?;
                rows.collect::<rusqlite::Result<Vec<_>>>()
                    .map_err(|e| to_storage_err("list", e))
            })
            .instrument(span)
            .await
    }

    async fn latest(&self, subject: &str, report_type: &str) -> QuillResult<Option<ReportRecord>> {
        let span = store_span!("latest", ReportKey::new(subject, report_type));
        self.writer
            .with_conn(|conn| {
                conn.query_row(
                    &format!(
                        "SELECT {SELECT_COLUMNS} FROM reports
                         WHERE subject = ?1 AND report_type = ?2
                         ORDER BY version DESC LIMIT 1"
                    ),
                    params![subject, report_type],
                    row_to_record,
                )
                .optional()
                .map_err(|e| to_storage_err("latest", e))
            })
            .instrument(span)
            .await
    }

    async fn delete(&self, id: &str) -> QuillResult<bool> {
        let span = store_span!("delete", id);
        self.writer
            .with_conn(|conn| {
                let changed = conn
                    .execute("DELETE FROM reports WHERE id = ?1", params![id])
                    .map_err(|e| to_storage_err("delete", e))?;
                Ok(changed > 0)
            })
            .instrument(span)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn in_memory_store_is_migrated() {
        let store = SqliteReportStore::open_in_memory().unwrap();
        assert_eq!(store.schema_version().await.unwrap(), migrations::latest_version());
    }

    #[test]
    fn timestamps_round_trip_at_micros() {
        let ts = DateTime::parse_from_rfc3339("2026-02-03T04:05:06.123456Z")
            .unwrap()
            .with_timezone(&Utc);
        let s = format_ts(&ts);
        assert_eq!(s, "2026-02-03T04:05:06.123456Z");
        assert_eq!(parse_ts(&s).unwrap(), ts);
    }
}
