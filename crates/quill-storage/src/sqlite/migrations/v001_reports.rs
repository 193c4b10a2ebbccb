//! v001: the append-only, versioned report log.

pub const MIGRATION_SQL: &str = "
CREATE TABLE IF NOT EXISTS reports (
    id           TEXT PRIMARY KEY,
    subject      TEXT NOT NULL,
    report_type  TEXT NOT NULL,
    version      INTEGER NOT NULL,
    content      TEXT NOT NULL,
    prompt_used  TEXT NOT NULL,
    content_hash TEXT NOT NULL,
    created_at   TEXT NOT NULL,
    UNIQUE(subject, report_type, version)
);

CREATE INDEX IF NOT EXISTS idx_reports_key_version
    ON reports(subject, report_type, version DESC);
";
