//! v001 -- Initial schema creation.
//!
//! Creates the two core tables: `missions` (one row per mission, JSON
//! payload) and `settings` (small key-value pairs such as the active
//! mission id and the certificate-store file name).

use rusqlite::Connection;

/// SQL executed when upgrading from version 0 to version 1.
const UP_SQL: &str = r#"
-- ----------------------------------------------------------------
-- Missions
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS missions (
    id         TEXT PRIMARY KEY NOT NULL,   -- mission id from the JSON (_id)
    json       TEXT NOT NULL,               -- full mission JSON payload
    position   INTEGER NOT NULL,            -- stable display order
    updated_at TEXT NOT NULL                -- ISO-8601 / RFC-3339
);

CREATE INDEX IF NOT EXISTS idx_missions_position ON missions(position);

-- ----------------------------------------------------------------
-- Settings (key-value)
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS settings (
    key   TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL
);
"#;

/// Apply the initial migration.
pub fn up(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(UP_SQL)
}
