//! Schema creation and migration for the wage database.

use rusqlite::Connection;
use tracing::info;

use crate::error::{EngineError, EngineResult};

/// Latest schema version this crate knows about.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

const SCHEMA_V1: &str = r#"
CREATE TABLE IF NOT EXISTS workers (
    id          TEXT PRIMARY KEY,
    name        TEXT NOT NULL,
    phone       TEXT NOT NULL DEFAULT '',
    daily_rate  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS weeks (
    id              TEXT PRIMARY KEY,
    worker_id       TEXT NOT NULL,
    week_start      TEXT NOT NULL,
    days_json       TEXT NOT NULL,
    ot_hours        TEXT NOT NULL,
    ot_rate         TEXT NOT NULL,
    bonus           TEXT NOT NULL,
    deduction       TEXT NOT NULL,
    total_salary    TEXT NOT NULL,
    breakdown_json  TEXT NOT NULL,
    status          TEXT NOT NULL DEFAULT 'UNPAID',
    updated_at      TEXT NOT NULL,
    UNIQUE(worker_id, week_start)
);
"#;

/// Brings the database up to [`CURRENT_SCHEMA_VERSION`].
///
/// The version is tracked in `PRAGMA user_version`. A database written by a
/// newer version of the crate is refused rather than modified.
pub fn apply_migrations(conn: &Connection) -> EngineResult<()> {
    let version: i32 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;

    if version > CURRENT_SCHEMA_VERSION {
        return Err(EngineError::UnsupportedSchemaVersion {
            found: version,
            supported: CURRENT_SCHEMA_VERSION,
        });
    }

    if version < 1 {
        conn.execute_batch(SCHEMA_V1)?;
        conn.pragma_update(None, "user_version", 1)?;
        info!(from = version, to = 1, "Migrated wage database schema");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_database_is_migrated() {
        let conn = Connection::open_in_memory().unwrap();
        apply_migrations(&conn).unwrap();

        let version: i32 = conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))
            .unwrap();
        assert_eq!(version, CURRENT_SCHEMA_VERSION);
    }

    #[test]
    fn test_migrations_are_repeatable() {
        let conn = Connection::open_in_memory().unwrap();
        apply_migrations(&conn).unwrap();
        apply_migrations(&conn).unwrap();
    }

    #[test]
    fn test_newer_schema_is_refused() {
        let conn = Connection::open_in_memory().unwrap();
        conn.pragma_update(None, "user_version", CURRENT_SCHEMA_VERSION + 1)
            .unwrap();

        match apply_migrations(&conn) {
            Err(EngineError::UnsupportedSchemaVersion { found, supported }) => {
                assert_eq!(found, CURRENT_SCHEMA_VERSION + 1);
                assert_eq!(supported, CURRENT_SCHEMA_VERSION);
            }
            other => panic!("Expected UnsupportedSchemaVersion, got {:?}", other),
        }
    }
}
